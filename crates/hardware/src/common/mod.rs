//! Common types and constants shared by every part of the cache simulator.
//!
//! 1. **Constants:** Line size limits, usage granularity and the empty-slot tag.
//! 2. **Access Types:** Reference categories, references and hit/miss outcomes.
//! 3. **Error Handling:** Configuration errors and fatal reference-shape violations.

/// Cache geometry constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use constants::{EMPTY_TAG, MAX_ACCESS_SIZE, MAX_LINE_SIZE, MIN_LINE_SIZE, WORD_BYTES};
pub use data::{AccessType, CacheHitType, Reference};
pub use error::{ConfigError, GeometryError, ShapeViolation};
