//! Cache hierarchy core.
//!
//! 1. **Units:** The per-cache model (geometry, LRU sets, word usage, dispatch).
//! 2. **Hierarchy:** I1/D1 in front of a shared LL, with counter accumulation.

/// I1/D1/LL orchestration.
pub mod hierarchy;

/// Per-cache hardware units.
pub mod units;

pub use hierarchy::CacheHierarchy;
pub use units::cache::CacheState;
