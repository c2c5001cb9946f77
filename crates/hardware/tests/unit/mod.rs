//! # Unit Components
//!
//! Tests grouped by the part of the simulator they exercise, laid out like
//! the library's own module tree.


/// Cache engine and hierarchy tests.
///
/// - Word-usage bitmaps and line overflow.
/// - Tag store, LRU order and usage accounting of a single cache.
/// - Line splitting of straddling references.
/// - I1/D1/LL orchestration and counter accumulation.
pub mod core;
