//! Trace-driven cache hierarchy simulator.
//!
//! This crate models how a program's memory references behave against an
//! I1/D1/LL cache hierarchy:
//! 1. **Cache model:** Set-associative caches with true LRU replacement.
//! 2. **Word usage:** Per-line bitmaps of touched 4-byte words and a running total per cache.
//! 3. **Hierarchy:** First-level instruction and data caches backed by a shared last-level cache.
//! 4. **Simulation:** Per-category counters for accesses, misses and sampled word usage.
//!
//! References straddling two lines count as a single hit or miss. A
//! reference spanning three or more lines is a fatal error.

/// Common types and constants (access types, limits, errors).
pub mod common;
/// Cache geometry configuration and validation.
pub mod config;
/// Cache model and hierarchy.
pub mod core;
/// Reference-driven simulator.
pub mod sim;
/// Access counters and reporting.
pub mod stats;

/// Access categories, references and outcomes.
pub use crate::common::{AccessType, CacheHitType, Reference};
/// Configuration types; start from `CacheHierarchyConfig::default()` or JSON.
pub use crate::config::{CacheConfig, CacheHierarchyConfig};
/// Cache state and hierarchy.
pub use crate::core::{CacheHierarchy, CacheState};
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Counters.
pub use crate::stats::{AccessCounters, CacheStats};
