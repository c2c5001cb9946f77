//! Simulation driver.
//!
//! Routes references by access type through the cache hierarchy and keeps
//! one set of counters per category.

/// Reference-driven simulator.
pub mod simulator;

pub use simulator::Simulator;
