//! Hardware units modelled by the simulator.

/// Set-associative cache state, lookup and reference dispatch.
pub mod cache;
