//! Memory Access Types.
//!
//! This module defines the classification of memory references fed to the
//! cache hierarchy. These types are used for the following:
//! 1. **Routing:** Fetches go to the instruction cache, reads and writes to the data cache.
//! 2. **Statistics Tracking:** Each category accumulates its own counters.
//! 3. **Outcome Reporting:** Per-reference hit/miss classification codes.

use serde::Deserialize;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Looked up in the first-level instruction cache.
    Fetch,

    /// Data read access.
    ///
    /// Looked up in the first-level data cache.
    Read,

    /// Data write access.
    ///
    /// The modelled caches are write-allocate, so a write is looked up
    /// exactly like a read.
    Write,
}

impl AccessType {
    /// Single-character code used in access logs (`I`, `R`, `W`).
    pub const fn as_char(self) -> char {
        match self {
            Self::Fetch => 'I',
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }

    /// Returns true for data-side accesses.
    pub const fn is_data(self) -> bool {
        matches!(self, Self::Read | Self::Write)
    }
}

/// Outcome of one reference traversing the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheHitType {
    /// Served by the first-level cache.
    L1Hit,
    /// Missed the first level, hit the last-level cache.
    L1Miss,
    /// Missed both levels.
    LlMiss,
}

impl CacheHitType {
    /// Single-character code used in access logs (`H`, `L`, `M`).
    pub const fn as_char(self) -> char {
        match self {
            Self::L1Hit => 'H',
            Self::L1Miss => 'L',
            Self::LlMiss => 'M',
        }
    }

    /// Returns true if the first-level cache missed.
    pub const fn is_l1_miss(self) -> bool {
        !matches!(self, Self::L1Hit)
    }
}

/// A single memory reference presented to the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Reference {
    /// Byte address of the first byte touched.
    pub addr: u64,
    /// Access width in bytes (1 to 16).
    pub size: u8,
    /// Access category.
    pub kind: AccessType,
}

impl Reference {
    /// Instruction fetch of `size` bytes at `addr`.
    pub const fn fetch(addr: u64, size: u8) -> Self {
        Self {
            addr,
            size,
            kind: AccessType::Fetch,
        }
    }

    /// Data read of `size` bytes at `addr`.
    pub const fn read(addr: u64, size: u8) -> Self {
        Self {
            addr,
            size,
            kind: AccessType::Read,
        }
    }

    /// Data write of `size` bytes at `addr`.
    pub const fn write(addr: u64, size: u8) -> Self {
        Self {
            addr,
            size,
            kind: AccessType::Write,
        }
    }
}
