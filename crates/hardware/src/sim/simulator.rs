//! Simulator: owns the cache hierarchy and the per-category counters side-by-side.

use crate::common::data::{AccessType, CacheHitType, Reference};
use crate::common::error::ConfigError;
use crate::config::CacheHierarchyConfig;
use crate::core::CacheHierarchy;
use crate::stats::CacheStats;

/// Top-level simulator for one instruction stream.
///
/// Independent streams each get their own `Simulator`; nothing is shared
/// between instances.
///
/// # Examples
///
/// ```
/// use cachesim_core::{CacheHierarchyConfig, Reference, Simulator};
///
/// let mut sim = Simulator::new(&CacheHierarchyConfig::default()).unwrap();
/// sim.replay([Reference::fetch(0x1000, 4), Reference::read(0x2000, 8)]);
/// assert_eq!(sim.stats.fetch.accesses, 1);
/// assert_eq!(sim.stats.read.l1_misses, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    /// I1, D1 and LL cache state.
    pub caches: CacheHierarchy,
    /// Counters per access category.
    pub stats: CacheStats,
}

impl Simulator {
    /// Validates `config` and builds a simulator with empty caches and zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any cache geometry is invalid.
    pub fn new(config: &CacheHierarchyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            caches: CacheHierarchy::from_config(config)?,
            stats: CacheStats::default(),
        })
    }

    /// Simulates one reference and returns where it was served.
    ///
    /// Fetches that stay inside one line take the single-line path when I1
    /// and LL share a line size.
    pub fn access(&mut self, reference: Reference) -> CacheHitType {
        let Reference { addr, size, kind } = reference;
        let cc = self.stats.counters_mut(kind);
        match kind {
            AccessType::Fetch if self.caches.is_fast_path(addr, size) => {
                self.caches.fetch_single_line(addr, size, cc)
            }
            AccessType::Fetch => self.caches.fetch(addr, size, cc),
            AccessType::Read | AccessType::Write => self.caches.data(addr, size, cc),
        }
    }

    /// Simulates references in order.
    pub fn replay<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = Reference>,
    {
        for reference in references {
            let _ = self.access(reference);
        }
    }
}
