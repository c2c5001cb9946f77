//! Cache Hierarchy.
//!
//! Wires a first-level instruction cache (I1), a first-level data cache (D1)
//! and a shared last-level cache (LL). Levels are neither inclusive nor
//! exclusive: a first-level miss forwards the same reference to LL, and each
//! level keeps its own LRU and usage state.
//!
//! Every operation updates the caller's [`AccessCounters`]:
//! 1. `accesses` on every reference.
//! 2. `l1_misses` and `ll_words` on a first-level miss; `ll_misses` on a
//!    miss at both levels.
//! 3. `l1_words` on every reference, hit or miss.

use tracing::{debug, trace};

use crate::common::data::CacheHitType;
use crate::common::error::ConfigError;
use crate::config::CacheHierarchyConfig;
use crate::core::units::cache::CacheState;
use crate::core::units::cache::usage::mark_used;
use crate::stats::AccessCounters;

/// The three simulated caches of one instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHierarchy {
    i1: CacheState,
    d1: CacheState,
    ll: CacheState,
}

impl CacheHierarchy {
    /// Builds empty caches from an already validated configuration.
    pub fn new(config: &CacheHierarchyConfig) -> Self {
        let hierarchy = Self {
            i1: CacheState::new(&config.l1_i),
            d1: CacheState::new(&config.l1_d),
            ll: CacheState::new(&config.ll),
        };
        debug!(
            i1 = %hierarchy.i1.description(),
            d1 = %hierarchy.d1.description(),
            ll = %hierarchy.ll.description(),
            "cache hierarchy initialised"
        );
        hierarchy
    }

    /// Validates `config`, then builds empty caches.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by
    /// [`CacheHierarchyConfig::validate`].
    pub fn from_config(config: &CacheHierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// First-level instruction cache.
    pub const fn i1(&self) -> &CacheState {
        &self.i1
    }

    /// First-level data cache.
    pub const fn d1(&self) -> &CacheState {
        &self.d1
    }

    /// Shared last-level cache.
    pub const fn ll(&self) -> &CacheState {
        &self.ll
    }

    /// Instruction fetch through the generic path.
    #[inline(always)]
    pub fn fetch(&mut self, addr: u64, size: u8, cc: &mut AccessCounters) -> CacheHitType {
        Self::reference("I1", &mut self.i1, &mut self.ll, addr, size, cc)
    }

    /// Data read or write.
    #[inline(always)]
    pub fn data(&mut self, addr: u64, size: u8, cc: &mut AccessCounters) -> CacheHitType {
        Self::reference("D1", &mut self.d1, &mut self.ll, addr, size, cc)
    }

    /// Instruction fetch known to touch a single line.
    ///
    /// Only valid when [`is_fast_path`](Self::is_fast_path) holds for
    /// `(addr, size)`. Skips the straddle logic and uses the block number
    /// as tag in both levels; the counters end up exactly as with
    /// [`fetch`](Self::fetch).
    #[inline(always)]
    pub fn fetch_single_line(
        &mut self,
        addr: u64,
        size: u8,
        cc: &mut AccessCounters,
    ) -> CacheHitType {
        debug_assert!(self.is_fast_path(addr, size));
        cc.accesses += 1;

        let block = self.i1.block(addr);
        // Same line size in I1 and LL, so the usage bitmap is shared too.
        let (bits, _) = mark_used(addr, usize::from(size), self.i1.line_bytes());

        let mut outcome = CacheHitType::L1Hit;
        if !self.i1.lookup(self.i1.set_index(block), block, bits) {
            cc.l1_misses += 1;
            outcome = CacheHitType::L1Miss;
            if !self.ll.lookup(self.ll.set_index(block), block, bits) {
                cc.ll_misses += 1;
                outcome = CacheHitType::LlMiss;
            }
            cc.ll_words += self.ll.total_used();
            trace!(
                cache = "I1",
                addr,
                size,
                l1_used = self.i1.total_used(),
                ll_used = self.ll.total_used(),
                "first-level miss"
            );
        }
        cc.l1_words += self.i1.total_used();
        outcome
    }

    /// Whether a fetch may take [`fetch_single_line`](Self::fetch_single_line).
    ///
    /// True when I1 and LL share a line size and the reference stays inside
    /// one line. Pure; returning `false` is always safe.
    pub const fn is_fast_path(&self, addr: u64, size: u8) -> bool {
        if self.i1.line_bits() != self.ll.line_bits() {
            return false;
        }
        let last = addr.wrapping_add((size as u64).saturating_sub(1));
        self.i1.block(addr) == self.i1.block(last)
    }

    #[inline(always)]
    fn reference(
        name: &'static str,
        l1: &mut CacheState,
        ll: &mut CacheState,
        addr: u64,
        size: u8,
        cc: &mut AccessCounters,
    ) -> CacheHitType {
        cc.accesses += 1;

        let mut outcome = CacheHitType::L1Hit;
        if !l1.access(addr, size) {
            cc.l1_misses += 1;
            outcome = CacheHitType::L1Miss;
            if !ll.access(addr, size) {
                cc.ll_misses += 1;
                outcome = CacheHitType::LlMiss;
            }
            cc.ll_words += ll.total_used();
            trace!(
                cache = name,
                addr,
                size,
                l1_used = l1.total_used(),
                ll_used = ll.total_used(),
                "first-level miss"
            );
        }
        cc.l1_words += l1.total_used();
        outcome
    }
}
