//! Set-Associative Cache Model with Word-Usage Tracking.
//!
//! This module implements the state of one simulated cache: geometry derived
//! from a [`CacheConfig`], a tag store with true LRU order per set, and a
//! parallel store of per-slot word-usage bitmaps.
//!
//! # Layout
//!
//! Slots live in two flat vectors indexed by `set * ways + way`. Within a set,
//! way 0 is the most recently used slot and way `ways - 1` the least recently
//! used one. Promotion shifts the more recent slots down by one position,
//! which is bounded by the associativity and keeps each set contiguous.
//!
//! # Usage accounting
//!
//! `total_used` is the sum of the population counts of every usage bitmap.
//! It is only ever changed by [`CacheState::lookup`], which applies the exact
//! delta of the one slot it modifies.

/// Reference dispatch (line splitting and straddle handling).
pub mod dispatch;

/// Word-usage bitmaps for sub-line accesses.
pub mod usage;

use crate::common::constants::EMPTY_TAG;
use crate::config::CacheConfig;

use self::usage::words;

/// State of one simulated cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheState {
    config: CacheConfig,
    sets: usize,
    sets_mask: u64,
    line_bits: u32,
    tag_shift: u32,
    tags: Vec<u64>,
    usage: Vec<u64>,
    total_used: u64,
}

impl CacheState {
    /// Builds an empty cache for the given geometry.
    ///
    /// The geometry is trusted: callers validate it with
    /// [`CacheConfig::validate`] first. Every slot starts empty with a zero
    /// usage bitmap.
    pub fn new(config: &CacheConfig) -> Self {
        let sets = config.sets();
        let line_bits = config.line_bytes.trailing_zeros();
        let slots = sets * config.ways;

        Self {
            config: *config,
            sets,
            sets_mask: sets as u64 - 1,
            line_bits,
            tag_shift: line_bits + sets.trailing_zeros(),
            tags: vec![EMPTY_TAG; slots],
            usage: vec![0; slots],
            total_used: 0,
        }
    }

    /// Geometry this cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.config.ways
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.config.line_bytes
    }

    /// `log2(line_bytes)`.
    pub const fn line_bits(&self) -> u32 {
        self.line_bits
    }

    /// `sets - 1`, the set-selection mask applied to block numbers.
    pub const fn sets_mask(&self) -> u64 {
        self.sets_mask
    }

    /// Shift that would yield a minimal tag (`line_bits + log2(sets)`).
    ///
    /// Informational: slots store the whole block number as their tag.
    pub const fn tag_shift(&self) -> u32 {
        self.tag_shift
    }

    /// Sum of set bits over every usage bitmap in this cache.
    pub const fn total_used(&self) -> u64 {
        self.total_used
    }

    /// Human-readable geometry line.
    pub fn description(&self) -> String {
        self.config.description()
    }

    /// All tag slots, set by set, MRU first within each set.
    pub fn tags(&self) -> &[u64] {
        &self.tags
    }

    /// All usage bitmaps, index-aligned with [`tags`](Self::tags).
    pub fn usage(&self) -> &[u64] {
        &self.usage
    }

    /// Tags of one set, MRU first.
    pub fn set_tags(&self, set: usize) -> &[u64] {
        let base = set * self.config.ways;
        &self.tags[base..base + self.config.ways]
    }

    /// Usage bitmaps of one set, aligned with [`set_tags`](Self::set_tags).
    pub fn set_usage(&self, set: usize) -> &[u64] {
        let base = set * self.config.ways;
        &self.usage[base..base + self.config.ways]
    }

    /// Memory block (line number) containing `addr`.
    #[inline(always)]
    pub const fn block(&self, addr: u64) -> u64 {
        addr >> self.line_bits
    }

    /// Set a block maps to (bit selection on the block number).
    #[inline(always)]
    pub const fn set_index(&self, block: u64) -> usize {
        (block & self.sets_mask) as usize
    }

    /// Looks `tag` up in `set` and records the words in `bits`.
    ///
    /// Returns `true` on a hit. A hit merges `bits` into the slot and moves it
    /// to the MRU position. A miss evicts the LRU slot, shifts the rest of the
    /// set down and installs `(tag, bits)` as MRU. In every case `total_used`
    /// changes by exactly the change in the touched slot's population count.
    #[inline(always)]
    pub fn lookup(&mut self, set: usize, tag: u64, bits: u64) -> bool {
        let ways = self.config.ways;
        let base = set * ways;
        let tags = &mut self.tags[base..base + ways];
        let usage = &mut self.usage[base..base + ways];

        // MRU hit is by far the common case.
        if tags[0] == tag {
            let before = usage[0];
            usage[0] |= bits;
            self.total_used = self.total_used + words(usage[0]) - words(before);
            return true;
        }

        if let Some(way) = tags[1..].iter().position(|&t| t == tag).map(|p| p + 1) {
            let before = usage[way];
            tags[..=way].rotate_right(1);
            usage[..=way].rotate_right(1);
            usage[0] = before | bits;
            self.total_used = self.total_used + words(usage[0]) - words(before);
            return true;
        }

        let evicted = usage[ways - 1];
        tags.rotate_right(1);
        usage.rotate_right(1);
        tags[0] = tag;
        usage[0] = bits;
        self.total_used = self.total_used + words(bits) - words(evicted);
        false
    }
}
