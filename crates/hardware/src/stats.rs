//! Simulation statistics collection and reporting.
//!
//! This module holds the counters the cache hierarchy accumulates. It provides:
//! 1. **Per-category counters:** Accesses, first-level misses, last-level misses.
//! 2. **Usage integrals:** Running sums of each cache's `total_used`, sampled per reference.
//! 3. **Derived metrics:** Miss rates and average words in use.
//!
//! The usage sums are time-integrated samples: the first-level sum grows by
//! the first-level cache's `total_used` after every reference, the
//! last-level sum by the last-level cache's `total_used` after every
//! first-level miss. Dividing by the matching sample count gives the mean
//! number of touched words resident in that cache.

use crate::common::data::AccessType;

/// Counters for one access category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessCounters {
    /// Total references of this category.
    pub accesses: u64,
    /// References that missed the first-level cache.
    pub l1_misses: u64,
    /// References that also missed the last-level cache.
    pub ll_misses: u64,
    /// Sum of the first-level cache's `total_used` sampled after each reference.
    pub l1_words: u64,
    /// Sum of the last-level cache's `total_used` sampled after each first-level miss.
    pub ll_words: u64,
}

/// Returns `num / den`, or 0.0 when nothing was sampled.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl AccessCounters {
    /// Field-wise sum of two counter sets.
    #[must_use]
    pub const fn merge(&self, other: &Self) -> Self {
        Self {
            accesses: self.accesses + other.accesses,
            l1_misses: self.l1_misses + other.l1_misses,
            ll_misses: self.ll_misses + other.ll_misses,
            l1_words: self.l1_words + other.l1_words,
            ll_words: self.ll_words + other.ll_words,
        }
    }

    /// First-level misses per access.
    pub fn l1_miss_rate(&self) -> f64 {
        ratio(self.l1_misses, self.accesses)
    }

    /// Last-level misses per access.
    pub fn ll_miss_rate(&self) -> f64 {
        ratio(self.ll_misses, self.accesses)
    }

    /// Mean first-level `total_used` over all references.
    pub fn avg_l1_words(&self) -> f64 {
        ratio(self.l1_words, self.accesses)
    }

    /// Mean last-level `total_used` over first-level misses.
    pub fn avg_ll_words(&self) -> f64 {
        ratio(self.ll_words, self.l1_misses)
    }
}

/// Counters for every access category of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CacheStats {
    /// Instruction fetches.
    pub fetch: AccessCounters,
    /// Data reads.
    pub read: AccessCounters,
    /// Data writes.
    pub write: AccessCounters,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"fetch"`, `"data"`, `"total"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["fetch", "data", "total"];

impl CacheStats {
    /// Counters for one category.
    pub const fn counters(&self, kind: AccessType) -> &AccessCounters {
        match kind {
            AccessType::Fetch => &self.fetch,
            AccessType::Read => &self.read,
            AccessType::Write => &self.write,
        }
    }

    /// Mutable counters for one category.
    pub const fn counters_mut(&mut self, kind: AccessType) -> &mut AccessCounters {
        match kind {
            AccessType::Fetch => &mut self.fetch,
            AccessType::Read => &mut self.read,
            AccessType::Write => &mut self.write,
        }
    }

    /// Reads and writes combined.
    pub const fn data(&self) -> AccessCounters {
        self.read.merge(&self.write)
    }

    /// All categories combined.
    pub const fn total(&self) -> AccessCounters {
        self.fetch.merge(&self.data())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"fetch"`, `"data"` or
    /// `"total"`. Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let print_counters = |prefix: &str, l1: &str, cc: &AccessCounters| {
            println!("  {prefix}.refs              {}", cc.accesses);
            println!(
                "  {prefix}.{l1}_misses         {} ({:.2}%)",
                cc.l1_misses,
                cc.l1_miss_rate() * 100.0
            );
            println!(
                "  {prefix}.ll_misses         {} ({:.2}%)",
                cc.ll_misses,
                cc.ll_miss_rate() * 100.0
            );
            println!(
                "  {prefix}.{l1}_words          {} (avg {:.2})",
                cc.l1_words,
                cc.avg_l1_words()
            );
            println!(
                "  {prefix}.ll_words          {} (avg {:.2})",
                cc.ll_words,
                cc.avg_ll_words()
            );
        };

        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        if want("fetch") {
            println!("INSTRUCTION FETCH");
            print_counters("I", "i1", &self.fetch);
            println!("----------------------------------------------------------");
        }
        if want("data") {
            println!("DATA");
            print_counters("D", "d1", &self.data());
            println!(
                "  D.reads / D.writes {} / {}",
                self.read.accesses, self.write.accesses
            );
            println!("----------------------------------------------------------");
        }
        if want("total") {
            let total = self.total();
            println!("TOTAL");
            println!("  refs               {}", total.accesses);
            println!(
                "  l1_misses          {} ({:.2}%)",
                total.l1_misses,
                total.l1_miss_rate() * 100.0
            );
            println!(
                "  ll_misses          {} ({:.2}%)",
                total.ll_misses,
                total.ll_miss_rate() * 100.0
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
