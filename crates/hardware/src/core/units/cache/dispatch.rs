//! Reference Dispatcher.
//!
//! Splits an `(addr, size)` reference into line-aligned lookups. A reference
//! that straddles two lines counts as a single access:
//!
//! - both blocks hit                  --> one hit
//! - one block hits, the other misses --> one miss
//! - both blocks miss                 --> one miss (not two)
//!
//! Both lookups always run because each one updates recency and usage state.
//! References touching three or more lines cannot occur with a valid
//! geometry and abort the simulation.

use super::CacheState;
use super::usage::mark_used;
use crate::common::constants::MAX_ACCESS_SIZE;
use crate::common::error::ShapeViolation;

impl CacheState {
    /// Classifies a reference of `size` bytes at `addr`; returns `true` on a hit.
    ///
    /// # Panics
    ///
    /// Panics with a [`ShapeViolation`] diagnostic if the reference touches
    /// more than two lines, or if the word-usage overflow disagrees with the
    /// block span. Either means the usage counters can no longer be trusted.
    #[inline(always)]
    pub fn access(&mut self, addr: u64, size: u8) -> bool {
        debug_assert!(size <= MAX_ACCESS_SIZE, "reference of {size} bytes");
        let line_bytes = self.line_bytes();
        let first = self.block(addr);
        let last = self.block(addr.wrapping_add(u64::from(size).saturating_sub(1)));

        if first == last {
            let (bits, overflow) = mark_used(addr, usize::from(size), line_bytes);
            if overflow > 0 {
                fatal(&ShapeViolation::UnexpectedOverflow {
                    addr,
                    size,
                    overflow,
                });
            }
            return self.lookup(self.set_index(first), first, bits);
        }

        if first.wrapping_add(1) == last {
            let (bits1, overflow) = mark_used(addr, usize::from(size), line_bytes);
            if overflow == 0 {
                fatal(&ShapeViolation::MissingOverflow { addr, size });
            }
            let (bits2, _) = mark_used(last << self.line_bits(), overflow, line_bytes);

            let hit1 = self.lookup(self.set_index(first), first, bits1);
            let hit2 = self.lookup(self.set_index(last), last, bits2);
            return hit1 && hit2;
        }

        fatal(&ShapeViolation::TooManyLines {
            addr,
            size,
            first,
            last,
        })
    }
}

#[cold]
#[inline(never)]
fn fatal(violation: &ShapeViolation) -> ! {
    tracing::error!(%violation, "cache simulation aborted");
    panic!("{violation}")
}
