//! Word-Usage Accumulator.
//!
//! Maps a byte range onto the 4-byte word slots of one cache line. The
//! resulting bitmap is OR-ed into the slot that holds the line, so the
//! population count of a slot tells how many distinct words of that line
//! have been touched since it was installed.

use crate::common::constants::{MAX_LINE_SIZE, WORD_BYTES};

/// Computes the words of one line touched by `len` bytes at `addr`.
///
/// Bit `w` of the returned bitmap is set when the access overlaps bytes
/// `4w..4w+4` of the line containing `addr`. The second value is the number
/// of bytes that fell past the end of that line; zero means the access fit,
/// and the bitmap only ever covers the in-line part.
///
/// `line_bytes` must be a power of two no larger than `MAX_LINE_SIZE`.
///
/// # Examples
///
/// ```
/// use cachesim_core::core::units::cache::usage::mark_used;
///
/// assert_eq!(mark_used(2, 4, 64), (0b11, 0));
/// assert_eq!(mark_used(60, 8, 64), (1 << 15, 4));
/// ```
#[inline(always)]
pub const fn mark_used(addr: u64, len: usize, line_bytes: usize) -> (u64, usize) {
    debug_assert!(line_bytes.is_power_of_two() && line_bytes <= MAX_LINE_SIZE);
    if len == 0 {
        return (0, 0);
    }
    let offset = (addr as usize) & (line_bytes - 1);
    let end = offset + len;
    let (in_line_end, overflow) = if end > line_bytes {
        (line_bytes, end - line_bytes)
    } else {
        (end, 0)
    };

    let first = offset / WORD_BYTES;
    let last = (in_line_end - 1) / WORD_BYTES;
    let bits = (u64::MAX >> (63 - last)) & (u64::MAX << first);
    (bits, overflow)
}

/// Number of words recorded in a usage bitmap.
#[inline(always)]
pub const fn words(bits: u64) -> u64 {
    bits.count_ones() as u64
}
