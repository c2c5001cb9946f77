//! Cache Geometry Constants.
//!
//! Limits shared by configuration validation, the word-usage accumulator and
//! the set engine.

/// Smallest supported cache line in bytes.
///
/// Together with [`MAX_ACCESS_SIZE`] this guarantees that a single reference
/// never touches more than two lines.
pub const MIN_LINE_SIZE: usize = 16;

/// Largest supported cache line in bytes.
///
/// Usage bitmaps are `u64` with one bit per word, so a line holds at most
/// 64 words.
pub const MAX_LINE_SIZE: usize = WORD_BYTES * USAGE_BITS;

/// Granularity of usage tracking in bytes (one 32-bit word).
pub const WORD_BYTES: usize = 4;

/// Width of a per-slot usage bitmap in bits.
pub const USAGE_BITS: usize = u64::BITS as usize;

/// Widest single reference the engine is specified for, in bytes.
pub const MAX_ACCESS_SIZE: u8 = 16;

/// Tag value marking an empty slot.
///
/// Tags are full block numbers (`addr >> line_bits`), which can never reach
/// all-ones for a line size of at least 2 bytes.
pub const EMPTY_TAG: u64 = u64::MAX;
