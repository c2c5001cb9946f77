//! Error definitions.
//!
//! This module defines the two failure tiers of the cache simulator:
//! 1. **Configuration errors:** Reported at start-up through `Result` before any cache exists.
//! 2. **Reference-shape violations:** Detected while simulating; these are fatal because
//!    continuing would silently corrupt the incremental usage counters.

use std::path::PathBuf;

use thiserror::Error;

/// A cache geometry that the simulator cannot model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// One of size, associativity or line size is zero.
    #[error("{field} must be non-zero")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Line size is not a power of two.
    #[error("line size {0} B is not a power of two")]
    LineNotPowerOfTwo(usize),

    /// Line size is below the supported minimum.
    #[error("line size {line} B is below the minimum of {min} B")]
    LineTooSmall {
        /// Configured line size.
        line: usize,
        /// Supported minimum.
        min: usize,
    },

    /// Line size has more words than a usage bitmap can hold.
    #[error("line size {line} B exceeds the maximum of {max} B")]
    LineTooLarge {
        /// Configured line size.
        line: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Capacity is not a whole number of sets.
    #[error("size {size} B is not a multiple of line size × ways ({line} B × {ways})")]
    UnevenSets {
        /// Configured capacity.
        size: usize,
        /// Configured line size.
        line: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// Derived set count is not a power of two.
    #[error("{0} sets is not a power of two")]
    SetsNotPowerOfTwo(usize),
}

/// Start-up failure while building the cache hierarchy configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A single cache level has an unusable geometry.
    #[error("invalid {level} cache: {source}")]
    Geometry {
        /// Level name (`I1`, `D1`, `LL`).
        level: &'static str,
        /// Underlying geometry problem.
        #[source]
        source: GeometryError,
    },

    /// JSON could not be parsed into a configuration.
    #[error("failed to parse cache configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read cache configuration '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// A reference whose shape breaks the two-line guarantee.
///
/// Never returned to callers: the dispatcher panics with this value's
/// message, since no counter produced after it could be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
    /// The reference touches more than two consecutive lines.
    #[error(
        "reference straddles more than two cache lines: addr {addr:#x} size {size} blocks {first}..={last}"
    )]
    TooManyLines {
        /// Reference address.
        addr: u64,
        /// Reference size.
        size: u8,
        /// First block touched.
        first: u64,
        /// Last block touched.
        last: u64,
    },

    /// Word usage overflowed a line the block computation says was not crossed.
    #[error("usage overflowed a single-line reference: addr {addr:#x} size {size} overflow {overflow}")]
    UnexpectedOverflow {
        /// Reference address.
        addr: u64,
        /// Reference size.
        size: u8,
        /// Bytes reported past the end of the line.
        overflow: usize,
    },

    /// The block computation says a line was crossed but no bytes overflowed.
    #[error("usage fit one line of a straddling reference: addr {addr:#x} size {size}")]
    MissingOverflow {
        /// Reference address.
        addr: u64,
        /// Reference size.
        size: u8,
    },
}
