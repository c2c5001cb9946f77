//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulated hierarchy. It provides:
//! 1. **Defaults:** Baseline geometries for the first-level and last-level caches.
//! 2. **Structures:** Per-cache geometry and the three-level hierarchy config.
//! 3. **Validation:** Geometry checks run once, before any cache state is built.
//!
//! Configuration is supplied as JSON or built in code starting from
//! `CacheHierarchyConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{MAX_LINE_SIZE, MIN_LINE_SIZE};
use crate::common::error::{ConfigError, GeometryError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default first-level cache size in bytes (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;

    /// Default first-level associativity.
    pub const L1_WAYS: usize = 8;

    /// Default last-level cache size in bytes (8 MiB).
    pub const LL_SIZE: usize = 8 * 1024 * 1024;

    /// Default last-level associativity.
    pub const LL_WAYS: usize = 16;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const CACHE_LINE: usize = 64;
}

/// Geometry of one simulated cache.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::CacheConfig;
///
/// let config = CacheConfig::new(32 * 1024, 8, 64);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.sets(), 64);
/// assert_eq!(config.description(), "32768 B, 64 B, 8-way associative");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,
}

impl CacheConfig {
    /// Creates a cache geometry from capacity, associativity and line size.
    pub const fn new(size_bytes: usize, ways: usize, line_bytes: usize) -> Self {
        Self {
            size_bytes,
            ways,
            line_bytes,
        }
    }

    /// Default first-level geometry.
    pub const fn l1_default() -> Self {
        Self::new(defaults::L1_SIZE, defaults::L1_WAYS, defaults::CACHE_LINE)
    }

    /// Default last-level geometry.
    pub const fn ll_default() -> Self {
        Self::new(defaults::LL_SIZE, defaults::LL_WAYS, defaults::CACHE_LINE)
    }

    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    fn default_ways() -> usize {
        defaults::L1_WAYS
    }

    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Number of sets implied by this geometry.
    ///
    /// Only meaningful once [`validate`](Self::validate) has succeeded.
    pub const fn sets(&self) -> usize {
        self.size_bytes / self.line_bytes / self.ways
    }

    /// Checks that this geometry can be simulated.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if any size is zero, the line size is not a
    /// power of two or lies outside `MIN_LINE_SIZE..=MAX_LINE_SIZE`, the
    /// capacity does not split into whole sets, or the set count is not a
    /// power of two.
    pub const fn validate(&self) -> Result<(), GeometryError> {
        if self.size_bytes == 0 {
            return Err(GeometryError::Zero { field: "size" });
        }
        if self.ways == 0 {
            return Err(GeometryError::Zero {
                field: "associativity",
            });
        }
        if self.line_bytes == 0 {
            return Err(GeometryError::Zero { field: "line size" });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(GeometryError::LineNotPowerOfTwo(self.line_bytes));
        }
        if self.line_bytes < MIN_LINE_SIZE {
            return Err(GeometryError::LineTooSmall {
                line: self.line_bytes,
                min: MIN_LINE_SIZE,
            });
        }
        if self.line_bytes > MAX_LINE_SIZE {
            return Err(GeometryError::LineTooLarge {
                line: self.line_bytes,
                max: MAX_LINE_SIZE,
            });
        }
        let set_bytes = match self.line_bytes.checked_mul(self.ways) {
            Some(bytes) => bytes,
            None => {
                return Err(GeometryError::UnevenSets {
                    size: self.size_bytes,
                    line: self.line_bytes,
                    ways: self.ways,
                });
            }
        };
        if self.size_bytes % set_bytes != 0 {
            return Err(GeometryError::UnevenSets {
                size: self.size_bytes,
                line: self.line_bytes,
                ways: self.ways,
            });
        }
        let sets = self.size_bytes / set_bytes;
        if !sets.is_power_of_two() {
            return Err(GeometryError::SetsNotPowerOfTwo(sets));
        }
        Ok(())
    }

    /// Human-readable geometry line, e.g. `"65536 B, 64 B, direct-mapped"`.
    pub fn description(&self) -> String {
        if self.ways == 1 {
            format!("{} B, {} B, direct-mapped", self.size_bytes, self.line_bytes)
        } else {
            format!(
                "{} B, {} B, {}-way associative",
                self.size_bytes, self.line_bytes, self.ways
            )
        }
    }
}

impl Default for CacheConfig {
    /// Creates the default first-level geometry (32 KiB, 8-way, 64 B lines).
    fn default() -> Self {
        Self::l1_default()
    }
}

/// Geometries of the three simulated caches.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::CacheHierarchyConfig;
///
/// let json = r#"{
///     "l1_i": { "size_bytes": 16384, "ways": 4, "line_bytes": 32 },
///     "l1_d": { "size_bytes": 32768, "ways": 8, "line_bytes": 64 },
///     "ll":   { "size_bytes": 262144, "ways": 16, "line_bytes": 64 }
/// }"#;
///
/// let config = CacheHierarchyConfig::from_json(json).unwrap();
/// assert_eq!(config.l1_i.line_bytes, 32);
/// assert_eq!(config.ll.sets(), 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheHierarchyConfig {
    /// First-level instruction cache
    #[serde(default = "CacheConfig::l1_default")]
    pub l1_i: CacheConfig,

    /// First-level data cache
    #[serde(default = "CacheConfig::l1_default")]
    pub l1_d: CacheConfig,

    /// Shared last-level cache
    #[serde(default = "CacheConfig::ll_default")]
    pub ll: CacheConfig,
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            l1_i: CacheConfig::l1_default(),
            l1_d: CacheConfig::l1_default(),
            ll: CacheConfig::ll_default(),
        }
    }
}

impl CacheHierarchyConfig {
    /// Validates every level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] naming the first level that fails
    /// [`CacheConfig::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, cache) in [("I1", &self.l1_i), ("D1", &self.l1_d), ("LL", &self.ll)] {
            cache
                .validate()
                .map_err(|source| ConfigError::Geometry { level, source })?;
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing levels and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Geometry`] for an unusable geometry.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_json`](Self::from_json).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_json(&json)
    }
}
