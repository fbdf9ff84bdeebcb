//! Configuration and shared identifier types for skylio.
//!
//! The configuration is designed to be easily serializable and loadable
//! from JSON, TOML, or other formats while keeping complexity minimal.

use crate::error::{Result, SkylioError};
use serde::{Deserialize, Serialize};

/// Identifies an uncertain object. All mutually exclusive instances of
/// the same object share one `ObjectId`.
pub type ObjectId = u32;

/// Identifies a single instance of an uncertain object. Unique across
/// the whole plane set.
pub type InstanceId = u64;

/// Index configuration.
///
/// # Example
///
/// ```rust
/// use skylio::Config;
///
/// // Create default config
/// let config = Config::default();
/// assert_eq!(config.dims, 2);
///
/// // Load from JSON; missing fields take their defaults
/// let json = r#"{ "dims": 3, "leaf_capacity": 4 }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.max_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dimensionality of the dual space (1-8, default: 2).
    /// The subdivision fanout is `2^dims`.
    #[serde(default = "Config::default_dims")]
    pub dims: usize,

    /// Maximum number of crossing planes a region may hold before it is
    /// subdivided further (default: 8).
    #[serde(default = "Config::default_leaf_capacity")]
    pub leaf_capacity: usize,

    /// Hard cap on spatial recursion depth. Coincident planes can keep a
    /// through set over capacity forever; once this depth is reached the
    /// region becomes a leaf regardless of occupancy (default: 16).
    #[serde(default = "Config::default_max_depth")]
    pub max_depth: usize,
}

impl Config {
    const fn default_dims() -> usize {
        2
    }

    const fn default_leaf_capacity() -> usize {
        8
    }

    const fn default_max_depth() -> usize {
        16
    }

    /// Number of children each subdivided region produces.
    pub fn fanout(&self) -> usize {
        1 << self.dims
    }

    /// Number of nested index levels beyond the innermost, `2^(dims-1) - 1`.
    /// The query walk uses one witness point per level plus one.
    pub fn levels(&self) -> usize {
        (1 << (self.dims - 1)) - 1
    }

    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_leaf_capacity(mut self, capacity: usize) -> Self {
        self.leaf_capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check every knob is inside its supported range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.dims) {
            return Err(SkylioError::Config(format!(
                "dims must be between 1 and 8, got: {}",
                self.dims
            )));
        }
        if self.leaf_capacity == 0 {
            return Err(SkylioError::Config(
                "leaf_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(SkylioError::Config(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SkylioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| SkylioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dims: Self::default_dims(),
            leaf_capacity: Self::default_leaf_capacity(),
            max_depth: Self::default_max_depth(),
        }
    }
}
