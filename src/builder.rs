//! Index builder for flexible configuration
//!
//! This module provides a builder pattern for assembling an index from a
//! configuration, a space, and planes added one at a time or in bulk.

use crate::error::{Result, SkylioError};
use crate::geometry::HyperBox;
use crate::index::SkylineIndex;
use crate::plane::HyperPlane;
use crate::types::Config;

/// Builder for a [`SkylineIndex`].
///
/// # Example
///
/// ```rust
/// use skylio::{Config, HyperBox, HyperPlane, IndexBuilder};
///
/// let index = IndexBuilder::new()
///     .config(Config::default().with_leaf_capacity(4))
///     .space(HyperBox::cube(2, 0.0, 1.0))
///     .plane(HyperPlane::new(0, 0, 1, vec![0.0], 0.5))
///     .build()?;
/// assert_eq!(index.planes().len(), 1);
/// # Ok::<(), skylio::SkylioError>(())
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: Config,
    space: Option<HyperBox>,
    planes: Vec<HyperPlane>,
}

impl IndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the index configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the full dual space the index covers.
    pub fn space(mut self, space: HyperBox) -> Self {
        self.space = Some(space);
        self
    }

    /// Add one plane.
    pub fn plane(mut self, plane: HyperPlane) -> Self {
        self.planes.push(plane);
        self
    }

    /// Add a batch of planes, preserving order.
    pub fn planes<I: IntoIterator<Item = HyperPlane>>(mut self, planes: I) -> Self {
        self.planes.extend(planes);
        self
    }

    /// Build the index. Validates the configuration and every input
    /// eagerly.
    pub fn build(self) -> Result<SkylineIndex> {
        let space = self.space.ok_or_else(|| {
            SkylioError::InvalidInput("no space configured for the index".to_string())
        })?;
        SkylineIndex::build(self.planes, space, &self.config)
    }
}
