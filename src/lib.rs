//! Embedded probabilistic skyline query engine over uncertain data in dual space.
//!
//! ```rust
//! use skylio::{Config, HyperBox, HyperPlane, SkylineIndex};
//!
//! let space = HyperBox::cube(2, 0.0, 1.0);
//! let planes = vec![HyperPlane::new(0, 0, 1, vec![0.0], 0.5)];
//!
//! let index = SkylineIndex::build(planes, space.clone(), &Config::default())?;
//! let probabilities = index.query(&space)?;
//! assert_eq!(probabilities[&0], 1.0);
//! # Ok::<(), skylio::SkylioError>(())
//! ```

pub mod builder;
pub mod error;
pub mod geometry;
pub mod index;
pub mod plane;
pub mod types;
pub mod validation;

pub use builder::IndexBuilder;
pub use error::{Result, SkylioError};
pub use geometry::{HyperBox, Point};
pub use index::{IndexStats, SkylineIndex};
pub use plane::HyperPlane;
pub use types::{Config, InstanceId, ObjectId};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, HyperBox, HyperPlane, IndexBuilder, Result, SkylineIndex, SkylioError};

    pub use crate::{InstanceId, ObjectId};
}
