//! Version matrix domain
//!
//! Turns two flat version lists into the set of images to build:
//! [`categorize`] flags representative versions per axis, [`generate_tags`]
//! derives the Docker tags of one version pair and [`build_matrix`] walks
//! the Cartesian product of both axes.

pub mod builder;
pub mod categorize;
pub mod errors;
pub mod tags;
pub mod version;


pub use builder::{MatrixCell, RawAxis, build_matrix, generate_matrix};
pub use categorize::categorize;
pub use errors::{MatrixError, VersionParseError};
pub use tags::{LATEST_TAG, TagPrefixes, generate_tags};
pub use version::{SemanticVersion, VersionNumber};
