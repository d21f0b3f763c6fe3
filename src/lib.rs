//! # tagmatrix - Docker image matrix pipelines from a version list
//!
//! tagmatrix reads two version lists (for example Ruby and Rust releases)
//! and generates CI pipelines that build one Docker image per version pair.
//! Each image receives the tags it represents: its exact versions, the
//! `major.minor` lines it is the newest of, and `latest` for the newest
//! pair overall.
//!
//! ## Quick Start
//!
//! ```
//! use tagmatrix::prelude::*;
//!
//! let ruby = categorize("ruby", ["2.7.1", "3.0.0"])?;
//! let rust = categorize("rust", ["1.50.0"])?;
//! let cells = build_matrix(&TagPrefixes::new("rb", "rs"), &ruby, &rust);
//!
//! assert_eq!(cells[0].job_identifier, "rb3.0.0-rs1.50.0");
//! assert_eq!(cells[0].tags.last().map(String::as_str), Some("latest"));
//! # Ok::<(), tagmatrix::matrix::MatrixError>(())
//! ```
//!
//! ## Features
//!
//! - **Version categorization**: numeric ordering, major/minor representatives
//! - **Tag derivation**: full, truncated and `latest` tags per image
//! - **Backends**: CircleCI and GitHub Actions
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod infrastructure;
pub mod matrix;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use infrastructure::{
    CircleCIBackend, Config, ConfigError, GitHubActionsBackend, PipelineBackend, Provider,
    RenderError, backend_for, init_logging,
};
pub use matrix::{
    MatrixCell, MatrixError, RawAxis, SemanticVersion, TagPrefixes, VersionNumber, build_matrix,
    categorize, generate_matrix, generate_tags,
};

/// Version of the tagmatrix crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
