//! Prelude module for common imports

pub use crate::matrix::{
    LATEST_TAG, MatrixCell, MatrixError, RawAxis, SemanticVersion, TagPrefixes, VersionNumber,
    build_matrix, categorize, generate_matrix, generate_tags,
};

pub use crate::infrastructure::{Config, PipelineBackend, Provider, backend_for};
