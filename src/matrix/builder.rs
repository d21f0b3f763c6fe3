//! Matrix construction
//!
//! Pairs every primary-axis version with every secondary-axis version and
//! attaches the job identifier and tag set of each pair.

use super::categorize::categorize;
use super::errors::MatrixError;
use super::tags::{TagPrefixes, generate_tags};
use super::version::SemanticVersion;
use serde::Serialize;

/// Raw version strings for one axis, as read from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAxis {
    /// Axis name used in error messages, e.g. `ruby`
    pub name: String,
    /// Unparsed `major.minor.patch` strings
    pub versions: Vec<String>,
}

impl RawAxis {
    /// Creates a raw axis
    pub fn new<I, S>(name: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }
}

/// One image to build: a version pair with its job name and tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    /// Primary axis version
    pub axis_a: SemanticVersion,
    /// Secondary axis version
    pub axis_b: SemanticVersion,
    /// Provider-neutral job name
    pub job_identifier: String,
    /// Docker tags in emission order
    pub tags: Vec<String>,
}

/// Builds the Cartesian product of two categorized axes
///
/// Iterates `axis_a` in the outer loop and `axis_b` in the inner loop, so
/// the output order is stable for a given input order.
#[must_use]
pub fn build_matrix(
    prefixes: &TagPrefixes,
    axis_a: &[SemanticVersion],
    axis_b: &[SemanticVersion],
) -> Vec<MatrixCell> {
    let mut cells = Vec::with_capacity(axis_a.len() * axis_b.len());

    for a in axis_a {
        for b in axis_b {
            let job_identifier = prefixes.join(&a.full(), &b.full());
            let tags = generate_tags(prefixes, a, b);
            tracing::trace!(job = %job_identifier, tags = tags.len(), "matrix cell");
            cells.push(MatrixCell {
                axis_a: *a,
                axis_b: *b,
                job_identifier,
                tags,
            });
        }
    }

    cells
}

/// Categorizes both axes, then builds the matrix
///
/// Both axes are validated before any cell is built.
///
/// # Errors
///
/// Propagates the first [`MatrixError`] from either axis.
pub fn generate_matrix(
    prefixes: &TagPrefixes,
    axis_a: &RawAxis,
    axis_b: &RawAxis,
) -> Result<Vec<MatrixCell>, MatrixError> {
    let a = categorize(&axis_a.name, &axis_a.versions)?;
    let b = categorize(&axis_b.name, &axis_b.versions)?;
    Ok(build_matrix(prefixes, &a, &b))
}
