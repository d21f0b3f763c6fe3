//! Error types for the version matrix domain

use thiserror::Error;

/// Errors that abort matrix generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A version string on an axis could not be parsed
    #[error("Malformed version '{input}' on axis '{axis}': {reason}")]
    MalformedVersion {
        /// Axis the version was listed under.
        axis: String,
        /// The raw version string.
        input: String,
        /// Why parsing failed.
        reason: VersionParseError,
    },

    /// An axis has no versions at all
    #[error("Axis '{axis}' has no versions")]
    EmptyAxis {
        /// Name of the empty axis.
        axis: String,
    },
}

/// Reasons a `major.minor.patch` string is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// Not three dot-separated runs of ASCII digits
    #[error("expected <major>.<minor>.<patch> with non-negative integers")]
    InvalidFormat,

    /// A component does not fit in 64 bits
    #[error("component '{component}' is out of range")]
    OutOfRange {
        /// The offending component.
        component: String,
    },
}
