//! Semantic version model
//!
//! [`VersionNumber`] is the bare `major.minor.patch` triple. Its derived
//! ordering compares fields in declaration order, which is exactly the
//! numeric tuple ordering used everywhere in this crate.
//! [`SemanticVersion`] pairs a number with the tagging flags assigned by
//! [`categorize`](super::categorize).

#![allow(clippy::must_use_candidate)]

use super::errors::VersionParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("version pattern is valid")
});

/// A `major.minor.patch` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionNumber {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

impl VersionNumber {
    /// Creates a version number from its components
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// `major.minor`
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionNumber {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_PATTERN
            .captures(s)
            .ok_or(VersionParseError::InvalidFormat)?;

        let component = |i: usize| -> Result<u64, VersionParseError> {
            let raw = &caps[i];
            raw.parse().map_err(|_| VersionParseError::OutOfRange {
                component: raw.to_string(),
            })
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version on one matrix axis together with its tagging flags
///
/// Only [`categorize`](super::categorize) sets the flags; they cannot be
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SemanticVersion {
    #[serde(flatten)]
    number: VersionNumber,
    major_representative: bool,
    minor_representative: bool,
    latest: bool,
}

impl SemanticVersion {
    pub(super) const fn with_flags(
        number: VersionNumber,
        major_representative: bool,
        minor_representative: bool,
        latest: bool,
    ) -> Self {
        Self {
            number,
            major_representative,
            minor_representative,
            latest,
        }
    }

    /// The underlying triple
    pub const fn number(&self) -> VersionNumber {
        self.number
    }

    /// Major component
    pub const fn major(&self) -> u64 {
        self.number.major
    }

    /// Minor component
    pub const fn minor(&self) -> u64 {
        self.number.minor
    }

    /// Patch component
    pub const fn patch(&self) -> u64 {
        self.number.patch
    }

    /// `major.minor.patch`
    pub fn full(&self) -> String {
        self.number.to_string()
    }

    /// `major.minor`
    pub fn major_minor(&self) -> String {
        self.number.major_minor()
    }

    /// Newest version of its major line
    pub const fn is_major_representative(&self) -> bool {
        self.major_representative
    }

    /// Newest version of its `major.minor` line
    pub const fn is_minor_representative(&self) -> bool {
        self.minor_representative
    }

    /// Every version stands for its own exact patch
    pub const fn is_patch_representative(&self) -> bool {
        true
    }

    /// Newest version on the whole axis
    pub const fn is_latest(&self) -> bool {
        self.latest
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.number, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_version() {
        let v: VersionNumber = "2.7.1".parse().unwrap();
        assert_eq!(v, VersionNumber::new(2, 7, 1));
        assert_eq!(v.to_string(), "2.7.1");
        assert_eq!(v.major_minor(), "2.7");
    }

    #[test]
    fn test_parse_leading_zeros_are_numeric() {
        let v: VersionNumber = "01.050.0".parse().unwrap();
        assert_eq!(v, VersionNumber::new(1, 50, 0));
    }

    #[test]
    fn test_parse_rejects_wrong_component_count() {
        assert_eq!(
            "1.2".parse::<VersionNumber>(),
            Err(VersionParseError::InvalidFormat)
        );
        assert_eq!(
            "1.2.3.4".parse::<VersionNumber>(),
            Err(VersionParseError::InvalidFormat)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in ["a.b.c", "1.2.x", "v1.2.3", "1.2.3-rc1", "+1.2.3", " 1.2.3", ""] {
            assert_eq!(
                input.parse::<VersionNumber>(),
                Err(VersionParseError::InvalidFormat),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = "99999999999999999999.0.0".parse::<VersionNumber>().unwrap_err();
        assert!(matches!(err, VersionParseError::OutOfRange { .. }));
    }

    #[test]
    fn test_ordering_is_numeric_not_lexicographic() {
        let a: VersionNumber = "1.10.0".parse().unwrap();
        let b: VersionNumber = "1.9.9".parse().unwrap();
        assert!(a > b);
        assert!(VersionNumber::new(2, 0, 0) > VersionNumber::new(1, 99, 99));
    }

    #[test]
    fn test_semantic_version_accessors() {
        let v = SemanticVersion::with_flags(VersionNumber::new(3, 0, 1), true, false, false);
        assert_eq!(v.full(), "3.0.1");
        assert_eq!(v.major_minor(), "3.0");
        assert_eq!((v.major(), v.minor(), v.patch()), (3, 0, 1));
        assert!(v.is_major_representative());
        assert!(!v.is_minor_representative());
        assert!(v.is_patch_representative());
        assert!(!v.is_latest());
    }
}
