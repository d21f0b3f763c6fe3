//! Docker tag derivation for a single matrix cell

use super::version::SemanticVersion;
use serde::{Deserialize, Serialize};

/// Tag emitted when both axes are at their newest version
pub const LATEST_TAG: &str = "latest";

/// Per-axis prefixes used in tags and job identifiers, e.g. `rb` and `rs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPrefixes {
    /// Prefix for the primary (outer) axis
    pub primary: String,
    /// Prefix for the secondary (inner) axis
    pub secondary: String,
}

impl TagPrefixes {
    /// Creates a prefix pair
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// `<primary><a>-<secondary><b>`
    #[must_use]
    pub fn join(&self, a: &str, b: &str) -> String {
        format!("{}{a}-{}{b}", self.primary, self.secondary)
    }
}

/// Computes the ordered tag list for the `(a, b)` cell
///
/// The order is fixed: full, primary truncated, secondary truncated, both
/// truncated, then `latest`. Duplicates are kept.
#[must_use]
pub fn generate_tags(
    prefixes: &TagPrefixes,
    a: &SemanticVersion,
    b: &SemanticVersion,
) -> Vec<String> {
    let mut tags = vec![prefixes.join(&a.full(), &b.full())];

    if a.is_minor_representative() {
        tags.push(prefixes.join(&a.major_minor(), &b.full()));
    }
    if b.is_minor_representative() {
        tags.push(prefixes.join(&a.full(), &b.major_minor()));
    }
    if a.is_minor_representative() && b.is_minor_representative() {
        tags.push(prefixes.join(&a.major_minor(), &b.major_minor()));
    }
    if a.is_latest() && b.is_latest() {
        tags.push(LATEST_TAG.to_string());
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::categorize;
    use crate::matrix::version::VersionNumber;
    use pretty_assertions::assert_eq;

    fn prefixes() -> TagPrefixes {
        TagPrefixes::new("prefA", "prefB")
    }

    fn find(versions: &[SemanticVersion], full: &str) -> SemanticVersion {
        *versions.iter().find(|v| v.full() == full).unwrap()
    }

    #[test]
    fn test_tags_for_latest_cell() {
        let a = categorize("a", ["2.7.0", "2.7.1", "3.0.0"]).unwrap();
        let b = categorize("b", ["1.50.0"]).unwrap();

        let tags = generate_tags(&prefixes(), &find(&a, "3.0.0"), &b[0]);
        assert_eq!(
            tags,
            vec![
                "prefA3.0.0-prefB1.50.0",
                "prefA3.0-prefB1.50.0",
                "prefA3.0.0-prefB1.50",
                "prefA3.0-prefB1.50",
                "latest",
            ]
        );
    }

    #[test]
    fn test_tags_for_plain_patch_version() {
        let a = categorize("a", ["2.7.0", "2.7.1", "3.0.0"]).unwrap();
        let b = categorize("b", ["1.50.0"]).unwrap();

        let tags = generate_tags(&prefixes(), &find(&a, "2.7.0"), &b[0]);
        assert_eq!(tags, vec!["prefA2.7.0-prefB1.50.0", "prefA2.7.0-prefB1.50"]);
    }

    #[test]
    fn test_tags_for_minor_representative_without_latest() {
        let a = categorize("a", ["2.7.0", "2.7.1", "3.0.0"]).unwrap();
        let b = categorize("b", ["1.50.0"]).unwrap();

        let tags = generate_tags(&prefixes(), &find(&a, "2.7.1"), &b[0]);
        assert_eq!(
            tags,
            vec![
                "prefA2.7.1-prefB1.50.0",
                "prefA2.7-prefB1.50.0",
                "prefA2.7.1-prefB1.50",
                "prefA2.7-prefB1.50",
            ]
        );
    }

    #[test]
    fn test_latest_requires_both_axes() {
        let a = categorize("a", ["3.0.0"]).unwrap();
        let b = categorize("b", ["1.50.0", "1.49.0"]).unwrap();

        let newest = generate_tags(&prefixes(), &a[0], &find(&b, "1.50.0"));
        let older = generate_tags(&prefixes(), &a[0], &find(&b, "1.49.0"));

        assert_eq!(newest.last().map(String::as_str), Some(LATEST_TAG));
        assert!(!older.contains(&LATEST_TAG.to_string()));
    }

    #[test]
    fn test_tags_follow_flags_only() {
        let a = SemanticVersion::with_flags(VersionNumber::new(1, 0, 0), false, false, false);
        let b = SemanticVersion::with_flags(VersionNumber::new(2, 0, 0), false, false, false);
        let tags = generate_tags(&TagPrefixes::new("", ""), &a, &b);
        assert_eq!(tags, vec!["1.0.0-2.0.0"]);

        let prefixes = TagPrefixes::new("x", "y");
        let a = SemanticVersion::with_flags(VersionNumber::new(1, 0, 0), true, true, false);
        let tags = generate_tags(&prefixes, &a, &b);
        assert_eq!(tags, vec!["x1.0.0-y2.0.0", "x1.0-y2.0.0"]);
    }

    #[test]
    fn test_prefix_join() {
        assert_eq!(TagPrefixes::new("rb", "rs").join("3.0", "1.50.0"), "rb3.0-rs1.50.0");
    }
}
