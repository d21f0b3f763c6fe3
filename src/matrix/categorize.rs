//! Version categorization
//!
//! Decides, for one axis, which versions stand for their major line, their
//! minor line and the axis as a whole.

use super::errors::MatrixError;
use super::version::{SemanticVersion, VersionNumber};
use std::collections::{BTreeMap, BTreeSet};

/// Parses, sorts and flags the versions of one axis
///
/// Duplicate inputs collapse into one entry. The result is sorted newest
/// first; that order drives job declaration order downstream.
///
/// # Errors
///
/// Returns [`MatrixError::MalformedVersion`] for the first string that is not
/// `major.minor.patch`, and [`MatrixError::EmptyAxis`] if nothing is left to
/// categorize.
pub fn categorize<I, S>(axis: &str, raw_versions: I) -> Result<Vec<SemanticVersion>, MatrixError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut numbers = BTreeSet::new();
    for raw in raw_versions {
        let raw = raw.as_ref();
        let number = raw
            .parse::<VersionNumber>()
            .map_err(|reason| MatrixError::MalformedVersion {
                axis: axis.to_string(),
                input: raw.to_string(),
                reason,
            })?;
        numbers.insert(number);
    }

    let sorted: Vec<VersionNumber> = numbers.into_iter().rev().collect();
    let Some(&latest) = sorted.first() else {
        return Err(MatrixError::EmptyAxis {
            axis: axis.to_string(),
        });
    };

    let mut by_major: BTreeMap<u64, Vec<VersionNumber>> = BTreeMap::new();
    let mut by_minor: BTreeMap<(u64, u64), Vec<VersionNumber>> = BTreeMap::new();
    for &number in &sorted {
        by_major.entry(number.major).or_default().push(number);
        by_minor
            .entry((number.major, number.minor))
            .or_default()
            .push(number);
    }

    let major_representatives = representatives(by_major.values());
    let minor_representatives = representatives(by_minor.values());

    tracing::debug!(
        axis,
        versions = sorted.len(),
        latest = %latest,
        majors = major_representatives.len(),
        minors = minor_representatives.len(),
        "categorized axis"
    );

    Ok(sorted
        .into_iter()
        .map(|number| {
            SemanticVersion::with_flags(
                number,
                major_representatives.contains(&number),
                minor_representatives.contains(&number),
                number == latest,
            )
        })
        .collect())
}

/// The maximum of each group
fn representatives<'a>(
    groups: impl Iterator<Item = &'a Vec<VersionNumber>>,
) -> BTreeSet<VersionNumber> {
    groups
        .filter_map(|members| members.iter().max().copied())
        .collect()
}
