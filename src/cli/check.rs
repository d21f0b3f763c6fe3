//! `tagmatrix check` - Validate a versions file
//!
//! Parses the file, categorizes both axes and reports what would be built
//! without rendering any pipeline.
//!
//! ## Usage
//!
//! ```bash
//! tagmatrix check --config versions.yml
//! # Exit code 0: both axes are valid
//! # Exit code 1: malformed or empty axis
//! ```

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use tagmatrix::infrastructure::config::AxisConfig;
use tagmatrix::{Config, SemanticVersion, categorize};

/// Summary of one validated axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSummary {
    /// Axis name
    pub name: String,
    /// Distinct versions
    pub versions: usize,
    /// Newest version
    pub latest: String,
    /// Versions that receive a `major.minor` tag
    pub minor_lines: Vec<String>,
}

/// Result of checking a versions file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Primary axis
    pub primary: AxisSummary,
    /// Secondary axis
    pub secondary: AxisSummary,
}

impl CheckReport {
    /// Number of images the matrix would build
    pub fn jobs(&self) -> usize {
        self.primary.versions * self.secondary.versions
    }
}

impl fmt::Display for AxisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} versions, latest {}, minor lines [{}]",
            self.name,
            self.versions,
            self.latest,
            self.minor_lines.join(", ")
        )
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.primary)?;
        writeln!(f, "{}", self.secondary)?;
        write!(f, "{} jobs", self.jobs())
    }
}

/// Validates both axes of a versions file
pub fn check_config(config_path: &Path) -> Result<CheckReport> {
    tracing::debug!("Checking versions file: {}", config_path.display());

    let config = Config::load(config_path)?;
    let primary = summarize(&config, &config.axes.primary)
        .with_context(|| format!("Invalid versions in {}", config_path.display()))?;
    let secondary = summarize(&config, &config.axes.secondary)
        .with_context(|| format!("Invalid versions in {}", config_path.display()))?;

    tracing::info!("Versions file is valid: {}", config_path.display());
    Ok(CheckReport { primary, secondary })
}

fn summarize(config: &Config, axis: &AxisConfig) -> Result<AxisSummary> {
    let raw = config.raw_axis(axis);
    let versions = categorize(&raw.name, &raw.versions)?;

    let latest = versions
        .iter()
        .find(|v| v.is_latest())
        .map(SemanticVersion::full)
        .unwrap_or_default();
    let minor_lines = versions
        .iter()
        .filter(|v| v.is_minor_representative())
        .map(SemanticVersion::major_minor)
        .collect();

    Ok(AxisSummary {
        name: raw.name,
        versions: versions.len(),
        latest,
        minor_lines,
    })
}
