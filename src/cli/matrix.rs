//! `tagmatrix matrix` - Show the image matrix and its tags

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tagmatrix::{Config, MatrixCell};

/// Loads the versions file and builds its matrix
pub fn load_matrix(config_path: &Path) -> Result<Vec<MatrixCell>> {
    let config = Config::load(config_path)?;
    config
        .matrix()
        .with_context(|| format!("Invalid versions in {}", config_path.display()))
}

/// One line per cell: the job identifier followed by its tags
pub fn format_text(cells: &[MatrixCell]) -> String {
    let width = cells
        .iter()
        .map(|c| c.job_identifier.len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for cell in cells {
        let _ = writeln!(
            output,
            "{:<width$}  {}",
            cell.job_identifier,
            cell.tags.join(" ")
        );
    }
    let _ = write!(output, "{} images", cells.len());
    output
}

/// Cells as pretty-printed JSON
pub fn format_json(cells: &[MatrixCell]) -> Result<String> {
    serde_json::to_string_pretty(cells).context("Failed to serialize matrix")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagmatrix::{RawAxis, TagPrefixes, generate_matrix};

    fn cells() -> Vec<MatrixCell> {
        generate_matrix(
            &TagPrefixes::new("rb", "rs"),
            &RawAxis::new("ruby", ["3.0.0", "2.7.1"]),
            &RawAxis::new("rust", ["1.50.0"]),
        )
        .unwrap()
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&cells());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rb3.0.0-rs1.50.0  rb3.0.0-rs1.50.0 "));
        assert!(lines[0].ends_with(" latest"));
        assert!(lines[1].starts_with("rb2.7.1-rs1.50.0  "));
        assert_eq!(lines[2], "2 images");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&cells()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["job_identifier"], "rb3.0.0-rs1.50.0");
        assert_eq!(value[1]["axis_a"]["minor_representative"], true);
    }
}
