//! tagmatrix - CI pipelines for a Docker image version matrix
//!
//! ## Commands
//!
//! - `tagmatrix generate` - Render CircleCI and GitHub Actions pipelines
//! - `tagmatrix matrix` - Show every image and its tags
//! - `tagmatrix check` - Validate the versions file
//! - `tagmatrix completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Regenerate both pipelines next to versions.yml
//! tagmatrix generate
//!
//! # Preview the GitHub Actions workflow
//! tagmatrix generate --provider github --stdout
//!
//! # List the images and tags that would be built
//! tagmatrix matrix --format json
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("TAGMATRIX_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
