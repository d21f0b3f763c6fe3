//! Configuration management
//!
//! Everything is read from a single `versions.yml`. Only the `versions`
//! section is required; generator settings fall back to defaults.

use crate::matrix::{MatrixCell, MatrixError, RawAxis, TagPrefixes, generate_matrix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default name of the versions file
pub const DEFAULT_CONFIG_FILE: &str = "versions.yml";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`]
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version lists keyed by axis name
    pub versions: BTreeMap<String, Vec<String>>,
    /// Image repository the tags are attached to
    pub image: String,
    /// Branch that triggers the build
    pub branch: String,
    /// Axis names and tag prefixes
    pub axes: AxesConfig,
    /// Dockerfile generation settings
    pub docker: DockerConfig,
    /// CircleCI specific settings
    pub circleci: CircleCiConfig,
    /// GitHub Actions specific settings
    pub github: GitHubConfig,
}

/// The two matrix axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Outer axis; selects the base image
    pub primary: AxisConfig,
    /// Inner axis; passed as a build argument
    pub secondary: AxisConfig,
}

/// One axis: where its versions live and how its tags are prefixed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Key under `versions`
    pub key: String,
    /// Tag prefix
    pub prefix: String,
}

/// How the Dockerfile is produced and parameterized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Template file containing the base image placeholder
    pub template: String,
    /// Placeholder replaced by the base image reference
    pub placeholder: String,
    /// Build argument receiving the secondary axis version
    pub build_arg: String,
}

/// CircleCI settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleCiConfig {
    /// Image the build job itself runs in
    pub executor_image: String,
    /// Base image substituted into the Dockerfile template
    pub base_image: String,
    /// Output path, relative to the versions file
    pub output: PathBuf,
}

/// GitHub Actions settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base image substituted into the Dockerfile template
    pub base_image: String,
    /// Runner label
    pub runs_on: String,
    /// Output path, relative to the versions file
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            versions: BTreeMap::new(),
            image: "anirbanmu/circleci-ruby-rust".to_string(),
            branch: "master".to_string(),
            axes: AxesConfig::default(),
            docker: DockerConfig::default(),
            circleci: CircleCiConfig::default(),
            github: GitHubConfig::default(),
        }
    }
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            primary: AxisConfig {
                key: "ruby".to_string(),
                prefix: "rb".to_string(),
            },
            secondary: AxisConfig {
                key: "rust".to_string(),
                prefix: "rs".to_string(),
            },
        }
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            template: "Dockerfile.template".to_string(),
            placeholder: "REPLACE_ME_WITH_RIGHT_CIRCLE_IMAGE".to_string(),
            build_arg: "rust_version".to_string(),
        }
    }
}

impl Default for CircleCiConfig {
    fn default() -> Self {
        Self {
            executor_image: "circleci/buildpack-deps".to_string(),
            base_image: "circleci/ruby".to_string(),
            output: PathBuf::from(".circleci/config.yml"),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_image: "cimg/ruby".to_string(),
            runs_on: "ubuntu-latest".to_string(),
            output: PathBuf::from(".github/workflows/docker-hub.yml"),
        }
    }
}

impl Config {
    /// Reads and parses a versions file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parses configuration from YAML text
    ///
    /// # Errors
    ///
    /// Fails if the text is not valid YAML for [`Config`].
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Raw versions of one axis; a missing key yields an empty axis
    #[must_use]
    pub fn raw_axis(&self, axis: &AxisConfig) -> RawAxis {
        let versions = self.versions.get(&axis.key).cloned().unwrap_or_else(|| {
            tracing::warn!("No versions listed for axis '{}'", axis.key);
            Vec::new()
        });
        RawAxis::new(axis.key.clone(), versions)
    }

    /// Tag prefixes of both axes
    #[must_use]
    pub fn tag_prefixes(&self) -> TagPrefixes {
        TagPrefixes::new(&self.axes.primary.prefix, &self.axes.secondary.prefix)
    }

    /// Categorizes both axes and builds the image matrix
    ///
    /// # Errors
    ///
    /// Propagates malformed or empty axes.
    pub fn matrix(&self) -> Result<Vec<MatrixCell>, MatrixError> {
        generate_matrix(
            &self.tag_prefixes(),
            &self.raw_axis(&self.axes.primary),
            &self.raw_axis(&self.axes.secondary),
        )
    }
}
