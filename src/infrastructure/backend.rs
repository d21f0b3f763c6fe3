//! Pipeline backend abstraction
//!
//! A backend turns the image matrix into one provider's pipeline file.

use crate::matrix::MatrixCell;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Supported CI providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// CircleCI `config.yml`
    CircleCi,
    /// GitHub Actions workflow
    GitHubActions,
}

impl Provider {
    /// Every provider, in generation order
    pub const ALL: [Self; 2] = [Self::CircleCi, Self::GitHubActions];
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircleCi => write!(f, "CircleCI"),
            Self::GitHubActions => write!(f, "GitHub Actions"),
        }
    }
}

/// Errors raised while rendering a pipeline
#[derive(Error, Debug)]
pub enum RenderError {
    /// YAML serialization failed
    #[error("Failed to render {provider} pipeline: {source}")]
    Yaml {
        /// Provider being rendered.
        provider: Provider,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Translates an image matrix into a provider pipeline
pub trait PipelineBackend {
    /// Provider this backend renders for
    fn provider(&self) -> Provider;

    /// Where the rendered file goes, relative to the versions file
    fn default_output(&self) -> &Path;

    /// Renders the pipeline body
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be serialized.
    fn translate(&self, cells: &[MatrixCell]) -> Result<String, RenderError>;

    /// Renders the full file, including the generated-file header
    ///
    /// # Errors
    ///
    /// Same as [`translate`](Self::translate).
    fn render(&self, cells: &[MatrixCell], source: &str) -> Result<String, RenderError> {
        let body = self.translate(cells)?;
        tracing::info!("Rendered {} jobs for {}", cells.len(), self.provider());
        Ok(format!("{}{body}", generated_header(source)))
    }
}

/// Header warning readers not to edit a generated file
#[must_use]
pub fn generated_header(source: &str) -> String {
    format!(
        "# THIS IS A GENERATED FILE. DO NOT EDIT MANUALLY. EDIT {source} & RUN `tagmatrix generate` TO REGENERATE.\n"
    )
}

/// `<image>:<tag>` references for every tag of a cell
pub(crate) fn image_refs(image: &str, cell: &MatrixCell) -> Vec<String> {
    cell.tags.iter().map(|tag| format!("{image}:{tag}")).collect()
}

/// Shell command that writes the Dockerfile for the cell's primary version
pub(crate) fn dockerfile_command(
    docker: &super::config::DockerConfig,
    base_image: &str,
    cell: &MatrixCell,
) -> String {
    format!(
        "sed \"s/{}/{}:{}/\" {} > Dockerfile",
        docker.placeholder,
        base_image.replace('/', "\\/"),
        cell.axis_a.full(),
        shell_words::quote(&docker.template),
    )
}

/// `<build_arg>=<secondary version>`
pub(crate) fn build_arg(docker: &super::config::DockerConfig, cell: &MatrixCell) -> String {
    format!("{}={}", docker.build_arg, cell.axis_b.full())
}
