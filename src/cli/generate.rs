//! `tagmatrix generate` - Render CI pipelines for the image matrix
//!
//! Every selected provider is rendered before anything is written, so a
//! failure never leaves a mix of fresh and stale pipeline files behind.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tagmatrix::{Config, Provider, backend_for};

/// A rendered pipeline file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPipeline {
    /// Provider the file belongs to
    pub provider: Provider,
    /// Destination path
    pub path: PathBuf,
    /// Full file content, header included
    pub content: String,
}

/// Loads the versions file and renders each provider's pipeline
pub fn render_pipelines(
    config_path: &Path,
    providers: &[Provider],
) -> Result<Vec<RenderedPipeline>> {
    let config = Config::load(config_path)?;
    let cells = config
        .matrix()
        .with_context(|| format!("Invalid versions in {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    let source = config_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(tagmatrix::infrastructure::DEFAULT_CONFIG_FILE);

    providers
        .iter()
        .map(|&provider| -> Result<RenderedPipeline> {
            let backend = backend_for(provider, &config);
            let content = backend.render(&cells, source)?;
            Ok(RenderedPipeline {
                provider,
                path: base_dir.join(backend.default_output()),
                content,
            })
        })
        .collect()
}

/// Writes rendered pipelines, creating parent directories as needed
pub fn write_pipelines(outputs: &[RenderedPipeline]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(outputs.len());

    for output in outputs {
        if let Some(parent) = output.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&output.path, &output.content).with_context(|| {
            format!(
                "Failed to write {} pipeline to: {}",
                output.provider,
                output.path.display()
            )
        })?;
        tracing::info!("Wrote {} pipeline to {}", output.provider, output.path.display());
        written.push(output.path.clone());
    }

    Ok(written)
}
