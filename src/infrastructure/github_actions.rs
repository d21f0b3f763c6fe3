//! GitHub Actions backend
//!
//! Renders the image matrix as a GitHub Actions workflow with one job per
//! cell, built and pushed through the Docker buildx actions.

use super::backend::{
    PipelineBackend, Provider, RenderError, build_arg, dockerfile_command, image_refs,
};
use super::config::Config;
use crate::matrix::MatrixCell;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Backend for generating GitHub Actions workflows
pub struct GitHubActionsBackend {
    config: Config,
}

#[derive(Serialize)]
struct Workflow {
    name: &'static str,
    on: Trigger,
    jobs: Mapping,
}

#[derive(Serialize)]
struct Trigger {
    push: PushTrigger,
}

#[derive(Serialize)]
struct PushTrigger {
    branches: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Job {
    runs_on: String,
    concurrency: String,
    steps: Vec<Step>,
}

#[derive(Serialize, Default)]
struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uses: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    with: Option<Mapping>,
}

impl Step {
    fn uses(action: &'static str) -> Self {
        Self {
            uses: Some(action),
            ..Self::default()
        }
    }

    fn with(mut self, entries: Vec<(&str, Value)>) -> Self {
        let mut with = Mapping::new();
        for (key, value) in entries {
            with.insert(key.into(), value);
        }
        self.with = Some(with);
        self
    }
}

impl GitHubActionsBackend {
    /// Creates a backend for the given configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn job(&self, cell: &MatrixCell) -> Job {
        let tags = image_refs(&self.config.image, cell).join(",");

        Job {
            runs_on: self.config.github.runs_on.clone(),
            concurrency: format!(
                "{}-{}-concurrency-group",
                self.config.axes.primary.key,
                cell.axis_a.full()
            ),
            steps: vec![
                Step::uses("actions/checkout@v3"),
                Step::uses("docker/setup-qemu-action@v2"),
                Step::uses("docker/setup-buildx-action@v2"),
                Step::uses("docker/login-action@v2").with(vec![
                    ("username", "${{ secrets.DOCKERHUB_USERNAME }}".into()),
                    ("password", "${{ secrets.DOCKERHUB_TOKEN }}".into()),
                ]),
                Step {
                    name: Some("Generate dockerfile".to_string()),
                    run: Some(dockerfile_command(
                        &self.config.docker,
                        &self.config.github.base_image,
                        cell,
                    )),
                    ..Step::default()
                },
                Step::uses("docker/build-push-action@v3").with(vec![
                    ("context", ".".into()),
                    ("push", true.into()),
                    ("tags", tags.into()),
                    ("build-args", build_arg(&self.config.docker, cell).into()),
                ]),
            ],
        }
    }
}

impl PipelineBackend for GitHubActionsBackend {
    fn provider(&self) -> Provider {
        Provider::GitHubActions
    }

    fn default_output(&self) -> &Path {
        &self.config.github.output
    }

    fn translate(&self, cells: &[MatrixCell]) -> Result<String, RenderError> {
        let yaml_err = |source| RenderError::Yaml {
            provider: Provider::GitHubActions,
            source,
        };

        let mut jobs = Mapping::new();
        for cell in cells {
            let job = serde_yaml::to_value(self.job(cell)).map_err(yaml_err)?;
            jobs.insert(sanitize_job_name(&cell.job_identifier).into(), job);
        }

        let workflow = Workflow {
            name: "build",
            on: Trigger {
                push: PushTrigger {
                    branches: vec![self.config.branch.clone()],
                },
            },
            jobs,
        };

        serde_yaml::to_string(&workflow).map_err(yaml_err)
    }
}

/// Job ids may not contain dots
fn sanitize_job_name(name: &str) -> String {
    name.replace('.', "_")
}
