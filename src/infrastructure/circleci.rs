//! CircleCI backend
//!
//! Renders the image matrix as a CircleCI 2.0 `config.yml`: one job per
//! cell plus a workflow that runs every job on the configured branch.

use super::backend::{
    PipelineBackend, Provider, RenderError, build_arg, dockerfile_command, image_refs,
};
use super::config::Config;
use crate::matrix::MatrixCell;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Backend for generating CircleCI configuration
pub struct CircleCIBackend {
    config: Config,
}

#[derive(Serialize)]
struct CircleConfig {
    version: u8,
    jobs: Mapping,
    workflows: Mapping,
}

#[derive(Serialize)]
struct Job {
    docker: Vec<DockerImage>,
    steps: Vec<JobStep>,
}

#[derive(Serialize)]
struct DockerImage {
    image: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JobStep {
    Builtin(&'static str),
    Run { run: RunStep },
}

#[derive(Serialize)]
struct RunStep {
    name: &'static str,
    command: String,
}

impl CircleCIBackend {
    /// Creates a backend for the given configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn job(&self, cell: &MatrixCell) -> Job {
        let refs = image_refs(&self.config.image, cell);

        let mut build = vec!["docker".to_string(), "build".to_string()];
        for image_ref in &refs {
            build.push("-t".to_string());
            build.push(image_ref.clone());
        }
        build.push("--build-arg".to_string());
        build.push(build_arg(&self.config.docker, cell));
        build.push(".".to_string());

        let build_command = [
            dockerfile_command(&self.config.docker, &self.config.circleci.base_image, cell),
            shell_words::join(build),
        ]
        .join("\n");

        let publish_command = std::iter::once(
            "echo \"$DOCKERHUB_ACCESS_TOKEN\" | docker login -u \"$DOCKERHUB_USERNAME\" --password-stdin"
                .to_string(),
        )
        .chain(refs.iter().map(|r| shell_words::join(["docker", "push", r.as_str()])))
        .collect::<Vec<_>>()
        .join("\n");

        Job {
            docker: vec![DockerImage {
                image: self.config.circleci.executor_image.clone(),
            }],
            steps: vec![
                JobStep::Builtin("checkout"),
                JobStep::Builtin("setup_remote_docker"),
                JobStep::Run {
                    run: RunStep {
                        name: "Build Docker image",
                        command: build_command,
                    },
                },
                JobStep::Run {
                    run: RunStep {
                        name: "Publish Docker image to Docker Hub",
                        command: publish_command,
                    },
                },
            ],
        }
    }

    /// `version: 2` plus a `build-<branch>` workflow listing every job
    fn workflows(&self, cells: &[MatrixCell]) -> Mapping {
        let branch = &self.config.branch;

        let jobs: Vec<Value> = cells
            .iter()
            .map(|cell| {
                let mut only = Mapping::new();
                only.insert("only".into(), branch.as_str().into());
                let mut branches = Mapping::new();
                branches.insert("branches".into(), Value::Mapping(only));
                let mut filters = Mapping::new();
                filters.insert("filters".into(), Value::Mapping(branches));
                let mut entry = Mapping::new();
                entry.insert(cell.job_identifier.as_str().into(), Value::Mapping(filters));
                Value::Mapping(entry)
            })
            .collect();

        let mut workflow = Mapping::new();
        workflow.insert("jobs".into(), Value::Sequence(jobs));

        let mut workflows = Mapping::new();
        workflows.insert("version".into(), 2.into());
        workflows.insert(format!("build-{branch}").into(), Value::Mapping(workflow));
        workflows
    }
}

impl PipelineBackend for CircleCIBackend {
    fn provider(&self) -> Provider {
        Provider::CircleCi
    }

    fn default_output(&self) -> &Path {
        &self.config.circleci.output
    }

    fn translate(&self, cells: &[MatrixCell]) -> Result<String, RenderError> {
        let yaml_err = |source| RenderError::Yaml {
            provider: Provider::CircleCi,
            source,
        };

        let mut jobs = Mapping::new();
        for cell in cells {
            let job = serde_yaml::to_value(self.job(cell)).map_err(yaml_err)?;
            jobs.insert(cell.job_identifier.as_str().into(), job);
        }

        let document = CircleConfig {
            version: 2,
            jobs,
            workflows: self.workflows(cells),
        };

        serde_yaml::to_string(&document).map_err(yaml_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> Config {
        Config::from_yaml(
            r#"
versions:
  ruby: ["2.7.0", "2.7.1", "3.0.0"]
  rust: ["1.50.0"]
"#,
        )
        .unwrap()
    }

    fn render(config: &Config) -> Value {
        let cells = config.matrix().unwrap();
        let yaml = CircleCIBackend::new(config).translate(&cells).unwrap();
        serde_yaml::from_str(&yaml).unwrap()
    }

    #[test]
    fn test_config_has_version_and_jobs_in_matrix_order() {
        let doc = render(&config());
        assert_eq!(doc["version"], Value::from(2));

        let names: Vec<&str> = doc["jobs"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["rb3.0.0-rs1.50.0", "rb2.7.1-rs1.50.0", "rb2.7.0-rs1.50.0"]
        );
    }

    #[test]
    fn test_job_steps() {
        let doc = render(&config());
        let job = &doc["jobs"]["rb3.0.0-rs1.50.0"];

        assert_eq!(job["docker"][0]["image"], Value::from("circleci/buildpack-deps"));
        assert_eq!(job["steps"][0], Value::from("checkout"));
        assert_eq!(job["steps"][1], Value::from("setup_remote_docker"));
        assert_eq!(job["steps"][2]["run"]["name"], Value::from("Build Docker image"));
        assert_eq!(
            job["steps"][3]["run"]["name"],
            Value::from("Publish Docker image to Docker Hub")
        );
    }

    #[test]
    fn test_build_command_tags_every_image() {
        let doc = render(&config());
        let command = doc["jobs"]["rb3.0.0-rs1.50.0"]["steps"][2]["run"]["command"]
            .as_str()
            .unwrap()
            .to_string();

        let lines: Vec<&str> = command.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("sed \"s/REPLACE_ME_WITH_RIGHT_CIRCLE_IMAGE/circleci\\/ruby:3.0.0/\""));
        assert!(lines[1].starts_with("docker build -t anirbanmu/circleci-ruby-rust:rb3.0.0-rs1.50.0"));
        assert!(lines[1].contains("-t anirbanmu/circleci-ruby-rust:latest"));
        assert!(lines[1].contains("rust_version=1.50.0"));
        assert!(lines[1].ends_with(" ."));
        assert_eq!(lines[1].matches(" -t ").count(), 5);
    }

    #[test]
    fn test_publish_command_pushes_every_tag() {
        let doc = render(&config());
        let command = doc["jobs"]["rb2.7.0-rs1.50.0"]["steps"][3]["run"]["command"]
            .as_str()
            .unwrap()
            .to_string();

        let lines: Vec<&str> = command.lines().collect();
        assert!(lines[0].contains("docker login"));
        assert_eq!(
            &lines[1..],
            &[
                "docker push anirbanmu/circleci-ruby-rust:rb2.7.0-rs1.50.0",
                "docker push anirbanmu/circleci-ruby-rust:rb2.7.0-rs1.50",
            ]
        );
    }

    #[test]
    fn test_workflow_filters_branch() {
        let mut config = config();
        config.branch = "main".to_string();
        let doc = render(&config);

        let workflows = &doc["workflows"];
        assert_eq!(workflows["version"], Value::from(2));
        let jobs = workflows["build-main"]["jobs"].as_sequence().unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(
            jobs[0]["rb3.0.0-rs1.50.0"]["filters"]["branches"]["only"],
            Value::from("main")
        );
    }

    #[test]
    fn test_render_prepends_header() {
        let config = config();
        let cells = config.matrix().unwrap();
        let output = CircleCIBackend::new(&config).render(&cells, "versions.yml").unwrap();
        assert!(output.starts_with("# THIS IS A GENERATED FILE."));
        assert!(output.contains("\nversion: 2\n"));
    }
}
