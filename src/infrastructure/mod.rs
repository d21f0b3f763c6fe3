//! Infrastructure layer
//!
//! Configuration loading, logging and the CI provider backends.

mod backend;
mod circleci;
pub mod config;
mod github_actions;
mod logging;

pub use backend::{PipelineBackend, Provider, RenderError, generated_header};
pub use circleci::CircleCIBackend;
pub use config::{Config, ConfigError, DEFAULT_CONFIG_FILE};
pub use github_actions::GitHubActionsBackend;
pub use logging::init_logging;

/// Backend rendering `provider` with the given configuration
#[must_use]
pub fn backend_for(provider: Provider, config: &Config) -> Box<dyn PipelineBackend> {
    match provider {
        Provider::CircleCi => Box::new(CircleCIBackend::new(config)),
        Provider::GitHubActions => Box::new(GitHubActionsBackend::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_backend_for_each_provider() {
        let config = Config::default();
        for provider in Provider::ALL {
            let backend = backend_for(provider, &config);
            assert_eq!(backend.provider(), provider);
        }
        assert_eq!(
            backend_for(Provider::GitHubActions, &config).default_output(),
            Path::new(".github/workflows/docker-hub.yml")
        );
    }
}
