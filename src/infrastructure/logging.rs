//! Logging configuration
//!
//! Initializes tracing for the application. Logs go to stderr so generated
//! YAML can be piped from stdout.

/// Initializes logging with the specified level
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is
/// harmless; later calls keep the first subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging("debug");
        init_logging("info");
    }
}
