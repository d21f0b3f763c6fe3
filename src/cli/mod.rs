//! CLI for tagmatrix
//!
//! - `generate`: Render CI pipelines for the image matrix
//! - `matrix`: Show the image matrix and its tags
//! - `check`: Validate a versions file
//! - `completions`: Generate shell completions

pub mod check;
pub mod completions;
pub mod generate;
pub mod matrix;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tagmatrix::{Provider, init_logging, infrastructure::DEFAULT_CONFIG_FILE};

/// CLI arguments for tagmatrix
#[derive(Parser, Debug)]
#[command(name = "tagmatrix")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render CI pipelines for every version pair
    Generate {
        /// Versions file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// CI provider to render
        #[arg(short, long, value_enum, default_value_t = ProviderArg::All)]
        provider: ProviderArg,
        /// Print to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Show the image matrix and its tags
    Matrix {
        /// Versions file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<MatrixFormatArg>,
    },

    /// Validate a versions file
    Check {
        /// Versions file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    Circleci,
    Github,
    All,
}

impl ProviderArg {
    fn providers(self) -> Vec<Provider> {
        match self {
            Self::Circleci => vec![Provider::CircleCi],
            Self::Github => vec![Provider::GitHubActions],
            Self::All => Provider::ALL.to_vec(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MatrixFormatArg {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    if std::env::var("TAGMATRIX_DEBUG").is_ok() {
        init_logging("debug");
    } else {
        init_logging(&args.log_level);
    }

    match args.command {
        Command::Generate {
            config,
            provider,
            stdout,
        } => {
            let outputs = generate::render_pipelines(&config, &provider.providers())?;

            if stdout {
                for output in &outputs {
                    print!("{}", output.content);
                }
            } else {
                for path in generate::write_pipelines(&outputs)? {
                    println!("Wrote {}", path.display());
                }
            }
        }
        Command::Matrix { config, format } => {
            let cells = matrix::load_matrix(&config)?;
            let output = match format {
                Some(MatrixFormatArg::Json) => matrix::format_json(&cells)?,
                Some(MatrixFormatArg::Text) | None => matrix::format_text(&cells),
            };
            println!("{output}");
        }
        Command::Check { config } => {
            let report = check::check_config(&config)?;
            println!("{report}");
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["tagmatrix", "generate"]).unwrap();
        match args.command {
            Command::Generate {
                config,
                provider,
                stdout,
            } => {
                assert_eq!(config, PathBuf::from("versions.yml"));
                assert_eq!(provider, ProviderArg::All);
                assert!(!stdout);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_provider_selection() {
        assert_eq!(ProviderArg::Circleci.providers(), vec![Provider::CircleCi]);
        assert_eq!(ProviderArg::Github.providers(), vec![Provider::GitHubActions]);
        assert_eq!(ProviderArg::All.providers().len(), 2);
    }
}
