//! Main entry point for the RegForm CLI.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::FormConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// RegForm CLI
#[derive(Parser)]
#[command(name = "regform")]
#[command(about = "Validate registration form input from the command line", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (e.g., regform.yaml, regform.json or regform.toml). If not provided, defaults will be used."
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the RegForm CLI
#[derive(Subcommand)]
enum Commands {
    /// Validate a complete form submission
    Check {
        /// Username field value
        #[arg(long, default_value = "")]
        username: String,

        /// Email field value
        #[arg(long, default_value = "")]
        email: String,

        /// Password field value
        #[arg(long, default_value = "")]
        password: String,

        /// Confirm-password field value
        #[arg(long, default_value = "")]
        confirm_password: String,

        /// Print the outcome as JSON instead of a report
        #[arg(long, help = "Print the outcome as JSON instead of a report")]
        json: bool,
    },

    /// Replay a timed keystroke script through the live validator
    Replay {
        /// Script file with one `<ms> <field-id> <value>` event per line
        #[arg(help = "Script file with one `<ms> <field-id> <value>` event per line")]
        script: PathBuf,
    },

    /// Print the resolved configuration
    Config {
        /// Format of the configuration to print (yaml, json or toml). Defaults to yaml.
        #[arg(
            long,
            short,
            default_value = "yaml",
            help = "Format of the configuration to print (yaml, json or toml). Defaults to yaml."
        )]
        format: String,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: clap_complete::Shell,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = FormConfig::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Check {
            username,
            email,
            password,
            confirm_password,
            json,
        } => {
            let input = commands::check::FormInput {
                username,
                email,
                password,
                confirm_password,
            };
            let valid = commands::check::run_check(&input, &config, json)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Replay { script } => {
            commands::replay::run_replay(&script, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { format } => {
            commands::config::print_config(&config, &format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completion { shell } => {
            commands::completion::print_completion(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}
