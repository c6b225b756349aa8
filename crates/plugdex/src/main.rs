// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugdex - plugin registry pipeline.
//!
//! Binary entry point. Loads configuration, installs logging, and dispatches
//! to the updater and index generator.

mod generate;
mod update;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plugdex_config::{ConfigError, PlugdexConfig};
use plugdex_core::PlugdexError;
use tracing::error;

/// Exit code for an invalid configuration.
const EXIT_CONFIG: u8 = 2;

/// Plugdex - refresh plugin manifests and publish the plugin index.
#[derive(Parser, Debug)]
#[command(name = "plugdex", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of ./plugdex.toml and the user config.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repository root; overrides `paths.root`.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<String>,

    /// Log level; overrides `logging.log_level`. RUST_LOG takes precedence.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Refresh every manifest from its package registry.
    Update {
        /// Delete manifests whose package the registry does not know.
        #[arg(long)]
        auto_remove_invalid: bool,
    },
    /// Aggregate manifests and base.json into the index document.
    Generate,
    /// Update manifests, then generate the index.
    Run {
        /// Delete manifests whose package the registry does not know.
        #[arg(long)]
        auto_remove_invalid: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(errors) => {
            plugdex_config::render_errors(&errors);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_tracing(&config.logging.log_level);

    match dispatch(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "plugdex failed");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration, apply command-line overrides, and validate the result.
fn load_config(cli: &Cli) -> Result<PlugdexConfig, Vec<ConfigError>> {
    let mut config = plugdex_config::load_and_validate(cli.config.as_deref())?;

    if let Some(root) = &cli.root {
        config.paths.root = root.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.log_level = level.clone();
    }
    plugdex_config::validation::validate_config(&config)?;
    Ok(config)
}

async fn dispatch(command: Commands, config: &PlugdexConfig) -> Result<(), PlugdexError> {
    match command {
        Commands::Update {
            auto_remove_invalid,
        } => {
            update::run_update(config, auto_remove_invalid).await?;
        }
        Commands::Generate => {
            generate::run_generate(config)?;
        }
        Commands::Run {
            auto_remove_invalid,
        } => {
            update::run_update(config, auto_remove_invalid).await?;
            generate::run_generate(config)?;
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| PlugdexError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
        }
    }
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugdex={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
