//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod demo;
mod shell;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted marketplace walkthrough
    Demo,
    /// Open an interactive marketplace shell
    Shell {
        /// Load state from a snapshot file before starting
        #[arg(long)]
        load: Option<String>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Demo => demo::run_demo(config).await,
        Commands::Shell { load } => shell::run_shell(config, load).await,
    }
}
