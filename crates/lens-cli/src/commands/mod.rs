//! Command implementations for the lens CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod attributes;
pub mod completions;
pub mod config;
pub mod filters;
pub mod input;
pub mod operators;
pub mod options;
pub mod read;
pub mod views;

use lens_api::client::LensClient;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter engine error.
    #[error("filter error: {0}")]
    Filter(#[from] lens_filter::FilterError),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] lens_api::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command input.
    #[error("invalid input: {0}")]
    Input(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are on unless `--no-color` is given or `output.color = false`
    /// is configured.
    pub fn from_cli(cli: &Cli) -> Self {
        let configured_color = config::load_config()
            .ok()
            .and_then(|config| config.output.color)
            .unwrap_or(true);

        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && configured_color,
            quiet: cli.quiet,
        }
    }
}

/// Creates the API client from the resolved base URL and token.
pub fn build_client(base_url: &str, token: Option<String>) -> Result<LensClient> {
    Ok(LensClient::new(base_url, token)?)
}
