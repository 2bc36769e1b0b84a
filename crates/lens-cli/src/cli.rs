//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the lens CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// lens - filter tooling for Lens data-grid views
#[derive(Parser, Debug)]
#[command(name = "lens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override API token (default: from config/env)
    #[arg(long, global = true, env = "LENS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Override backend base URL (default: from config/env)
    #[arg(long, global = true, env = "LENS_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a filter for transmission (prune incomplete rows and empty groups)
    #[command(alias = "n")]
    Normalize {
        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },

    /// Check whether a filter has any active condition
    Empty {
        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },

    /// Rewrite attribute names to backend field names
    Map {
        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Attribute configuration (JSON config response or descriptor list)
        #[arg(short, long)]
        attributes: PathBuf,
    },

    /// Convert a filter into a flat chip list
    Chips {
        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Keep one chip per attribute (default: from config)
        #[arg(long)]
        unique: bool,
    },

    /// Convert a chip list back into a filter
    FromChips {
        /// Chip list JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },

    /// Build the parent-value constraint for an attribute's option fetch
    Parents {
        /// Attribute whose options are being fetched
        attribute: String,

        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Attribute configuration (JSON config response or descriptor list)
        #[arg(short, long)]
        attributes: PathBuf,
    },

    /// Replace one condition and clear dependent values
    Update {
        /// Index path of the condition (e.g. "1.0")
        path: String,

        /// Replacement condition as JSON
        condition: String,

        /// Filter JSON file ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Attribute configuration (JSON config response or descriptor list)
        #[arg(short, long)]
        attributes: PathBuf,

        /// Clear dependents even if unique filters are off in config
        #[arg(long)]
        unique: bool,
    },

    /// List the operators available for an attribute type
    #[command(alias = "ops")]
    Operators {
        /// Attribute type (string, integer, date, boolean, enum, ...)
        #[arg(value_name = "TYPE")]
        attribute_type: String,

        /// Include the emptiness operators of nullable attributes
        #[arg(long)]
        nullable: bool,
    },

    /// Fetch the attribute configuration from the backend
    FetchConfig,

    /// Read one page of records
    #[command(alias = "r")]
    Read {
        /// Filter JSON file
        #[arg(short, long, conflicts_with = "view")]
        filter: Option<PathBuf>,

        /// Use the filters and sorts of a saved view
        #[arg(long)]
        view: Option<String>,

        /// Sort key, "-field" for descending (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append, allow_hyphen_values = true)]
        sort: Vec<String>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size (default: from view or config)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Manage saved views
    #[command(alias = "v")]
    Views {
        #[command(subcommand)]
        command: Option<ViewsCommands>,
    },

    /// Fetch the options of an attribute, scoped by its parents
    Options {
        /// Attribute name
        attribute: String,

        /// Filter JSON file providing parent values
        #[arg(short, long)]
        filter: Option<PathBuf>,

        /// Search text
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of options
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Views subcommands
#[derive(Subcommand, Debug)]
pub enum ViewsCommands {
    /// List saved views
    #[command(alias = "ls")]
    List,

    /// Show a view with its canonical filters
    Show {
        /// View ID
        id: String,
    },

    /// Save a filter as a view (creates, or replaces with --id)
    Save {
        /// View name
        name: String,

        /// Filter JSON file ("-" for stdin)
        #[arg(short, long)]
        filter: PathBuf,

        /// Replace the view with this ID
        #[arg(long)]
        id: Option<String>,

        /// Sort key, "-field" for descending (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append, allow_hyphen_values = true)]
        sort: Vec<String>,
    },

    /// Delete a view
    #[command(alias = "rm")]
    Delete {
        /// View ID
        id: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (token, base_url, filters.unique, output.color)
        key: String,
        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

/// Shells supported for completion generation
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_normalize_from_stdin() {
        let cli = Cli::try_parse_from(["lens", "normalize"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Normalize { input: None })));
    }

    #[test]
    fn test_parse_read_with_sorts() {
        let cli = Cli::try_parse_from([
            "lens", "read", "--view", "v1", "-s", "name", "-s", "-age", "--page", "2",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Read {
                view, sort, page, ..
            }) => {
                assert_eq!(view.as_deref(), Some("v1"));
                assert_eq!(sort, vec!["name", "-age"]);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_read_filter_conflicts_with_view() {
        let result = Cli::try_parse_from(["lens", "read", "--view", "v1", "--filter", "f.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["lens", "-q", "-v", "fetch-config"]).is_err());
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "lens",
            "update",
            "0.1",
            r#"{"attribute":"state","op":"is","value":"NV"}"#,
            "filter.json",
            "--attributes",
            "config.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Update { unique: false, .. })));
    }
}
