//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Offline commands (filter tooling, config, completions) never build an API
//! client. Remote commands get a [`LensClient`] built from the resolved base
//! URL and token.

use std::path::PathBuf;

use lens_api::client::LensClient;

use crate::cli::{Cli, Commands, ConfigCommands, Shell, ViewsCommands};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the backend.
pub trait OfflineCommand {
    /// Execute the command locally.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that talk to the backend.
#[allow(async_fn_in_trait)]
pub trait RemoteCommand {
    /// Execute the command with the provided API client.
    async fn execute(&self, ctx: &CommandContext, client: &LensClient) -> Result<()>;
}

/// Commands that don't need the backend.
pub enum OfflineDispatch<'a> {
    Normalize(&'a Option<PathBuf>),
    Empty(&'a Option<PathBuf>),
    Map {
        input: &'a Option<PathBuf>,
        attributes: &'a PathBuf,
    },
    Chips {
        input: &'a Option<PathBuf>,
        unique: bool,
    },
    FromChips(&'a Option<PathBuf>),
    Parents {
        attribute: &'a str,
        input: &'a Option<PathBuf>,
        attributes: &'a PathBuf,
    },
    Update {
        path: &'a str,
        condition: &'a str,
        input: &'a Option<PathBuf>,
        attributes: &'a PathBuf,
        unique: bool,
    },
    Operators {
        attribute_type: &'a str,
        nullable: bool,
    },
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> OfflineDispatch<'a> {
    /// Try to create an offline dispatch from the CLI command.
    /// Returns None if the command needs the backend.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Normalize { input }) => Some(Self::Normalize(input)),
            Some(Commands::Empty { input }) => Some(Self::Empty(input)),
            Some(Commands::Map { input, attributes }) => Some(Self::Map { input, attributes }),
            Some(Commands::Chips { input, unique }) => Some(Self::Chips {
                input,
                unique: *unique,
            }),
            Some(Commands::FromChips { input }) => Some(Self::FromChips(input)),
            Some(Commands::Parents {
                attribute,
                input,
                attributes,
            }) => Some(Self::Parents {
                attribute,
                input,
                attributes,
            }),
            Some(Commands::Update {
                path,
                condition,
                input,
                attributes,
                unique,
            }) => Some(Self::Update {
                path,
                condition,
                input,
                attributes,
                unique: *unique,
            }),
            Some(Commands::Operators {
                attribute_type,
                nullable,
            }) => Some(Self::Operators {
                attribute_type,
                nullable: *nullable,
            }),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl OfflineCommand for OfflineDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        use commands::filters;

        match self {
            Self::Normalize(input) => {
                let opts = filters::NormalizeOptions {
                    input: (*input).clone(),
                };
                filters::execute_normalize(ctx, &opts)
            }
            Self::Empty(input) => {
                let opts = filters::EmptyOptions {
                    input: (*input).clone(),
                };
                filters::execute_empty(ctx, &opts)
            }
            Self::Map { input, attributes } => {
                let opts = filters::MapOptions {
                    input: (*input).clone(),
                    attributes: (*attributes).clone(),
                };
                filters::execute_map(ctx, &opts)
            }
            Self::Chips { input, unique } => {
                let opts = filters::ChipsOptions {
                    input: (*input).clone(),
                    unique: *unique,
                };
                filters::execute_chips(ctx, &opts)
            }
            Self::FromChips(input) => {
                let opts = filters::FromChipsOptions {
                    input: (*input).clone(),
                };
                filters::execute_from_chips(ctx, &opts)
            }
            Self::Parents {
                attribute,
                input,
                attributes,
            } => {
                let opts = filters::ParentsOptions {
                    attribute: (*attribute).to_string(),
                    input: (*input).clone(),
                    attributes: (*attributes).clone(),
                };
                filters::execute_parents(ctx, &opts)
            }
            Self::Update {
                path,
                condition,
                input,
                attributes,
                unique,
            } => {
                let opts = filters::UpdateOptions {
                    path: (*path).to_string(),
                    condition: (*condition).to_string(),
                    input: (*input).clone(),
                    attributes: (*attributes).clone(),
                    unique: *unique,
                };
                filters::execute_update(ctx, &opts)
            }
            Self::Operators {
                attribute_type,
                nullable,
            } => {
                let opts = commands::operators::OperatorsOptions {
                    attribute_type: (*attribute_type).to_string(),
                    nullable: *nullable,
                };
                commands::operators::execute(ctx, &opts)
            }
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("lens - filter tooling for Lens data-grid views");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that need the backend.
pub enum RemoteDispatch<'a> {
    FetchConfig,
    Read {
        filter: &'a Option<PathBuf>,
        view: &'a Option<String>,
        sort: &'a [String],
        page: u32,
        page_size: Option<u32>,
    },
    Views(&'a Option<ViewsCommands>),
    Options {
        attribute: &'a str,
        filter: &'a Option<PathBuf>,
        search: &'a Option<String>,
        limit: Option<u32>,
    },
}

impl<'a> RemoteDispatch<'a> {
    /// Create a remote dispatch from the CLI command.
    /// Returns None for offline commands (use OfflineDispatch first).
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::FetchConfig) => Some(Self::FetchConfig),
            Some(Commands::Read {
                filter,
                view,
                sort,
                page,
                page_size,
            }) => Some(Self::Read {
                filter,
                view,
                sort,
                page: *page,
                page_size: *page_size,
            }),
            Some(Commands::Views { command }) => Some(Self::Views(command)),
            Some(Commands::Options {
                attribute,
                filter,
                search,
                limit,
            }) => Some(Self::Options {
                attribute,
                filter,
                search,
                limit: *limit,
            }),
            _ => None,
        }
    }
}

impl RemoteCommand for RemoteDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, client: &LensClient) -> Result<()> {
        match self {
            Self::FetchConfig => commands::attributes::execute(ctx, client).await,
            Self::Read {
                filter,
                view,
                sort,
                page,
                page_size,
            } => {
                let opts = commands::read::ReadOptions {
                    filter: (*filter).clone(),
                    view: (*view).clone(),
                    sort: sort.to_vec(),
                    page: *page,
                    page_size: *page_size,
                };
                commands::read::execute(ctx, &opts, client).await
            }
            Self::Views(command) => dispatch_views(ctx, command, client).await,
            Self::Options {
                attribute,
                filter,
                search,
                limit,
            } => {
                let opts = commands::options::OptionsOptions {
                    attribute: (*attribute).to_string(),
                    filter: (*filter).clone(),
                    search: (*search).clone(),
                    limit: *limit,
                };
                commands::options::execute(ctx, &opts, client).await
            }
        }
    }
}

/// Dispatch views subcommands.
async fn dispatch_views(
    ctx: &CommandContext,
    command: &Option<ViewsCommands>,
    client: &LensClient,
) -> Result<()> {
    use commands::views;

    match command {
        Some(ViewsCommands::List) | None => views::execute_list(ctx, client).await,
        Some(ViewsCommands::Show { id }) => views::execute_show(ctx, id, client).await,
        Some(ViewsCommands::Save {
            name,
            filter,
            id,
            sort,
        }) => {
            let opts = views::ViewSaveOptions {
                name: name.clone(),
                filter: filter.clone(),
                id: id.clone(),
                sort: sort.clone(),
            };
            views::execute_save(ctx, &opts, client).await
        }
        Some(ViewsCommands::Delete { id }) => views::execute_delete(ctx, id, client).await,
    }
}
