use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{resolve_base_url, resolve_token};
use commands::{CommandContext, CommandError};
use dispatch::{OfflineCommand, OfflineDispatch, RemoteCommand, RemoteDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Sets up stderr logging. `-v` shows debug events, `-q` only errors;
/// `RUST_LOG` directives take precedence.
fn initialize_logging(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    // Offline commands first (filter tooling, config, completions, help)
    if let Some(dispatch) = OfflineDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    if let Some(dispatch) = RemoteDispatch::from_cli(cli) {
        let base_url = resolve_base_url(cli.base_url.as_deref());
        let token = resolve_token(cli.token.as_deref());
        log::debug!("using backend {base_url}");

        let client = commands::build_client(&base_url, token)?;
        return dispatch.execute(&ctx, &client).await;
    }

    Err(CommandError::Input(format!("unhandled command: {:?}", cli.command)))
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Api(_) => "API_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Api(api) => ExitCode::from(u8::try_from(api.exit_code()).unwrap_or(1)),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Filter(_) | CommandError::Input(_) | CommandError::Json(_) => {
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_filter::FilterError;

    #[test]
    fn test_error_codes() {
        let filter = CommandError::Filter(FilterError::unknown_attribute("stat", None));
        assert_eq!(error_code(&filter), "FILTER_ERROR");
        assert_eq!(error_exit_code(&filter), ExitCode::from(1));

        let config = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&config), ExitCode::from(5));

        let input = CommandError::Input("bad".to_string());
        assert_eq!(error_code(&input), "INPUT_ERROR");

        let io = CommandError::Io(std::io::Error::other("disk"));
        assert_eq!(error_code(&io), "IO_ERROR");
        assert_eq!(error_exit_code(&io), ExitCode::from(3));
    }

    #[test]
    fn test_api_errors_use_their_own_exit_code() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let api = CommandError::Api(lens_api::error::Error::Json(json_err));
        assert_eq!(error_code(&api), "API_ERROR");
        assert_eq!(error_exit_code(&api), ExitCode::from(2));
    }
}
