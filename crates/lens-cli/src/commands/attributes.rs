//! Fetch-config command implementation.
//!
//! With `--json` the backend's configuration is printed verbatim, so the
//! output can be saved and passed to the offline commands via `--attributes`.

use lens_api::client::LensClient;

use super::{CommandContext, Result};
use crate::output::format_attributes_table;

/// Executes the fetch-config command.
///
/// # Errors
///
/// Returns an error if the configuration endpoint fails.
pub async fn execute(ctx: &CommandContext, client: &LensClient) -> Result<()> {
    let config = client.fetch_config().await?;
    log::debug!("fetched {} attribute descriptors", config.attributes.len());

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else if !ctx.quiet {
        print!("{}", format_attributes_table(&config.attributes, ctx.use_colors));
        if config.unique_filters {
            println!("\nUnique filters: on");
        }
    }

    Ok(())
}
