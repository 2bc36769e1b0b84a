//! Options command implementation.
//!
//! Fetches the selectable options of an attribute. Options of a cascading
//! attribute are scoped by the values already selected for its parents.

use std::path::PathBuf;

use lens_api::client::LensClient;
use lens_api::models::Filter;
use lens_filter::{normalize_filters_with, AttributeRegistry, FilterContext, LogCrateSink};

use super::input::read_json;
use super::{CommandContext, Result};
use crate::output::{format_options_json, format_options_table};

/// Options for the options command.
#[derive(Debug)]
pub struct OptionsOptions {
    pub attribute: String,
    pub filter: Option<PathBuf>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

/// Executes the options command.
///
/// # Errors
///
/// Returns an error for an unknown attribute or a failed API call.
pub async fn execute(ctx: &CommandContext, opts: &OptionsOptions, client: &LensClient) -> Result<()> {
    let sink = LogCrateSink::default();
    let config = client.fetch_config().await?;
    let registry = AttributeRegistry::from_config(&config);
    let context = FilterContext::new(&registry).with_sink(&sink);

    let filter = match &opts.filter {
        Some(path) => normalize_filters_with(&read_json(Some(path.as_path()))?, &sink),
        None => Filter::Empty,
    };

    let mut request = context.option_query(&opts.attribute, &filter, opts.search.clone())?;
    request.limit = opts.limit;
    log::debug!("aggregate request: {}", serde_json::to_string(&request)?);

    let options = client.aggregate_options(&request).await?;

    if ctx.json_output {
        println!("{}", format_options_json(&opts.attribute, &options)?);
    } else if !ctx.quiet {
        print!("{}", format_options_table(&options, ctx.use_colors));
    }

    Ok(())
}
