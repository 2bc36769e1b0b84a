//! Read command implementation.
//!
//! Reads one page of records. The filter comes from a file or a saved view;
//! it is cleaned and mapped to backend fields before it is sent.

use std::path::PathBuf;

use lens_api::client::LensClient;
use lens_api::models::{Filter, LensConfig, Pagination, ReadRequest, Sort, View};
use lens_filter::{
    normalize_filters_with, normalize_view, AttributeRegistry, FilterContext, LogCrateSink,
};

use super::input::{parse_sorts, read_json};
use super::{CommandContext, CommandError, Result};
use crate::output::{format_records_json, format_records_table};

/// Page size used when neither the flag, the view nor the backend sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Options for the read command.
#[derive(Debug)]
pub struct ReadOptions {
    /// Filter JSON file.
    pub filter: Option<PathBuf>,
    /// Saved view ID.
    pub view: Option<String>,
    /// Sort keys ("-field" for descending).
    pub sort: Vec<String>,
    /// Page number (1-based).
    pub page: u32,
    /// Page size override.
    pub page_size: Option<u32>,
}

/// Where the filter and its defaults came from.
#[derive(Debug, Default)]
struct ReadSource {
    filter: Filter,
    sorts: Vec<Sort>,
    page_size: Option<u32>,
    columns: Vec<String>,
}

impl ReadSource {
    fn from_view(view: &View) -> Self {
        let view = normalize_view(view);
        let columns = view
            .config
            .columns
            .iter()
            .filter(|column| column.visible)
            .map(|column| column.attribute.clone())
            .collect();

        Self {
            filter: view.config.filters,
            sorts: view.config.sorts,
            page_size: view.config.page_size,
            columns,
        }
    }
}

/// Builds the read request. Flags win over the view, the view over the
/// backend configuration.
fn build_request(
    context: &FilterContext<'_>,
    config: &LensConfig,
    source: &ReadSource,
    opts: &ReadOptions,
) -> Result<ReadRequest> {
    if opts.page == 0 {
        return Err(CommandError::Input("Pages start at 1".to_string()));
    }

    let sorts = if !opts.sort.is_empty() {
        parse_sorts(&opts.sort)?
    } else if !source.sorts.is_empty() {
        source.sorts.clone()
    } else {
        config.default_sorts.clone()
    };

    let page_size = opts
        .page_size
        .or(source.page_size)
        .or(config.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    Ok(context
        .read_request(&source.filter)
        .with_sorts(sorts)
        .with_pagination(Pagination {
            page: opts.page,
            page_size,
        }))
}

/// Executes the read command.
///
/// # Errors
///
/// Returns an error if an API call fails or the filter file cannot be read.
pub async fn execute(ctx: &CommandContext, opts: &ReadOptions, client: &LensClient) -> Result<()> {
    let sink = LogCrateSink::default();
    let config = client.fetch_config().await?;
    let registry = AttributeRegistry::from_config(&config);
    let context = FilterContext::new(&registry).with_sink(&sink);

    let source = if let Some(id) = &opts.view {
        ReadSource::from_view(&client.get_view(id).await?)
    } else if let Some(path) = &opts.filter {
        ReadSource {
            filter: normalize_filters_with(&read_json(Some(path.as_path()))?, &sink),
            ..ReadSource::default()
        }
    } else {
        ReadSource::default()
    };

    let request = build_request(&context, &config, &source, opts)?;
    log::debug!("read request: {}", serde_json::to_string(&request)?);

    let response = client.read(&request).await?;

    if ctx.json_output {
        println!("{}", format_records_json(&response, opts.page)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_records_table(&response, &source.columns, opts.page, ctx.use_colors)
        );
    }

    Ok(())
}
