//! Views command implementation.
//!
//! Lists, shows, saves and deletes saved views. Filters are canonicalized on
//! load and cleaned before they are saved.

use std::path::PathBuf;

use lens_api::client::LensClient;
use lens_api::models::{Filter, View, ViewConfig};
use lens_filter::{normalize_filters_with, normalize_view, process_filters_for_api, LogCrateSink};

use super::input::{parse_sorts, read_json};
use super::{CommandContext, Result};
use crate::output::{
    format_deleted_view, format_saved_view, format_view_details_json, format_view_details_table,
    format_views_json, format_views_table,
};

/// Executes the views list command.
pub async fn execute_list(ctx: &CommandContext, client: &LensClient) -> Result<()> {
    let views: Vec<View> = client
        .list_views()
        .await?
        .iter()
        .map(normalize_view)
        .collect();

    if ctx.json_output {
        println!("{}", format_views_json(&views)?);
    } else if !ctx.quiet {
        print!("{}", format_views_table(&views, ctx.use_colors));
    }

    Ok(())
}

/// Executes the views show command.
pub async fn execute_show(ctx: &CommandContext, id: &str, client: &LensClient) -> Result<()> {
    let view = normalize_view(&client.get_view(id).await?);

    if ctx.json_output {
        println!("{}", format_view_details_json(&view)?);
    } else if !ctx.quiet {
        print!("{}", format_view_details_table(&view, ctx.use_colors));
    }

    Ok(())
}

/// Options for the views save command.
#[derive(Debug)]
pub struct ViewSaveOptions {
    pub name: String,
    pub filter: PathBuf,
    pub id: Option<String>,
    pub sort: Vec<String>,
}

/// Builds the view to save. Incomplete rows are dropped first.
fn build_view(opts: &ViewSaveOptions, filter: &Filter) -> Result<View> {
    let filters = process_filters_for_api(filter)
        .filter(|group| !group.conditions.is_empty())
        .map_or(Filter::Empty, Filter::from);

    let mut view = View::new(
        opts.name.clone(),
        ViewConfig {
            filters,
            sorts: parse_sorts(&opts.sort)?,
            ..ViewConfig::default()
        },
    );
    if let Some(id) = &opts.id {
        view.id = id.clone();
    }
    Ok(view)
}

/// Executes the views save command.
pub async fn execute_save(
    ctx: &CommandContext,
    opts: &ViewSaveOptions,
    client: &LensClient,
) -> Result<()> {
    let sink = LogCrateSink::default();
    let filter = normalize_filters_with(&read_json(Some(opts.filter.as_path()))?, &sink);
    let view = build_view(opts, &filter)?;

    let saved = client.save_view(&view).await?;

    if ctx.json_output {
        println!("{}", format_saved_view(&saved)?);
    } else if !ctx.quiet {
        println!("Saved view '{}' ({})", saved.name, saved.id);
    }

    Ok(())
}

/// Executes the views delete command.
pub async fn execute_delete(ctx: &CommandContext, id: &str, client: &LensClient) -> Result<()> {
    client.delete_view(id).await?;

    if ctx.json_output {
        println!("{}", format_deleted_view(id)?);
    } else if !ctx.quiet {
        println!("Deleted view {id}");
    }

    Ok(())
}
