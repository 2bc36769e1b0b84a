//! Offline filter commands.
//!
//! These commands work on filter JSON read from a file or stdin and never
//! touch the backend: normalize, empty, map, chips, from-chips, parents and
//! update. Engine diagnostics go to the `log` facade.

use std::path::{Path, PathBuf};

use lens_api::models::{Condition, Filter, FilterGroup};
use lens_filter::{
    chip_filters_to_lens_view_filter, is_filters_empty, lens_filter_to_chip_filters,
    normalize_filters_with, process_filters_for_api, AttributeRegistry, CascadeOptions,
    ChipFilter, ChipSession, FilterContext, FilterError, LogCrateSink,
};

use super::config::unique_filters_configured;
use super::input::{load_attributes, parse_node_path, read_json};
use super::{CommandContext, CommandError, Result};
use crate::output::{
    format_chips_json, format_chips_table, format_empty_json, format_filter_json,
    format_filter_tree,
};

/// Reads and normalizes a filter document; malformed input becomes the empty filter.
fn read_filter(input: Option<&Path>, sink: &LogCrateSink) -> Result<Filter> {
    let raw = read_json(input)?;
    Ok(normalize_filters_with(&raw, sink))
}

/// Decodes a filter document as-is, keeping incomplete rows and their positions.
fn read_filter_tree(input: Option<&Path>) -> Result<Filter> {
    let raw = read_json(input)?;
    serde_json::from_value(raw).map_err(|e| FilterError::malformed(e.to_string()).into())
}

/// Prints a filter as JSON or as a tree.
fn print_filter(ctx: &CommandContext, filter: &Filter) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_filter_json(filter)?);
    } else if !ctx.quiet {
        print!("{}", format_filter_tree(filter, ctx.use_colors));
    }
    Ok(())
}

fn context<'a>(registry: &'a AttributeRegistry, sink: &'a LogCrateSink) -> FilterContext<'a> {
    FilterContext::new(registry).with_sink(sink)
}

/// Options for the normalize command.
#[derive(Debug, Default)]
pub struct NormalizeOptions {
    pub input: Option<PathBuf>,
}

/// Executes the normalize command: prints the filter as it would be sent.
pub fn execute_normalize(ctx: &CommandContext, opts: &NormalizeOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let filter = read_filter(opts.input.as_deref(), &sink)?;

    let cleaned = process_filters_for_api(&filter).map_or(Filter::Empty, Filter::from);
    print_filter(ctx, &cleaned)
}

/// Options for the empty command.
#[derive(Debug, Default)]
pub struct EmptyOptions {
    pub input: Option<PathBuf>,
}

/// Executes the empty command.
pub fn execute_empty(ctx: &CommandContext, opts: &EmptyOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let filter = read_filter(opts.input.as_deref(), &sink)?;

    let empty = is_filters_empty(&filter);
    let active = process_filters_for_api(&filter)
        .map(|group| group.leaves().len())
        .unwrap_or(0);

    if ctx.json_output {
        println!("{}", format_empty_json(empty, active)?);
    } else if !ctx.quiet {
        if empty {
            println!("empty");
        } else {
            let noun = if active == 1 { "condition" } else { "conditions" };
            println!("not empty ({active} active {noun})");
        }
    }
    Ok(())
}

/// Options for the map command.
#[derive(Debug)]
pub struct MapOptions {
    pub input: Option<PathBuf>,
    pub attributes: PathBuf,
}

/// Executes the map command: rewrites attribute names to backend fields.
///
/// The tree is mapped as given; incomplete rows are kept.
pub fn execute_map(ctx: &CommandContext, opts: &MapOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let (registry, _) = load_attributes(&opts.attributes)?;
    let filter = read_filter_tree(opts.input.as_deref())?;

    let mapped = match &filter {
        Filter::Empty => Filter::Empty,
        Filter::Group(group) => context(&registry, &sink).map_attributes(group).into(),
    };
    print_filter(ctx, &mapped)
}

/// Options for the chips command.
#[derive(Debug, Default)]
pub struct ChipsOptions {
    pub input: Option<PathBuf>,
    pub unique: bool,
}

/// Executes the chips command.
///
/// In unique mode the chips come from a [`ChipSession`], which keeps one chip
/// per attribute and stamps them with a session id.
pub fn execute_chips(ctx: &CommandContext, opts: &ChipsOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let filter = read_filter(opts.input.as_deref(), &sink)?;

    let unique = opts.unique || unique_filters_configured();
    let session = unique.then(|| ChipSession::from_filter(&filter));
    let chips = match &session {
        Some(session) => session.chips().to_vec(),
        None => lens_filter_to_chip_filters(&filter),
    };

    if ctx.json_output {
        let session_id = session.as_ref().map(ChipSession::session_id);
        println!("{}", format_chips_json(&chips, session_id)?);
    } else if !ctx.quiet {
        print!("{}", format_chips_table(&chips, ctx.use_colors));
    }
    Ok(())
}

/// Options for the from-chips command.
#[derive(Debug, Default)]
pub struct FromChipsOptions {
    pub input: Option<PathBuf>,
}

/// Executes the from-chips command.
///
/// Accepts either a bare chip array or the `{"chips": [...]}` object the
/// chips command prints.
pub fn execute_from_chips(ctx: &CommandContext, opts: &FromChipsOptions) -> Result<()> {
    let mut raw = read_json(opts.input.as_deref())?;
    if let Some(chips) = raw.get_mut("chips") {
        raw = chips.take();
    }

    let chips: Vec<ChipFilter> = serde_json::from_value(raw)
        .map_err(|e| CommandError::Input(format!("expected a chip list: {e}")))?;

    print_filter(ctx, &chip_filters_to_lens_view_filter(&chips))
}

/// Options for the parents command.
#[derive(Debug)]
pub struct ParentsOptions {
    pub attribute: String,
    pub input: Option<PathBuf>,
    pub attributes: PathBuf,
}

/// Executes the parents command: prints the constraint an option fetch for
/// the attribute would carry.
pub fn execute_parents(ctx: &CommandContext, opts: &ParentsOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let (registry, _) = load_attributes(&opts.attributes)?;
    registry.require(&opts.attribute)?;
    let filter = read_filter(opts.input.as_deref(), &sink)?;

    let constraint = filter
        .as_group()
        .and_then(|group| context(&registry, &sink).parent_constraint_for(&opts.attribute, group));

    match constraint {
        Some(group) => print_filter(ctx, &Filter::from(group)),
        None if ctx.json_output => {
            println!("{}", format_filter_json(&Filter::Empty)?);
            Ok(())
        }
        None => {
            if !ctx.quiet {
                println!("No parent constraint for '{}'.", opts.attribute);
            }
            Ok(())
        }
    }
}

/// Options for the update command.
#[derive(Debug)]
pub struct UpdateOptions {
    pub path: String,
    pub condition: String,
    pub input: Option<PathBuf>,
    pub attributes: PathBuf,
    pub unique: bool,
}

/// Executes the update command: replaces one condition and clears the
/// values of its dependents.
///
/// The path indexes the tree as given, so the input is not cleaned first.
///
/// Cascade clearing runs when `--unique` is given, the attribute config sets
/// `uniqueFilters`, or `filters.unique` is configured.
pub fn execute_update(ctx: &CommandContext, opts: &UpdateOptions) -> Result<()> {
    let sink = LogCrateSink::default();
    let (registry, config) = load_attributes(&opts.attributes)?;
    let path = parse_node_path(&opts.path)?;
    let condition: Condition = serde_json::from_str(&opts.condition)
        .map_err(|e| CommandError::Input(format!("invalid condition: {e}")))?;

    let filter = read_filter_tree(opts.input.as_deref())?;
    let group = match filter {
        Filter::Group(group) => group,
        Filter::Empty => FilterGroup::default(),
    };

    let options = CascadeOptions {
        unique_filters: opts.unique || config.unique_filters || unique_filters_configured(),
    };
    let updated = context(&registry, &sink).update_condition(&group, &path, condition, options)?;

    print_filter(ctx, &Filter::from(updated))
}
