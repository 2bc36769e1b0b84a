//! Saved view output formatting.

use chrono::{DateTime, Utc};
use lens_api::models::{Sort, SortDirection, View};
use lens_filter::is_filters_empty;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::filters::format_filter_tree;
use super::helpers::{header_line, truncate_id, truncate_str};

/// JSON output structure for the views list command.
#[derive(Serialize)]
pub struct ViewsListOutput<'a> {
    pub views: Vec<ViewSummaryOutput<'a>>,
}

/// JSON output structure for a view in a list.
#[derive(Serialize)]
pub struct ViewSummaryOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub has_filters: bool,
    pub sorts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<&'a DateTime<Utc>>,
}

/// Formats views as JSON.
pub fn format_views_json(views: &[View]) -> Result<String, serde_json::Error> {
    let output = ViewsListOutput {
        views: views
            .iter()
            .map(|view| ViewSummaryOutput {
                id: &view.id,
                name: &view.name,
                has_filters: !is_filters_empty(&view.config.filters),
                sorts: view.config.sorts.len(),
                updated_at: view.updated_at.as_ref(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats views as a table.
pub fn format_views_table(views: &[View], use_colors: bool) -> String {
    if views.is_empty() {
        return "No views found.\n".to_string();
    }

    let mut output = header_line(
        &format!("{:<8} {:<30} {:<8} {}", "ID", "Name", "Filters", "Updated"),
        use_colors,
    );

    for view in views {
        let filters = if is_filters_empty(&view.config.filters) {
            "-"
        } else {
            "yes"
        };
        let updated = view
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        output.push_str(&format!(
            "{:<8} {:<30} {:<8} {}\n",
            truncate_id(&view.id),
            truncate_str(&view.name, 30),
            filters,
            updated
        ));
    }

    output
}

/// Formats a view with its filters as JSON.
pub fn format_view_details_json(view: &View) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

fn format_sort(sort: &Sort) -> String {
    match sort.direction {
        SortDirection::Asc => sort.field.clone(),
        SortDirection::Desc => format!("-{}", sort.field),
    }
}

/// Formats a view with its filters as readable text.
pub fn format_view_details_table(view: &View, use_colors: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n", view.name.bold()));
    } else {
        output.push_str(&format!("{}\n", view.name));
    }
    output.push_str(&format!("ID: {}\n", view.id));

    if !view.config.sorts.is_empty() {
        let sorts: Vec<String> = view.config.sorts.iter().map(format_sort).collect();
        output.push_str(&format!("Sort: {}\n", sorts.join(", ")));
    }
    if let Some(page_size) = view.config.page_size {
        output.push_str(&format!("Page size: {page_size}\n"));
    }
    if let Some(updated) = view.updated_at {
        output.push_str(&format!("Updated: {}\n", updated.format("%Y-%m-%d %H:%M")));
    }

    output.push('\n');
    output.push_str(&format_filter_tree(&view.config.filters, use_colors));

    output
}

/// JSON output structure for a saved or deleted view.
#[derive(Serialize)]
pub struct ViewChangeOutput<'a> {
    pub status: &'a str,
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Formats a saved view as JSON.
pub fn format_saved_view(view: &View) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ViewChangeOutput {
        status: "saved",
        id: &view.id,
        name: Some(&view.name),
    })
}

/// Formats a deleted view as JSON.
pub fn format_deleted_view(id: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ViewChangeOutput {
        status: "deleted",
        id,
        name: None,
    })
}
