//! Output formatting utilities for the lens CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`filters`] - Filter trees and chip lists
//! - [`operators`] - Operator lists per attribute type
//! - [`views`] - Saved views (list, show, save, delete)
//! - [`records`] - Record pages, attribute options and attribute descriptors
//! - [`helpers`] - Common formatting utilities (truncation, conditions, headers)

mod filters;
pub mod helpers;
mod operators;
mod records;
mod views;

// Filters
pub use filters::{
    format_chips_json, format_chips_table, format_empty_json, format_filter_json,
    format_filter_tree,
};

// Operators
pub use operators::{format_operators_json, format_operators_table};

// Views
pub use views::{
    format_deleted_view, format_saved_view, format_view_details_json, format_view_details_table,
    format_views_json, format_views_table,
};

// Records, options, attributes
pub use records::{
    format_attributes_table, format_options_json, format_options_table,
    format_records_json, format_records_table,
};
