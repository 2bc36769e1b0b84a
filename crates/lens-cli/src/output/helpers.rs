//! Common helper functions for output formatting.

use lens_api::models::{Condition, ConditionValue};
use owo_colors::OwoColorize;

/// Truncates an ID to 8 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Renders a condition value. Text is quoted so blank strings stay visible.
pub fn format_value(value: Option<&ConditionValue>, use_colors: bool) -> String {
    match value {
        Some(ConditionValue::Text(s)) => format!("\"{s}\""),
        Some(value) => value.to_string(),
        None if use_colors => "(no value)".dimmed().to_string(),
        None => "(no value)".to_string(),
    }
}

/// Renders one condition as `attribute op value`.
pub fn format_condition(condition: &Condition, use_colors: bool) -> String {
    let attribute = if condition.attribute.is_empty() {
        "(no attribute)".to_string()
    } else {
        condition.attribute.clone()
    };
    let op = condition
        .op
        .as_ref()
        .map_or("(no operator)", |op| op.as_str());

    if use_colors {
        format!(
            "{} {} {}",
            attribute.cyan(),
            op.yellow(),
            format_value(condition.value.as_ref(), use_colors)
        )
    } else {
        format!(
            "{} {} {}",
            attribute,
            op,
            format_value(condition.value.as_ref(), use_colors)
        )
    }
}

/// Formats a table header line, dimmed when colors are on.
pub fn header_line(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}
