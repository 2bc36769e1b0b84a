//! Filter tree and chip output formatting.

use lens_api::models::{Filter, FilterGroup, FilterNode};
use lens_filter::ChipFilter;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_condition, format_value, header_line, truncate_str};

/// Formats a filter as pretty JSON (`{}` for the empty filter).
pub fn format_filter_json(filter: &Filter) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(filter)
}

/// Formats a filter as an indented tree.
pub fn format_filter_tree(filter: &Filter, use_colors: bool) -> String {
    match filter {
        Filter::Empty => "No filter.\n".to_string(),
        Filter::Group(group) => {
            let mut output = String::new();
            write_group(&mut output, group, 0, use_colors);
            output
        }
    }
}

fn write_group(output: &mut String, group: &FilterGroup, depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    let combinator = group.op.to_string().to_uppercase();
    let label = if group.conditions.is_empty() {
        format!("{combinator} (no conditions)")
    } else {
        combinator
    };

    if use_colors {
        output.push_str(&format!("{indent}{}\n", label.bold()));
    } else {
        output.push_str(&format!("{indent}{label}\n"));
    }

    for node in &group.conditions {
        match node {
            FilterNode::Condition(condition) => {
                output.push_str(&format!(
                    "{indent}  - {}\n",
                    format_condition(condition, use_colors)
                ));
            }
            FilterNode::Group(nested) => write_group(output, nested, depth + 1, use_colors),
        }
    }
}

/// JSON output structure for the empty command.
#[derive(Serialize)]
pub struct EmptyOutput {
    pub empty: bool,
    pub active_conditions: usize,
}

/// Formats the result of an emptiness check.
pub fn format_empty_json(empty: bool, active_conditions: usize) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EmptyOutput {
        empty,
        active_conditions,
    })
}

/// JSON output structure for chip lists.
#[derive(Serialize)]
pub struct ChipsOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
    pub chips: &'a [ChipFilter],
}

/// Formats chips as JSON.
pub fn format_chips_json(
    chips: &[ChipFilter],
    session_id: Option<&str>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ChipsOutput { session_id, chips })
}

/// Formats chips as a table.
pub fn format_chips_table(chips: &[ChipFilter], use_colors: bool) -> String {
    if chips.is_empty() {
        return "No chips.\n".to_string();
    }

    let mut output = header_line(
        &format!("{:<20} {:<20} {:<22} {}", "ID", "Attribute", "Operator", "Value"),
        use_colors,
    );

    for chip in chips {
        let line = format!(
            "{:<20} {:<20} {:<22} {}",
            truncate_str(&chip.id, 20),
            truncate_str(&chip.attribute, 20),
            chip.operator.as_str(),
            format_value(chip.value.as_ref(), use_colors)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_api::models::{Condition, Operator};

    fn sample() -> Filter {
        FilterGroup::and(vec![
            Condition::new("status", Operator::Is, "open").into(),
            FilterGroup::or(vec![
                Condition::new("age", Operator::GreaterThan, 30i64).into(),
                Condition::without_value("age", Operator::IsEmpty).into(),
            ])
            .into(),
        ])
        .into()
    }

    #[test]
    fn test_filter_tree_plain() {
        let tree = format_filter_tree(&sample(), false);
        assert_eq!(
            tree,
            "AND\n  - status is \"open\"\n  OR\n    - age greater_than 30\n    - age is_empty (no value)\n"
        );
    }

    #[test]
    fn test_filter_tree_empty() {
        assert_eq!(format_filter_tree(&Filter::Empty, false), "No filter.\n");
        let empty_group = Filter::from(FilterGroup::or(vec![]));
        assert_eq!(format_filter_tree(&empty_group, false), "OR (no conditions)\n");
    }

    #[test]
    fn test_filter_json_empty_is_object() {
        assert_eq!(format_filter_json(&Filter::Empty).unwrap(), "{}");
    }

    #[test]
    fn test_chips_table() {
        let chips = lens_filter::lens_filter_to_chip_filters(&sample());
        let table = format_chips_table(&chips, false);

        assert!(table.starts_with("ID"));
        assert!(table.contains("status-0"));
        assert!(table.contains("age-2"));
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn test_chips_json_omits_missing_session() {
        let json = format_chips_json(&[], None).unwrap();
        assert_eq!(json, "{\n  \"chips\": []\n}");
    }
}
