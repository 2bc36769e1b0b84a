//! Operator list output formatting.

use lens_api::models::{AttributeType, Operator};
use lens_filter::OperatorDefinition;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::header_line;

/// JSON output structure for the operators command.
#[derive(Serialize)]
pub struct OperatorsOutput<'a> {
    #[serde(rename = "type")]
    pub attribute_type: &'a str,
    pub default_operator: &'a str,
    pub operators: Vec<OperatorOutput<'a>>,
}

/// JSON output structure for a single operator.
#[derive(Serialize)]
pub struct OperatorOutput<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub requires_value: bool,
}

/// Formats the operators of a type as JSON.
pub fn format_operators_json(
    attribute_type: &AttributeType,
    default_operator: &Operator,
    operators: &[OperatorDefinition],
) -> Result<String, serde_json::Error> {
    let output = OperatorsOutput {
        attribute_type: attribute_type.as_str(),
        default_operator: default_operator.as_str(),
        operators: operators
            .iter()
            .map(|definition| OperatorOutput {
                value: definition.value.as_str(),
                label: definition.label,
                requires_value: definition.requires_value,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the operators of a type as a table. The default is starred.
pub fn format_operators_table(
    attribute_type: &AttributeType,
    default_operator: &Operator,
    operators: &[OperatorDefinition],
    use_colors: bool,
) -> String {
    if operators.is_empty() {
        return format!("No operators for type '{}'.\n", attribute_type);
    }

    let mut output = header_line(
        &format!("{:<2} {:<24} {:<20} {}", "", "Operator", "Label", "Value"),
        use_colors,
    );

    for definition in operators {
        let marker = if definition.value == *default_operator {
            if use_colors {
                "★".yellow().to_string()
            } else {
                "★".to_string()
            }
        } else {
            " ".to_string()
        };
        let value = if definition.requires_value {
            "required"
        } else {
            "-"
        };

        output.push_str(&format!(
            "{:<2} {:<24} {:<20} {}\n",
            marker,
            definition.value.as_str(),
            definition.label,
            value
        ));
    }

    output
}
