//! Record, option and attribute output formatting.

use lens_api::models::{AttributeDescriptor, AttributeOption, ReadResponse};
use serde::Serialize;
use serde_json::Value;

use super::helpers::{header_line, truncate_str};

const CELL_WIDTH: usize = 20;

/// JSON output structure for a page of records.
#[derive(Serialize)]
pub struct RecordsOutput<'a> {
    pub records: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub page: u32,
}

/// Formats a page of records as JSON.
pub fn format_records_json(response: &ReadResponse, page: u32) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RecordsOutput {
        records: &response.data,
        total: response.total,
        page,
    })
}

fn cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    truncate_str(&text, CELL_WIDTH)
}

/// Picks the table columns: the given ones, or the keys of the first record.
fn record_columns(records: &[Value], columns: &[String]) -> Vec<String> {
    if !columns.is_empty() {
        return columns.to_vec();
    }
    records
        .first()
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

/// Formats a page of records as a table.
///
/// `columns` restricts and orders the columns; when empty, the keys of the
/// first record are used.
pub fn format_records_table(
    response: &ReadResponse,
    columns: &[String],
    page: u32,
    use_colors: bool,
) -> String {
    if response.data.is_empty() {
        return "No records found.\n".to_string();
    }

    let columns = record_columns(&response.data, columns);
    let row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .map(|c| format!("{:<width$}", c, width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = columns
        .iter()
        .map(|column| truncate_str(column, CELL_WIDTH))
        .collect();
    let mut output = header_line(&row(header), use_colors);

    for record in &response.data {
        let cells = columns
            .iter()
            .map(|column| cell(record.get(column.as_str())))
            .collect();
        output.push_str(&row(cells));
        output.push('\n');
    }

    let footer = match response.total {
        Some(total) => format!("\nPage {page}, {} of {total} records\n", response.data.len()),
        None => format!("\nPage {page}, {} records\n", response.data.len()),
    };
    output.push_str(&footer);
    output
}

/// JSON output structure for attribute options.
#[derive(Serialize)]
pub struct OptionsOutput<'a> {
    pub attribute: &'a str,
    pub options: &'a [AttributeOption],
}

/// Formats attribute options as JSON.
pub fn format_options_json(
    attribute: &str,
    options: &[AttributeOption],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&OptionsOutput { attribute, options })
}

/// Formats attribute options as a table.
pub fn format_options_table(options: &[AttributeOption], use_colors: bool) -> String {
    if options.is_empty() {
        return "No options found.\n".to_string();
    }

    let mut output = header_line(&format!("{:<25} {:<25} {}", "Value", "Label", "Count"), use_colors);

    for option in options {
        let count = option.count.map(|c| c.to_string()).unwrap_or_default();
        let line = format!(
            "{:<25} {:<25} {}",
            truncate_str(&option.value, 25),
            truncate_str(option.display_label(), 25),
            count
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Formats attribute descriptors as a table.
pub fn format_attributes_table(attributes: &[AttributeDescriptor], use_colors: bool) -> String {
    if attributes.is_empty() {
        return "No attributes configured.\n".to_string();
    }

    let mut output = header_line(
        &format!("{:<20} {:<20} {:<10} {}", "Name", "Label", "Type", "Parents"),
        use_colors,
    );

    for attribute in attributes {
        let mut type_name = attribute.attribute_type.to_string();
        if attribute.is_nullable {
            type_name.push('?');
        }
        let line = format!(
            "{:<20} {:<20} {:<10} {}",
            truncate_str(&attribute.name, 20),
            truncate_str(attribute.display_label(), 20),
            type_name,
            attribute.parent_filters.join(", ")
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
