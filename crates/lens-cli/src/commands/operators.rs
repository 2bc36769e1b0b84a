//! Operators command implementation.

use lens_api::models::AttributeType;
use lens_filter::{default_operator_for_type, operators_for_type};

use super::{CommandContext, CommandError, Result};
use crate::output::{format_operators_json, format_operators_table};

/// Options for the operators command.
#[derive(Debug)]
pub struct OperatorsOptions {
    pub attribute_type: String,
    pub nullable: bool,
}

/// Executes the operators command.
///
/// # Errors
///
/// Returns an input error for a type with no operators.
pub fn execute(ctx: &CommandContext, opts: &OperatorsOptions) -> Result<()> {
    let attribute_type = AttributeType::from(opts.attribute_type.trim().to_lowercase().as_str());
    let operators = operators_for_type(&attribute_type, opts.nullable);

    if operators.is_empty() {
        return Err(CommandError::Input(format!(
            "Unknown attribute type '{}'. Known types: string, text, longtext, integer, \
             number, decimal, date, datetime, timestamp, boolean, enum",
            opts.attribute_type
        )));
    }

    let default_operator = default_operator_for_type(&attribute_type);

    if ctx.json_output {
        let output = format_operators_json(&attribute_type, &default_operator, &operators)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output =
            format_operators_table(&attribute_type, &default_operator, &operators, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
