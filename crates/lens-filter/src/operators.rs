//! Operator registry: which operators apply to which attribute types.
//!
//! The tables are ordered; the first entry of a type is its fallback default
//! operator. Nullable attributes additionally get `is_empty`/`is_not_empty`.

use lens_api::models::{AttributeDescriptor, AttributeType, Condition, Operator};

/// One selectable operator of an attribute type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDefinition {
    pub value: Operator,
    pub label: &'static str,
    pub requires_value: bool,
}

impl OperatorDefinition {
    const fn new(value: Operator, label: &'static str, requires_value: bool) -> Self {
        Self {
            value,
            label,
            requires_value,
        }
    }
}

const TEXT_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::Contains, "contains", true),
    OperatorDefinition::new(Operator::DoesNotContain, "does not contain", true),
    OperatorDefinition::new(Operator::Is, "is", true),
    OperatorDefinition::new(Operator::IsNot, "is not", true),
    OperatorDefinition::new(Operator::StartsWith, "starts with", true),
    OperatorDefinition::new(Operator::EndsWith, "ends with", true),
];

const NUMBER_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::Is, "=", true),
    OperatorDefinition::new(Operator::IsNot, "≠", true),
    OperatorDefinition::new(Operator::GreaterThan, ">", true),
    OperatorDefinition::new(Operator::GreaterThanOrEqual, "≥", true),
    OperatorDefinition::new(Operator::LessThan, "<", true),
    OperatorDefinition::new(Operator::LessThanOrEqual, "≤", true),
    OperatorDefinition::new(Operator::Between, "between", true),
];

const DATE_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::Is, "is", true),
    OperatorDefinition::new(Operator::IsBefore, "is before", true),
    OperatorDefinition::new(Operator::IsAfter, "is after", true),
    OperatorDefinition::new(Operator::IsOnOrBefore, "is on or before", true),
    OperatorDefinition::new(Operator::IsOnOrAfter, "is on or after", true),
    OperatorDefinition::new(Operator::Between, "is between", true),
    OperatorDefinition::new(Operator::InLast, "in the last", true),
    OperatorDefinition::new(Operator::InNext, "in the next", true),
];

const BOOLEAN_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::IsTrue, "is true", false),
    OperatorDefinition::new(Operator::IsFalse, "is false", false),
];

const ENUM_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::IsAnyOf, "is any of", true),
    OperatorDefinition::new(Operator::IsNoneOf, "is none of", true),
    OperatorDefinition::new(Operator::Is, "is", true),
    OperatorDefinition::new(Operator::IsNot, "is not", true),
];

const NULLABLE_OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition::new(Operator::IsEmpty, "is empty", false),
    OperatorDefinition::new(Operator::IsNotEmpty, "is not empty", false),
];

/// Returns the base operator table of a type; empty for unknown types.
fn type_operators(attribute_type: &AttributeType) -> &'static [OperatorDefinition] {
    match attribute_type {
        AttributeType::String | AttributeType::Text | AttributeType::LongText => TEXT_OPERATORS,
        AttributeType::Integer | AttributeType::Number | AttributeType::Decimal => {
            NUMBER_OPERATORS
        }
        AttributeType::Date | AttributeType::DateTime | AttributeType::Timestamp => {
            DATE_OPERATORS
        }
        AttributeType::Boolean => BOOLEAN_OPERATORS,
        AttributeType::Enum => ENUM_OPERATORS,
        AttributeType::Other(_) => &[],
    }
}

/// Returns the operators available for a type, in display order.
///
/// Unknown types yield an empty list.
///
/// # Examples
///
/// ```
/// use lens_api::models::{AttributeType, Operator};
/// use lens_filter::operators_for_type;
///
/// let ops = operators_for_type(&AttributeType::Boolean, true);
/// let names: Vec<&str> = ops.iter().map(|d| d.value.as_str()).collect();
/// assert_eq!(names, ["is_true", "is_false", "is_empty", "is_not_empty"]);
/// ```
pub fn operators_for_type(
    attribute_type: &AttributeType,
    is_nullable: bool,
) -> Vec<OperatorDefinition> {
    let base = type_operators(attribute_type);
    if base.is_empty() {
        return Vec::new();
    }

    let mut operators = base.to_vec();
    if is_nullable {
        operators.extend_from_slice(NULLABLE_OPERATORS);
    }
    operators
}

/// Returns the operator a new condition of this type starts with.
pub fn default_operator_for_type(attribute_type: &AttributeType) -> Operator {
    match attribute_type {
        AttributeType::Enum => Operator::IsAnyOf,
        AttributeType::Boolean => Operator::IsTrue,
        AttributeType::String | AttributeType::Text => Operator::Contains,
        other => type_operators(other)
            .first()
            .map(|definition| definition.value.clone())
            .unwrap_or(Operator::Is),
    }
}

/// Returns true if `operator` needs a value for attributes of this type.
///
/// Operators missing from the type table are checked against the nullable
/// operators; anything still unknown requires a value.
pub fn operator_requires_value(attribute_type: &AttributeType, operator: &Operator) -> bool {
    type_operators(attribute_type)
        .iter()
        .chain(NULLABLE_OPERATORS)
        .find(|definition| definition.value == *operator)
        .map(|definition| definition.requires_value)
        .unwrap_or(true)
}

/// Returns true if the operator takes a two-element range.
pub fn operator_expects_range(operator: &Operator) -> bool {
    matches!(operator, Operator::Between)
}

/// Returns true if the operator takes a list of values.
pub fn operator_expects_multiple(operator: &Operator) -> bool {
    matches!(operator, Operator::IsAnyOf | Operator::IsNoneOf)
}

/// Returns true if the operator is meaningful without a value.
///
/// This is the set the cleaner uses to keep value-less conditions.
pub fn is_value_free(operator: &Operator) -> bool {
    matches!(
        operator,
        Operator::IsEmpty | Operator::IsNotEmpty | Operator::IsTrue | Operator::IsFalse
    )
}

/// Returns the display label of an operator for a type, falling back to its wire name.
pub fn operator_label<'a>(attribute_type: &AttributeType, operator: &'a Operator) -> &'a str {
    type_operators(attribute_type)
        .iter()
        .chain(NULLABLE_OPERATORS)
        .find(|definition| definition.value == *operator)
        .map(|definition| definition.label)
        .unwrap_or_else(|| operator.as_str())
}

/// Creates the blank condition a picker adds for `descriptor`.
///
/// The descriptor's own default operator wins over the type default.
pub fn new_condition_for(descriptor: &AttributeDescriptor) -> Condition {
    let op = descriptor
        .default_operator
        .clone()
        .unwrap_or_else(|| default_operator_for_type(&descriptor.attribute_type));

    Condition {
        attribute: descriptor.name.clone(),
        op: Some(op),
        value: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ops: &[OperatorDefinition]) -> Vec<&str> {
        ops.iter().map(|d| d.value.as_str()).collect()
    }

    #[test]
    fn test_text_types_share_a_table() {
        let string_ops = operators_for_type(&AttributeType::String, false);
        assert_eq!(string_ops, operators_for_type(&AttributeType::Text, false));
        assert_eq!(string_ops, operators_for_type(&AttributeType::LongText, false));
        assert_eq!(string_ops[0].value, Operator::Contains);
    }

    #[test]
    fn test_nullable_appends_emptiness_operators() {
        let ops = operators_for_type(&AttributeType::Integer, true);
        let names = names(&ops);
        assert_eq!(names[names.len() - 2..], ["is_empty", "is_not_empty"]);
        assert!(!ops.last().unwrap().requires_value);
    }

    #[test]
    fn test_non_nullable_has_no_emptiness_operators() {
        let ops = operators_for_type(&AttributeType::Date, false);
        assert!(!names(&ops).contains(&"is_empty"));
    }

    #[test]
    fn test_unknown_type_has_no_operators() {
        let unknown = AttributeType::Other("geo_point".to_string());
        assert!(operators_for_type(&unknown, true).is_empty());
    }

    #[test]
    fn test_default_operator_overrides() {
        assert_eq!(default_operator_for_type(&AttributeType::Enum), Operator::IsAnyOf);
        assert_eq!(default_operator_for_type(&AttributeType::Boolean), Operator::IsTrue);
        assert_eq!(default_operator_for_type(&AttributeType::String), Operator::Contains);
        assert_eq!(default_operator_for_type(&AttributeType::Text), Operator::Contains);
    }

    #[test]
    fn test_default_operator_falls_back_to_first_then_is() {
        assert_eq!(default_operator_for_type(&AttributeType::Integer), Operator::Is);
        assert_eq!(default_operator_for_type(&AttributeType::DateTime), Operator::Is);
        assert_eq!(default_operator_for_type(&AttributeType::LongText), Operator::Contains);
        assert_eq!(
            default_operator_for_type(&AttributeType::Other("x".to_string())),
            Operator::Is
        );
    }

    #[test]
    fn test_requires_value_from_table() {
        assert!(operator_requires_value(&AttributeType::Integer, &Operator::GreaterThan));
        assert!(!operator_requires_value(&AttributeType::Boolean, &Operator::IsTrue));
    }

    #[test]
    fn test_requires_value_nullable_fallback() {
        // Not in the text table, but a known nullable operator.
        assert!(!operator_requires_value(&AttributeType::String, &Operator::IsEmpty));
        assert!(!operator_requires_value(
            &AttributeType::Other("x".to_string()),
            &Operator::IsNotEmpty
        ));
    }

    #[test]
    fn test_requires_value_defaults_to_true() {
        assert!(operator_requires_value(
            &AttributeType::String,
            &Operator::Other("sounds_like".to_string())
        ));
        assert!(operator_requires_value(&AttributeType::Boolean, &Operator::Between));
    }

    #[test]
    fn test_range_and_multiple() {
        assert!(operator_expects_range(&Operator::Between));
        assert!(!operator_expects_range(&Operator::IsAnyOf));
        assert!(operator_expects_multiple(&Operator::IsAnyOf));
        assert!(operator_expects_multiple(&Operator::IsNoneOf));
        assert!(!operator_expects_multiple(&Operator::Is));
    }

    #[test]
    fn test_value_free_set() {
        for op in [Operator::IsEmpty, Operator::IsNotEmpty, Operator::IsTrue, Operator::IsFalse] {
            assert!(is_value_free(&op), "{op} should be value-free");
        }
        assert!(!is_value_free(&Operator::Is));
    }

    #[test]
    fn test_operator_label() {
        assert_eq!(operator_label(&AttributeType::Number, &Operator::GreaterThan), ">");
        assert_eq!(operator_label(&AttributeType::Enum, &Operator::IsEmpty), "is empty");
        let custom = Operator::Other("near".to_string());
        assert_eq!(operator_label(&AttributeType::String, &custom), "near");
    }

    #[test]
    fn test_new_condition_for_uses_descriptor_default() {
        let descriptor = AttributeDescriptor::new("status", AttributeType::Enum)
            .with_default_operator(Operator::Is);
        let condition = new_condition_for(&descriptor);

        assert_eq!(condition.attribute, "status");
        assert_eq!(condition.op, Some(Operator::Is));
        assert!(condition.value.is_none());
    }

    #[test]
    fn test_new_condition_for_uses_type_default() {
        let descriptor = AttributeDescriptor::new("active", AttributeType::Boolean);
        assert_eq!(new_condition_for(&descriptor).op, Some(Operator::IsTrue));
    }
}
