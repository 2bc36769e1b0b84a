//! Integration tests for the filter engine's observable properties.
//!
//! Idempotent cleaning and shape-preserving mapping are checked as proptest
//! properties over trees up to five levels deep. The rest pins the empty
//! representations, pruning, cascade clearing and parent constraints.

use lens_api::models::{
    AttributeDescriptor, AttributeType, Combinator, Condition, ConditionValue, Filter,
    FilterGroup, FilterNode, Operator,
};
use lens_filter::{
    build_parent_constraint, clean_filter_group, is_filters_empty, map_filter_attributes,
    parent_constraint_for, process_filters_for_api, update_condition, AttributeRegistry,
    CascadeOptions,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies
// ============================================================================

const ATTRIBUTES: &[&str] = &["", "status", "age", "state", "city"];
const OPERATORS: &[Operator] = &[
    Operator::Is,
    Operator::GreaterThan,
    Operator::IsAnyOf,
    Operator::IsEmpty,
    Operator::IsTrue,
];

fn arb_combinator() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

/// Values mix blanks, scalars and lists so both pruning paths are hit.
fn arb_value() -> impl Strategy<Value = Option<ConditionValue>> {
    prop_oneof![
        Just(None),
        Just(Some(ConditionValue::from(""))),
        Just(Some(ConditionValue::from("CA"))),
        (0..100i64).prop_map(|n| Some(ConditionValue::from(n))),
        Just(Some(ConditionValue::from(vec!["LA", ""]))),
    ]
}

prop_compose! {
    fn arb_condition()(
        attribute in prop::sample::select(ATTRIBUTES),
        op in prop::option::of(prop::sample::select(OPERATORS)),
        value in arb_value(),
    ) -> Condition {
        Condition {
            attribute: attribute.to_string(),
            op,
            value,
        }
    }
}

/// Groups nested up to five levels deep, including empty ones.
fn arb_group() -> impl Strategy<Value = FilterGroup> {
    let flat = (
        arb_combinator(),
        prop::collection::vec(arb_condition().prop_map(FilterNode::from), 0..4),
    )
        .prop_map(|(op, conditions)| FilterGroup::new(op, conditions));

    flat.prop_recursive(4, 64, 4, |inner| {
        let node = prop_oneof![
            2 => arb_condition().prop_map(FilterNode::from),
            1 => inner.prop_map(FilterNode::from),
        ];
        (arb_combinator(), prop::collection::vec(node, 0..4))
            .prop_map(|(op, conditions)| FilterGroup::new(op, conditions))
    })
}

fn assert_no_empty_groups(group: &FilterGroup) {
    for node in &group.conditions {
        match node {
            FilterNode::Group(nested) => {
                assert!(!nested.conditions.is_empty(), "empty nested group survived");
                assert_no_empty_groups(nested);
            }
            FilterNode::Condition(condition) => {
                assert!(!condition.attribute.is_empty(), "blank attribute survived");
            }
        }
    }
}

fn geo_registry() -> AttributeRegistry {
    [
        AttributeDescriptor::new("state", AttributeType::Enum).with_filter_attribute("state_code"),
        AttributeDescriptor::new("city", AttributeType::Enum)
            .with_parents(["state"])
            .with_filter_attribute("city_id"),
        AttributeDescriptor::new("status", AttributeType::Enum),
        AttributeDescriptor::new("age", AttributeType::Integer).nullable(),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_cleaning_is_idempotent(group in arb_group()) {
        let once = process_filters_for_api(&Filter::from(group));
        prop_assert!(once.is_some());
        let once = once.unwrap_or_default();
        let twice = process_filters_for_api(&Filter::from(once.clone()));

        prop_assert_eq!(Some(&once), twice.as_ref());
        assert_no_empty_groups(&once);
    }

    #[test]
    fn prop_mapping_is_shape_preserving(group in arb_group()) {
        let registry = geo_registry();
        let mapped = map_filter_attributes(&group, &registry);
        assert_same_shape(&group, &mapped, &registry);
    }
}

#[test]
fn test_empty_representations_are_equivalent() {
    let sentinel: Filter = serde_json::from_value(json!({})).unwrap();
    let empty_group: Filter = serde_json::from_value(json!({"op": "and", "conditions": []})).unwrap();
    let blank_only: Filter = serde_json::from_value(json!({
        "op": "and",
        "conditions": [{"attribute": "", "op": "is", "value": "x"}]
    }))
    .unwrap();

    assert!(is_filters_empty(&sentinel));
    assert!(is_filters_empty(&empty_group));
    assert!(is_filters_empty(&blank_only));

    // Both stay distinct on the wire.
    assert_eq!(serde_json::to_value(&sentinel).unwrap(), json!({}));
    assert_eq!(
        serde_json::to_value(&empty_group).unwrap(),
        json!({"op": "and", "conditions": []})
    );
}

#[test]
fn test_value_required_pruning() {
    let filter: Filter = serde_json::from_value(json!({
        "op": "and",
        "conditions": [
            {"attribute": "age", "op": "greater_than", "value": ""},
            {"attribute": "email", "op": "is_empty"},
            {"attribute": "name", "op": "contains", "value": null}
        ]
    }))
    .unwrap();

    let cleaned = process_filters_for_api(&filter).unwrap();
    assert_eq!(
        serde_json::to_value(&cleaned).unwrap(),
        json!({"op": "and", "conditions": [{"attribute": "email", "op": "is_empty"}]})
    );
}

#[test]
fn test_nested_pruning_propagates() {
    let group = FilterGroup::and(vec![
        Condition::new("status", Operator::Is, "open").into(),
        FilterGroup::or(vec![FilterGroup::and(vec![
            Condition::new("age", Operator::GreaterThan, "").into(),
        ])
        .into()])
        .into(),
    ]);

    let cleaned = clean_filter_group(&group);
    assert_eq!(
        cleaned,
        FilterGroup::and(vec![Condition::new("status", Operator::Is, "open").into()])
    );
}

#[test]
fn test_cascade_clears_descendants() {
    let registry = geo_registry();
    let group = FilterGroup::and(vec![
        Condition::new("state", Operator::Is, "CA").into(),
        Condition::new("city", Operator::IsAnyOf, vec!["LA"]).into(),
    ]);

    let updated = update_condition(
        &group,
        &[0],
        Condition::new("state", Operator::Is, "NV"),
        &registry,
        CascadeOptions::unique(),
    )
    .unwrap();

    let city = updated.node_at(&[1]).and_then(FilterNode::as_condition).unwrap();
    assert_eq!(city.attribute, "city");
    assert_eq!(city.op, Some(Operator::IsAnyOf));
    assert!(city.value.is_none());

    // The cleared row is dropped from the payload but kept in the editor.
    assert_eq!(clean_filter_group(&updated).conditions.len(), 1);
    assert_eq!(updated.conditions.len(), 2);
}

#[test]
fn test_parent_constraint_construction() {
    let registry = geo_registry();
    let city = registry.get("city").unwrap();

    let with_state = FilterGroup::and(vec![Condition::new("state", Operator::Is, "CA").into()]);
    let constraint = build_parent_constraint(city, &with_state).unwrap();
    assert_eq!(
        serde_json::to_value(&constraint).unwrap(),
        json!({
            "op": "and",
            "conditions": [{"attribute": "state", "op": "is_any_of", "value": ["CA"]}]
        })
    );

    let without_state = FilterGroup::and(vec![Condition::new("status", Operator::Is, "x").into()]);
    assert!(parent_constraint_for("city", &registry, &without_state).is_none());
}

fn assert_same_shape(original: &FilterGroup, mapped: &FilterGroup, registry: &AttributeRegistry) {
    assert_eq!(original.op, mapped.op);
    assert_eq!(original.conditions.len(), mapped.conditions.len());

    for (before, after) in original.conditions.iter().zip(&mapped.conditions) {
        match (before, after) {
            (FilterNode::Group(a), FilterNode::Group(b)) => assert_same_shape(a, b, registry),
            (FilterNode::Condition(a), FilterNode::Condition(b)) => {
                assert_eq!(a.op, b.op);
                assert_eq!(a.value, b.value);
                let expected = registry
                    .get(&a.attribute)
                    .map_or(a.attribute.as_str(), AttributeDescriptor::field_name);
                assert_eq!(b.attribute, expected);
            }
            _ => panic!("node kind changed during mapping"),
        }
    }
}
