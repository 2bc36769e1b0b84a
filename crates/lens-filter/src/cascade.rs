//! Cascading parent/child constraints between attributes.
//!
//! An attribute may declare `parentFilters`: other attributes whose selected
//! values scope its options (a city list scoped by state). Two operations
//! follow from that graph:
//!
//! - **cascade clear**: when a parent condition changes in unique-filters
//!   mode, the values of its dependents (and their dependents) are cleared so
//!   no stale child selection survives;
//! - **parent constraint**: the filter sent with an option fetch, built from
//!   the parents' current values.

use std::collections::{HashSet, VecDeque};

use lens_api::models::{
    AttributeDescriptor, Condition, ConditionValue, FilterGroup, FilterNode, LensConfig, Operator,
};
use serde_json::json;

use crate::context::FilterContext;
use crate::error::{FilterError, FilterResult};
use crate::registry::AttributeRegistry;
use crate::sink::Level;

/// Switches for cascade behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeOptions {
    /// One condition per attribute; cascade clearing only runs in this mode.
    pub unique_filters: bool,
}

impl CascadeOptions {
    pub fn unique() -> Self {
        Self {
            unique_filters: true,
        }
    }

    pub fn from_config(config: &LensConfig) -> Self {
        Self {
            unique_filters: config.unique_filters,
        }
    }
}

/// An edit of one node: what was there before and what replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionChange {
    pub previous: FilterNode,
    pub next: FilterNode,
}

impl ConditionChange {
    pub fn new(previous: impl Into<FilterNode>, next: impl Into<FilterNode>) -> Self {
        Self {
            previous: previous.into(),
            next: next.into(),
        }
    }
}

/// Canonical JSON text of a value, used for change detection.
///
/// The comparison is textual: `"CA"` and `["CA"]` differ.
fn value_key(value: Option<&ConditionValue>) -> Option<String> {
    value.and_then(|v| serde_json::to_string(v).ok())
}

/// Returns the attributes whose selection changed between two leaves.
///
/// A renamed condition changes both its old and new attribute; otherwise the
/// attribute changed only if its value did. Operator-only edits change nothing.
pub fn changed_attributes(previous: &Condition, next: &Condition) -> Vec<String> {
    if previous.attribute != next.attribute {
        return [&next.attribute, &previous.attribute]
            .into_iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect();
    }

    if value_key(previous.value.as_ref()) != value_key(next.value.as_ref()) {
        vec![next.attribute.clone()]
    } else {
        Vec::new()
    }
}

/// Clears the value of every leaf named `attribute`; true if any had one.
fn clear_values(group: &mut FilterGroup, attribute: &str) -> bool {
    let mut cleared = false;
    for node in &mut group.conditions {
        match node {
            FilterNode::Condition(condition) if condition.attribute == attribute => {
                cleared |= condition.value.take().is_some();
            }
            FilterNode::Condition(_) => {}
            FilterNode::Group(nested) => cleared |= clear_values(nested, attribute),
        }
    }
    cleared
}

/// Collects the distinct non-empty leaf attributes in depth-first order.
pub fn used_attributes(group: &FilterGroup) -> Vec<String> {
    let mut seen = HashSet::new();
    group
        .leaves()
        .into_iter()
        .map(|condition| condition.attribute.as_str())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Returns the attributes an "add condition" picker should offer.
///
/// In unique mode attributes already used in the tree are hidden.
pub fn available_attributes<'r>(
    group: &FilterGroup,
    registry: &'r AttributeRegistry,
    unique_filters: bool,
) -> Vec<&'r AttributeDescriptor> {
    if !unique_filters {
        return registry.iter().collect();
    }
    let used = used_attributes(group);
    registry
        .iter()
        .filter(|descriptor| !used.contains(&descriptor.name))
        .collect()
}

/// Builds the constraint that scopes `descriptor`'s options by its parents.
///
/// For each parent the first leaf (depth-first) naming it with a non-empty
/// value contributes an `is_any_of` condition. Returns `None` when no parent
/// has a value.
///
/// # Example
///
/// ```
/// use lens_api::models::{AttributeDescriptor, AttributeType, Condition, FilterGroup, Operator};
/// use lens_filter::build_parent_constraint;
///
/// let city = AttributeDescriptor::new("city", AttributeType::Enum).with_parents(["state"]);
/// let filters = FilterGroup::and(vec![Condition::new("state", Operator::Is, "CA").into()]);
///
/// let constraint = build_parent_constraint(&city, &filters).unwrap();
/// assert_eq!(
///     constraint.conditions,
///     vec![Condition::new("state", Operator::IsAnyOf, vec!["CA"]).into()],
/// );
/// ```
pub fn build_parent_constraint(
    descriptor: &AttributeDescriptor,
    group: &FilterGroup,
) -> Option<FilterGroup> {
    let leaves = group.leaves();
    let conditions: Vec<FilterNode> = descriptor
        .parent_filters
        .iter()
        .filter_map(|parent| {
            let values = leaves
                .iter()
                .filter(|condition| condition.attribute == *parent)
                .filter_map(|condition| condition.value.as_ref())
                .map(ConditionValue::to_strings)
                .find(|values| !values.is_empty())?;
            Some(Condition::new(parent.as_str(), Operator::IsAnyOf, values).into())
        })
        .collect();

    (!conditions.is_empty()).then(|| FilterGroup::and(conditions))
}

impl FilterContext<'_> {
    /// Clears dependents of the attributes changed by `change`.
    ///
    /// Runs only in unique mode and only for leaf-to-leaf edits. Clearing is
    /// transitive: a cleared child clears its own children. Rows are kept,
    /// only their values are removed.
    pub fn cascade_clear(
        &self,
        group: &FilterGroup,
        change: &ConditionChange,
        options: CascadeOptions,
    ) -> FilterGroup {
        let mut result = group.clone();
        if !options.unique_filters {
            return result;
        }
        let (FilterNode::Condition(previous), FilterNode::Condition(next)) =
            (&change.previous, &change.next)
        else {
            return result;
        };

        let changed = changed_attributes(previous, next);
        let mut seen: HashSet<String> = changed.iter().cloned().collect();
        let mut queue: VecDeque<String> = changed.into_iter().collect();

        while let Some(parent) = queue.pop_front() {
            for dependent in self.registry().dependents_of(&parent) {
                if seen.contains(&dependent.name) {
                    continue;
                }
                if clear_values(&mut result, &dependent.name) {
                    self.log(
                        Level::Debug,
                        "cleared dependent condition",
                        Some(&json!({ "attribute": dependent.name, "parent": parent })),
                    );
                    seen.insert(dependent.name.clone());
                    queue.push_back(dependent.name.clone());
                }
            }
        }

        result
    }

    /// Replaces the leaf at `path` and applies [`FilterContext::cascade_clear`].
    pub fn update_condition(
        &self,
        group: &FilterGroup,
        path: &[usize],
        condition: Condition,
        options: CascadeOptions,
    ) -> FilterResult<FilterGroup> {
        let mut updated = group.clone();
        let node = updated
            .node_at_mut(path)
            .ok_or_else(|| FilterError::invalid_path(path))?;

        let previous = match node {
            FilterNode::Condition(previous) => previous.clone(),
            FilterNode::Group(_) => {
                return Err(FilterError::NotACondition {
                    path: path.to_vec(),
                })
            }
        };
        *node = FilterNode::Condition(condition.clone());

        let change = ConditionChange::new(previous, condition);
        Ok(self.cascade_clear(&updated, &change, options))
    }

    /// Looks up `attribute` and builds its parent constraint.
    ///
    /// An unknown attribute is logged as a warning and yields `None`.
    pub fn parent_constraint_for(&self, attribute: &str, group: &FilterGroup) -> Option<FilterGroup> {
        match self.registry().get(attribute) {
            Some(descriptor) => build_parent_constraint(descriptor, group),
            None => {
                self.log(
                    Level::Warn,
                    "no attribute descriptor found",
                    Some(&json!({ "attribute": attribute })),
                );
                None
            }
        }
    }
}

/// [`FilterContext::cascade_clear`] discarding diagnostics.
pub fn cascade_clear(
    group: &FilterGroup,
    change: &ConditionChange,
    registry: &AttributeRegistry,
    options: CascadeOptions,
) -> FilterGroup {
    FilterContext::new(registry).cascade_clear(group, change, options)
}

/// [`FilterContext::update_condition`] discarding diagnostics.
pub fn update_condition(
    group: &FilterGroup,
    path: &[usize],
    condition: Condition,
    registry: &AttributeRegistry,
    options: CascadeOptions,
) -> FilterResult<FilterGroup> {
    FilterContext::new(registry).update_condition(group, path, condition, options)
}

/// [`FilterContext::parent_constraint_for`] discarding diagnostics.
pub fn parent_constraint_for(
    attribute: &str,
    registry: &AttributeRegistry,
    group: &FilterGroup,
) -> Option<FilterGroup> {
    FilterContext::new(registry).parent_constraint_for(attribute, group)
}
