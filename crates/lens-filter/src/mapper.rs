//! Logical-to-physical attribute name mapping.

use lens_api::models::{Condition, FilterGroup, FilterNode};
use serde_json::json;

use crate::context::FilterContext;
use crate::registry::AttributeRegistry;
use crate::sink::Level;

impl FilterContext<'_> {
    /// Rewrites every leaf attribute to its descriptor's `filterAttribute`.
    ///
    /// Operators, values, combinators and the tree shape are left untouched.
    /// Attributes without a descriptor pass through and are logged at debug
    /// level.
    pub fn map_attributes(&self, group: &FilterGroup) -> FilterGroup {
        FilterGroup {
            op: group.op,
            conditions: group
                .conditions
                .iter()
                .map(|node| match node {
                    FilterNode::Condition(condition) => self.map_condition(condition).into(),
                    FilterNode::Group(nested) => self.map_attributes(nested).into(),
                })
                .collect(),
        }
    }

    fn map_condition(&self, condition: &Condition) -> Condition {
        let Some(descriptor) = self.registry().get(&condition.attribute) else {
            self.log(
                Level::Debug,
                "no descriptor for attribute, keeping name",
                Some(&json!({ "attribute": condition.attribute })),
            );
            return condition.clone();
        };

        let field = descriptor.field_name();
        if field == condition.attribute {
            return condition.clone();
        }
        Condition {
            attribute: field.to_string(),
            ..condition.clone()
        }
    }
}

/// Maps attribute names to backend field names, discarding diagnostics.
///
/// # Example
///
/// ```
/// use lens_api::models::{AttributeDescriptor, AttributeType, Condition, FilterGroup, Operator};
/// use lens_filter::{map_filter_attributes, AttributeRegistry};
///
/// let registry: AttributeRegistry = [
///     AttributeDescriptor::new("owner", AttributeType::Enum).with_filter_attribute("owner_id"),
/// ]
/// .into_iter()
/// .collect();
///
/// let group = FilterGroup::and(vec![Condition::new("owner", Operator::Is, "u1").into()]);
/// let mapped = map_filter_attributes(&group, &registry);
/// assert_eq!(mapped.leaves()[0].attribute, "owner_id");
/// ```
pub fn map_filter_attributes(group: &FilterGroup, registry: &AttributeRegistry) -> FilterGroup {
    FilterContext::new(registry).map_attributes(group)
}
