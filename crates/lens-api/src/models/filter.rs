//! Filter tree models.
//!
//! These types describe the filter payload exchanged with the Lens backend and
//! stored in a view's `config.filters`. The wire shape is structural: an object
//! with a `conditions` key is a group, anything else is a leaf condition. In
//! Rust the distinction is carried by [`FilterNode`] so consumers can match on
//! it exhaustively.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Comparison operator of a single condition.
///
/// Operators serialize to their snake_case wire names (e.g. `IsAnyOf` →
/// `"is_any_of"`). Names the client does not know are preserved in
/// [`Operator::Other`] instead of failing to decode.
///
/// # Examples
///
/// ```
/// use lens_api::models::Operator;
///
/// let op: Operator = serde_json::from_str("\"greater_than\"").unwrap();
/// assert_eq!(op, Operator::GreaterThan);
///
/// let unknown: Operator = serde_json::from_str("\"near\"").unwrap();
/// assert_eq!(unknown, Operator::Other("near".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    // Equality
    Is,
    IsNot,

    // Text containment
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,

    // Comparison
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,

    /// Inclusive range, value is a two-element list.
    Between,

    // Set membership
    IsAnyOf,
    IsNoneOf,

    // Emptiness
    IsEmpty,
    IsNotEmpty,

    // Boolean truth
    IsTrue,
    IsFalse,

    // Dates
    IsBefore,
    IsAfter,
    IsOnOrBefore,
    IsOnOrAfter,

    /// Relative date window ending now (value is an amount such as `7` or `"7d"`).
    InLast,
    /// Relative date window starting now.
    InNext,

    /// An operator name this client does not recognise.
    Other(String),
}

impl Operator {
    /// Returns the wire name of the operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "is_not",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "does_not_contain",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThan => "less_than",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Between => "between",
            Operator::IsAnyOf => "is_any_of",
            Operator::IsNoneOf => "is_none_of",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
            Operator::IsTrue => "is_true",
            Operator::IsFalse => "is_false",
            Operator::IsBefore => "is_before",
            Operator::IsAfter => "is_after",
            Operator::IsOnOrBefore => "is_on_or_before",
            Operator::IsOnOrAfter => "is_on_or_after",
            Operator::InLast => "in_last",
            Operator::InNext => "in_next",
            Operator::Other(name) => name,
        }
    }
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        match name {
            "is" => Operator::Is,
            "is_not" => Operator::IsNot,
            "contains" => Operator::Contains,
            "does_not_contain" => Operator::DoesNotContain,
            "starts_with" => Operator::StartsWith,
            "ends_with" => Operator::EndsWith,
            "greater_than" => Operator::GreaterThan,
            "greater_than_or_equal" => Operator::GreaterThanOrEqual,
            "less_than" => Operator::LessThan,
            "less_than_or_equal" => Operator::LessThanOrEqual,
            "between" => Operator::Between,
            "is_any_of" => Operator::IsAnyOf,
            "is_none_of" => Operator::IsNoneOf,
            "is_empty" => Operator::IsEmpty,
            "is_not_empty" => Operator::IsNotEmpty,
            "is_true" => Operator::IsTrue,
            "is_false" => Operator::IsFalse,
            "is_before" => Operator::IsBefore,
            "is_after" => Operator::IsAfter,
            "is_on_or_before" => Operator::IsOnOrBefore,
            "is_on_or_after" => Operator::IsOnOrAfter,
            "in_last" => Operator::InLast,
            "in_next" => Operator::InNext,
            other => Operator::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Operator::from(name.as_str()))
    }
}

/// Logical combinator of a filter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => f.write_str("and"),
            Combinator::Or => f.write_str("or"),
        }
    }
}

/// Value of a condition: a scalar or a list of values.
///
/// Ranges are two-element lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<ConditionValue>),
}

impl ConditionValue {
    /// Returns true for the empty string, the one value that counts as "no value".
    pub fn is_blank(&self) -> bool {
        matches!(self, ConditionValue::Text(s) if s.is_empty())
    }

    /// Flattens the value into a list of strings.
    ///
    /// Scalars become a single-element list, lists are flattened recursively and
    /// empty strings are skipped.
    pub fn to_strings(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_strings(&mut out);
        out
    }

    fn collect_strings(&self, out: &mut Vec<String>) {
        match self {
            ConditionValue::List(values) => {
                for value in values {
                    value.collect_strings(out);
                }
            }
            ConditionValue::Text(s) if s.is_empty() => {}
            scalar => out.push(scalar.to_string()),
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Bool(b) => write!(f, "{b}"),
            ConditionValue::Number(n) => write!(f, "{n}"),
            ConditionValue::Text(s) => f.write_str(s),
            ConditionValue::List(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Text(value)
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        ConditionValue::Bool(value)
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Number(value.into())
    }
}

impl<T: Into<ConditionValue>> From<Vec<T>> for ConditionValue {
    fn from(values: Vec<T>) -> Self {
        ConditionValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// A single leaf predicate: attribute, operator, value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    /// Attribute name from the registry. Missing on the wire decodes as empty.
    #[serde(default)]
    pub attribute: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<Operator>,

    /// Absent and `null` both decode to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
}

impl Condition {
    /// Creates a condition with an operator and a value.
    pub fn new(
        attribute: impl Into<String>,
        op: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            op: Some(op),
            value: Some(value.into()),
        }
    }

    /// Creates a condition for a value-free operator such as `is_empty`.
    pub fn without_value(attribute: impl Into<String>, op: Operator) -> Self {
        Self {
            attribute: attribute.into(),
            op: Some(op),
            value: None,
        }
    }

    /// Returns true if the value is missing or the empty string.
    pub fn has_empty_value(&self) -> bool {
        self.value.as_ref().map_or(true, ConditionValue::is_blank)
    }
}

/// A node of the filter tree: a leaf condition or a nested group.
///
/// An object with a `conditions` key decodes as a group, anything else as a
/// condition. Decoding never fails: a node that does not fit its shape (an
/// object value, a `null` list element, a non-object) becomes a blank
/// condition, which the cleaner prunes without touching its siblings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(FilterGroup),
    Condition(Condition),
}

impl FilterNode {
    /// Decodes one node, falling back to a blank condition.
    fn from_value(value: Value) -> Self {
        if value.get("conditions").is_some() {
            return serde_json::from_value::<FilterGroup>(value)
                .map(FilterNode::Group)
                .unwrap_or_else(|_| Condition::default().into());
        }
        FilterNode::Condition(serde_json::from_value(value).unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for FilterNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FilterNode::from_value)
    }
}

/// Decodes a child list node by node so one bad child cannot fail its group.
fn deserialize_nodes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<FilterNode>, D::Error> {
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(FilterNode::from_value).collect())
}

impl FilterNode {
    /// Returns the condition if this node is a leaf.
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            FilterNode::Condition(condition) => Some(condition),
            FilterNode::Group(_) => None,
        }
    }

    /// Returns the group if this node is a nested group.
    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            FilterNode::Group(group) => Some(group),
            FilterNode::Condition(_) => None,
        }
    }
}

impl From<Condition> for FilterNode {
    fn from(condition: Condition) -> Self {
        FilterNode::Condition(condition)
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(group: FilterGroup) -> Self {
        FilterNode::Group(group)
    }
}

/// An AND/OR combination of conditions and nested groups.
///
/// # Examples
///
/// ```
/// use lens_api::models::{Condition, FilterGroup, Operator};
///
/// let group = FilterGroup::and(vec![
///     Condition::new("status", Operator::Is, "open").into(),
///     FilterGroup::or(vec![
///         Condition::new("age", Operator::GreaterThan, 30i64).into(),
///         Condition::without_value("age", Operator::IsEmpty).into(),
///     ])
///     .into(),
/// ]);
/// assert_eq!(group.leaves().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(default)]
    pub op: Combinator,
    #[serde(deserialize_with = "deserialize_nodes")]
    pub conditions: Vec<FilterNode>,
}

impl FilterGroup {
    /// Creates a group with the given combinator.
    pub fn new(op: Combinator, conditions: Vec<FilterNode>) -> Self {
        Self { op, conditions }
    }

    /// Creates an AND group.
    pub fn and(conditions: Vec<FilterNode>) -> Self {
        Self::new(Combinator::And, conditions)
    }

    /// Creates an OR group.
    pub fn or(conditions: Vec<FilterNode>) -> Self {
        Self::new(Combinator::Or, conditions)
    }

    /// Returns true if the group has no children at all.
    ///
    /// This is a shallow check; use the cleaner to decide whether a group is
    /// effectively empty.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns every leaf condition, depth-first in document order.
    pub fn leaves(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        for node in &self.conditions {
            match node {
                FilterNode::Condition(condition) => out.push(condition),
                FilterNode::Group(group) => group.collect_leaves(out),
            }
        }
    }

    /// Returns the node at an index path (`[0, 2]` is the third child of the
    /// first child). An empty path has no node.
    pub fn node_at(&self, path: &[usize]) -> Option<&FilterNode> {
        let (&last, parents) = path.split_last()?;
        let mut group = self;
        for &index in parents {
            group = group.conditions.get(index)?.as_group()?;
        }
        group.conditions.get(last)
    }

    /// Mutable variant of [`FilterGroup::node_at`].
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut FilterNode> {
        let (&last, parents) = path.split_last()?;
        let mut group = self;
        for &index in parents {
            group = match group.conditions.get_mut(index)? {
                FilterNode::Group(inner) => inner,
                FilterNode::Condition(_) => return None,
            };
        }
        group.conditions.get_mut(last)
    }
}

/// A complete filter: a group, or the empty sentinel `{}`.
///
/// Any object lacking both `op` and `conditions` (and `null`) decodes as
/// [`Filter::Empty`], which encodes back to `{}`.
///
/// # Examples
///
/// ```
/// use lens_api::models::Filter;
///
/// let empty: Filter = serde_json::from_str("{}").unwrap();
/// assert_eq!(empty, Filter::Empty);
/// assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
///
/// let group: Filter = serde_json::from_str(r#"{"op":"or","conditions":[]}"#).unwrap();
/// assert!(group.as_group().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    #[default]
    Empty,
    Group(FilterGroup),
}

impl Filter {
    /// Returns the group, if any.
    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            Filter::Group(group) => Some(group),
            Filter::Empty => None,
        }
    }
}

impl From<FilterGroup> for Filter {
    fn from(group: FilterGroup) -> Self {
        Filter::Group(group)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Filter::Empty => serializer.serialize_map(Some(0))?.end(),
            Filter::Group(group) => group.serialize(serializer),
        }
    }
}

/// Loose decoding shape for [`Filter`]: both keys optional.
#[derive(Deserialize)]
struct RawFilter {
    #[serde(default)]
    op: Option<Combinator>,
    #[serde(default, deserialize_with = "deserialize_optional_nodes")]
    conditions: Option<Vec<FilterNode>>,
}

fn deserialize_optional_nodes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<FilterNode>>, D::Error> {
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| values.into_iter().map(FilterNode::from_value).collect()))
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawFilter>::deserialize(deserializer)?;
        Ok(match raw {
            None
            | Some(RawFilter {
                op: None,
                conditions: None,
            }) => Filter::Empty,
            Some(RawFilter { op, conditions }) => Filter::Group(FilterGroup {
                op: op.unwrap_or_default(),
                conditions: conditions.unwrap_or_default(),
            }),
        })
    }
}
