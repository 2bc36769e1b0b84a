//! Attribute descriptors returned by the backend's configuration endpoint.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::filter::Operator;
use super::request::Sort;

/// Data type of an attribute, driving which operators apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Text,
    LongText,
    Integer,
    Number,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Boolean,
    Enum,
    /// A type name this client does not recognise.
    Other(String),
}

impl AttributeType {
    /// Returns the wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::String => "string",
            AttributeType::Text => "text",
            AttributeType::LongText => "longtext",
            AttributeType::Integer => "integer",
            AttributeType::Number => "number",
            AttributeType::Decimal => "decimal",
            AttributeType::Date => "date",
            AttributeType::DateTime => "datetime",
            AttributeType::Timestamp => "timestamp",
            AttributeType::Boolean => "boolean",
            AttributeType::Enum => "enum",
            AttributeType::Other(name) => name,
        }
    }
}

impl From<&str> for AttributeType {
    fn from(name: &str) -> Self {
        match name {
            "string" => AttributeType::String,
            "text" => AttributeType::Text,
            "longtext" => AttributeType::LongText,
            "integer" => AttributeType::Integer,
            "number" => AttributeType::Number,
            "decimal" => AttributeType::Decimal,
            "date" => AttributeType::Date,
            "datetime" => AttributeType::DateTime,
            "timestamp" => AttributeType::Timestamp,
            "boolean" => AttributeType::Boolean,
            "enum" => AttributeType::Enum,
            other => AttributeType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(AttributeType::from(name.as_str()))
    }
}

/// A selectable option of an enum-like attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub value: String,

    #[serde(default)]
    pub label: String,

    /// Number of matching records, when the option came from an aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl AttributeOption {
    /// Returns the label, falling back to the raw value.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}

/// Describes one filterable attribute of the data set.
///
/// # Examples
///
/// ```
/// use lens_api::models::{AttributeDescriptor, AttributeType};
///
/// let city: AttributeDescriptor = serde_json::from_str(r#"{
///     "name": "city",
///     "label": "City",
///     "type": "enum",
///     "parentFilters": ["state", "district"]
/// }"#).unwrap();
///
/// assert_eq!(city.attribute_type, AttributeType::Enum);
/// assert!(city.depends_on("state"));
/// assert!(!city.is_nullable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    #[serde(default)]
    pub is_nullable: bool,

    /// Static option list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<AttributeOption>>,

    /// Name of the backend aggregator that computes options dynamically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_aggregator: Option<String>,

    /// Attributes whose selected values constrain this attribute's options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_filters: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<Operator>,

    /// Physical backend field to filter on, when different from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_attribute: Option<String>,
}

impl AttributeDescriptor {
    /// Creates a descriptor with only a name and a type.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            attribute_type,
            is_nullable: false,
            options: None,
            options_aggregator: None,
            parent_filters: Vec::new(),
            default_operator: None,
            filter_attribute: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Marks the attribute as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Declares the parent attributes this attribute depends on.
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_filters = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the physical backend field name.
    pub fn with_filter_attribute(mut self, field: impl Into<String>) -> Self {
        self.filter_attribute = Some(field.into());
        self
    }

    /// Sets the operator new conditions start with.
    pub fn with_default_operator(mut self, op: Operator) -> Self {
        self.default_operator = Some(op);
        self
    }

    /// Sets the aggregator used to fetch options.
    pub fn with_options_aggregator(mut self, aggregator: impl Into<String>) -> Self {
        self.options_aggregator = Some(aggregator.into());
        self
    }

    /// Returns the label, falling back to the name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Returns the backend field name: `filterAttribute` unless it is missing
    /// or blank, otherwise the attribute name.
    pub fn field_name(&self) -> &str {
        match self.filter_attribute.as_deref() {
            Some(field) if !field.is_empty() => field,
            _ => &self.name,
        }
    }

    /// Returns true if `parent` is one of this attribute's declared parents.
    pub fn depends_on(&self, parent: &str) -> bool {
        self.parent_filters.iter().any(|p| p == parent)
    }
}

/// Response of the configuration endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensConfig {
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    /// Restricts each attribute to one condition and enables cascade clearing.
    #[serde(default)]
    pub unique_filters: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_sorts: Vec<Sort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_name_ignores_blank_filter_attribute() {
        let age = AttributeDescriptor::new("age", AttributeType::Integer);
        assert_eq!(age.field_name(), "age");
        assert_eq!(age.clone().with_filter_attribute("age_years").field_name(), "age_years");
        assert_eq!(age.with_filter_attribute("").field_name(), "age");
    }

    #[test]
    fn test_attribute_type_roundtrip() {
        for name in ["string", "longtext", "datetime", "enum", "boolean"] {
            let parsed: AttributeType = serde_json::from_value(json!(name)).unwrap();
            assert_eq!(parsed.as_str(), name);
            assert!(!matches!(parsed, AttributeType::Other(_)));
        }
    }

    #[test]
    fn test_attribute_type_unknown() {
        let parsed: AttributeType = serde_json::from_value(json!("geo_point")).unwrap();
        assert_eq!(parsed, AttributeType::Other("geo_point".to_string()));
    }

    #[test]
    fn test_descriptor_deserialize_minimal() {
        let descriptor: AttributeDescriptor =
            serde_json::from_value(json!({"name": "age", "type": "integer"})).unwrap();

        assert_eq!(descriptor.name, "age");
        assert_eq!(descriptor.attribute_type, AttributeType::Integer);
        assert!(!descriptor.is_nullable);
        assert!(descriptor.parent_filters.is_empty());
        assert_eq!(descriptor.display_label(), "age");
    }

    #[test]
    fn test_descriptor_deserialize_full() {
        let descriptor: AttributeDescriptor = serde_json::from_value(json!({
            "name": "owner",
            "label": "Owner",
            "type": "enum",
            "isNullable": true,
            "options": [{"value": "u1", "label": "Ada"}],
            "optionsAggregator": "distinct",
            "parentFilters": ["team"],
            "defaultOperator": "is",
            "filterAttribute": "owner_id"
        }))
        .unwrap();

        assert!(descriptor.is_nullable);
        assert_eq!(descriptor.options.as_ref().map(Vec::len), Some(1));
        assert_eq!(descriptor.options_aggregator.as_deref(), Some("distinct"));
        assert_eq!(descriptor.default_operator, Some(Operator::Is));
        assert_eq!(descriptor.filter_attribute.as_deref(), Some("owner_id"));
        assert!(descriptor.depends_on("team"));
    }

    #[test]
    fn test_descriptor_serialize_uses_camel_case() {
        let descriptor = AttributeDescriptor::new("city", AttributeType::Enum)
            .nullable()
            .with_parents(["state"]);
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["type"], "enum");
        assert_eq!(value["isNullable"], true);
        assert_eq!(value["parentFilters"], json!(["state"]));
        assert!(value.get("filterAttribute").is_none());
    }

    #[test]
    fn test_option_display_label_falls_back_to_value() {
        let option = AttributeOption {
            value: "CA".to_string(),
            label: String::new(),
            count: Some(3),
        };
        assert_eq!(option.display_label(), "CA");
    }

    #[test]
    fn test_lens_config_defaults() {
        let config: LensConfig = serde_json::from_value(json!({})).unwrap();
        assert!(config.attributes.is_empty());
        assert!(!config.unique_filters);
        assert!(config.page_size.is_none());
    }
}
