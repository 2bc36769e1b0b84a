//! Read and aggregate request payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::attribute::AttributeOption;
use super::filter::FilterGroup;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One sort key of a read request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Page selection for a read request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

/// Payload of the read endpoint.
///
/// `filters` is omitted from the JSON when there is no active filter.
///
/// # Examples
///
/// ```
/// use lens_api::models::{ReadRequest, Sort};
///
/// let request = ReadRequest::default().with_sorts(vec![Sort::desc("created_at")]);
/// let json = serde_json::to_value(&request).unwrap();
///
/// assert_eq!(json["sorts"][0]["direction"], "desc");
/// assert!(json.get("filters").is_none());
/// assert!(json["globalContext"].is_object());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    #[serde(default)]
    pub global_context: Map<String, Value>,

    #[serde(default)]
    pub sorts: Vec<Sort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ReadRequest {
    /// Sets the global context object.
    pub fn with_global_context(mut self, global_context: Map<String, Value>) -> Self {
        self.global_context = global_context;
        self
    }

    /// Sets the sort keys.
    pub fn with_sorts(mut self, sorts: Vec<Sort>) -> Self {
        self.sorts = sorts;
        self
    }

    /// Sets the page selection.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Response of the read endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub data: Vec<Value>,

    /// Total number of matching records, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Payload of the aggregate-options endpoint.
///
/// `filters` carries the parent-value constraint of a cascading attribute;
/// when absent the options are fetched unconstrained.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    pub attribute: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Response of the aggregate-options endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResponse {
    #[serde(default)]
    pub options: Vec<AttributeOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Operator};
    use serde_json::json;

    #[test]
    fn test_sort_direction_defaults_to_asc() {
        let sort: Sort = serde_json::from_value(json!({"field": "name"})).unwrap();
        assert_eq!(sort, Sort::asc("name"));
    }

    #[test]
    fn test_read_request_wire_shape() {
        let mut context = Map::new();
        context.insert("tenant".to_string(), json!("acme"));

        let request = ReadRequest {
            global_context: context,
            sorts: vec![Sort::asc("name")],
            filters: Some(FilterGroup::and(vec![
                Condition::new("status", Operator::Is, "open").into(),
            ])),
            pagination: Some(Pagination {
                page: 2,
                page_size: 50,
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "globalContext": {"tenant": "acme"},
                "sorts": [{"field": "name", "direction": "asc"}],
                "filters": {
                    "op": "and",
                    "conditions": [{"attribute": "status", "op": "is", "value": "open"}]
                },
                "pagination": {"page": 2, "pageSize": 50}
            })
        );
    }

    #[test]
    fn test_aggregate_request_omits_missing_fields() {
        let request = AggregateRequest {
            attribute: "city".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"attribute": "city"})
        );
    }

    #[test]
    fn test_read_response_defaults() {
        let response: ReadResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.data.is_empty());
        assert!(response.total.is_none());
    }
}
