//! Filter tree normalization.
//!
//! The cleaner turns a filter as edited in a UI (incomplete rows, empty nested
//! groups) into the canonical tree the backend accepts:
//!
//! - a condition survives only if it names an attribute and either carries a
//!   value or uses a value-free operator (`is_empty`, `is_not_empty`,
//!   `is_true`, `is_false`);
//! - a nested group survives only if it still has conditions after cleaning;
//! - combinators are never changed.
//!
//! Cleaning is pure and idempotent.
//!
//! # Example
//!
//! ```
//! use lens_api::models::{Condition, Filter, FilterGroup, Operator};
//! use lens_filter::{is_filters_empty, process_filters_for_api};
//!
//! let filter = Filter::from(FilterGroup::and(vec![
//!     Condition::new("age", Operator::GreaterThan, "").into(),
//!     Condition::without_value("email", Operator::IsEmpty).into(),
//! ]));
//!
//! let cleaned = process_filters_for_api(&filter).unwrap();
//! assert_eq!(cleaned.conditions.len(), 1);
//! assert!(!is_filters_empty(&filter));
//! ```

use lens_api::models::{Condition, Filter, FilterGroup, FilterNode};
use serde_json::Value;

use crate::error::{FilterError, FilterResult};
use crate::operators::is_value_free;
use crate::sink::{Level, LogSink, NoopSink};

/// Cleans a filter for transmission; `None` means "no filter".
///
/// An empty group is returned as an empty group, not `None`; use
/// [`is_filters_empty`] to test effective emptiness.
pub fn process_filters_for_api(filter: &Filter) -> Option<FilterGroup> {
    filter.as_group().map(clean_filter_group)
}

/// Recursively prunes incomplete conditions and groups left without conditions.
pub fn clean_filter_group(group: &FilterGroup) -> FilterGroup {
    let conditions = group
        .conditions
        .iter()
        .filter_map(|node| match node {
            FilterNode::Condition(condition) => clean_condition(condition).map(FilterNode::from),
            FilterNode::Group(nested) => {
                let cleaned = clean_filter_group(nested);
                (!cleaned.conditions.is_empty()).then(|| FilterNode::from(cleaned))
            }
        })
        .collect();

    FilterGroup {
        op: group.op,
        conditions,
    }
}

/// Returns the condition if it is complete, `None` if it should be dropped.
pub fn clean_condition(condition: &Condition) -> Option<Condition> {
    is_condition_complete(condition).then(|| condition.clone())
}

/// Returns true if the cleaner keeps this condition.
pub fn is_condition_complete(condition: &Condition) -> bool {
    if condition.attribute.is_empty() {
        return false;
    }
    !condition.has_empty_value() || condition.op.as_ref().is_some_and(is_value_free)
}

/// Returns true if the filter has no active condition after cleaning.
pub fn is_filters_empty(filter: &Filter) -> bool {
    process_filters_for_api(filter).map_or(true, |group| group.conditions.is_empty())
}

/// Decodes a persisted filter and canonicalizes it.
///
/// Undecodable input is reported to `sink` and treated as no filter. A group
/// that cleans down to nothing becomes [`Filter::Empty`].
pub fn normalize_filters_with(raw: &Value, sink: &dyn LogSink) -> Filter {
    match try_normalize_filters(raw) {
        Ok(filter) => filter,
        Err(err) => {
            sink.log(Level::Warn, &err.to_string(), Some(raw));
            Filter::Empty
        }
    }
}

/// [`normalize_filters_with`] discarding diagnostics.
pub fn normalize_filters(raw: &Value) -> Filter {
    normalize_filters_with(raw, &NoopSink)
}

/// Strict variant of [`normalize_filters`] that reports decoding failures.
pub fn try_normalize_filters(raw: &Value) -> FilterResult<Filter> {
    let filter: Filter =
        serde_json::from_value(raw.clone()).map_err(|e| FilterError::malformed(e.to_string()))?;
    Ok(canonicalize(&filter))
}

/// Cleans a filter, mapping groups without conditions to [`Filter::Empty`].
pub fn canonicalize(filter: &Filter) -> Filter {
    match process_filters_for_api(filter) {
        Some(group) if !group.conditions.is_empty() => Filter::Group(group),
        _ => Filter::Empty,
    }
}

/// Returns true if both filters clean to the same tree.
///
/// All empty representations compare equal.
pub fn filters_equal(a: &Filter, b: &Filter) -> bool {
    canonicalize(a) == canonicalize(b)
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
