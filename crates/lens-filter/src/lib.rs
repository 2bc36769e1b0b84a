//! Lens filter engine
//!
//! Normalization, attribute mapping and cascading constraints for the filter
//! trees of [`lens_api::models`]. Everything here is pure and synchronous:
//! callers pass the [`AttributeRegistry`] explicitly and may route diagnostics
//! through a [`LogSink`] via [`FilterContext`].
//!
//! # Modules
//!
//! - [`operators`]: which operators each attribute type offers
//! - [`normalize`]: cleaning and emptiness checks
//! - [`mapper`]: logical to physical attribute names
//! - [`cascade`]: cascade clearing and parent constraints
//! - [`chips`]: flat chip list adapter
//! - [`request`]: read and option-fetch payloads
//!
//! # Example
//!
//! ```
//! use lens_api::models::{Condition, Filter, FilterGroup, Operator};
//! use lens_filter::{is_filters_empty, process_filters_for_api};
//!
//! let filter = Filter::from(FilterGroup::and(vec![
//!     Condition::new("", Operator::Is, "ignored").into(),
//! ]));
//!
//! assert!(is_filters_empty(&filter));
//! assert!(is_filters_empty(&Filter::Empty));
//! assert!(process_filters_for_api(&Filter::Empty).is_none());
//! ```

pub mod cascade;
pub mod chips;
mod context;
mod error;
pub mod mapper;
pub mod normalize;
pub mod operators;
mod registry;
pub mod request;
pub mod sink;

pub use cascade::{
    available_attributes, build_parent_constraint, cascade_clear, changed_attributes,
    parent_constraint_for, update_condition, used_attributes, CascadeOptions, ConditionChange,
};
pub use chips::{
    chip_filters_to_lens_view_filter, lens_filter_to_chip_filters, ChipFilter, ChipSession,
};
pub use context::FilterContext;
pub use error::{FilterError, FilterResult};
pub use mapper::map_filter_attributes;
pub use normalize::{
    canonicalize, clean_condition, clean_filter_group, filters_equal, is_condition_complete,
    is_filters_empty, normalize_filters, normalize_filters_with, process_filters_for_api,
    try_normalize_filters,
};
pub use operators::{
    default_operator_for_type, is_value_free, new_condition_for, operator_expects_multiple,
    operator_expects_range, operator_label, operator_requires_value, operators_for_type,
    OperatorDefinition,
};
pub use registry::AttributeRegistry;
pub use request::{normalize_view, option_query, read_request};
pub use sink::{Level, LogCrateSink, LogEntry, LogSink, MemorySink, NoopSink};
