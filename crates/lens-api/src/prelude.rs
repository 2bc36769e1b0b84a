//! Prelude module for convenient imports.
//!
//! ```
//! use lens_api::prelude::*;
//!
//! let group = FilterGroup::and(vec![Condition::new("status", Operator::Is, "open").into()]);
//! let filter = Filter::from(group);
//! assert!(filter.as_group().is_some());
//! ```

// Client types
pub use crate::client::{LensClient, LensClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Data models
pub use crate::models::{
    AggregateRequest, AggregateResponse, AttributeDescriptor, AttributeOption, AttributeType,
    ColumnConfig, Combinator, Condition, ConditionValue, Filter, FilterGroup, FilterNode,
    LensConfig, Operator, Pagination, ReadRequest, ReadResponse, Sort, SortDirection, View,
    ViewConfig,
};
