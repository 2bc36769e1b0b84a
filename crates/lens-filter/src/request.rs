//! Assembly of backend payloads from editable filters.

use lens_api::models::{AggregateRequest, Filter, ReadRequest, View};

use crate::context::FilterContext;
use crate::error::FilterResult;
use crate::normalize::{canonicalize, process_filters_for_api};
use crate::registry::AttributeRegistry;

impl FilterContext<'_> {
    /// Builds a read request carrying the cleaned, mapped filter.
    ///
    /// `filters` is left out entirely when nothing survives cleaning. Sorts,
    /// pagination and global context are set by the caller.
    pub fn read_request(&self, filter: &Filter) -> ReadRequest {
        let filters = process_filters_for_api(filter)
            .filter(|group| !group.conditions.is_empty())
            .map(|group| self.map_attributes(&group));

        ReadRequest {
            filters,
            ..ReadRequest::default()
        }
    }

    /// Builds the option fetch for `attribute`, scoped by its parents' values.
    ///
    /// The request names the physical field and the descriptor's aggregator;
    /// the parent constraint is mapped like any other filter.
    pub fn option_query(
        &self,
        attribute: &str,
        filter: &Filter,
        search: Option<String>,
    ) -> FilterResult<AggregateRequest> {
        let descriptor = self.registry().require(attribute)?;
        let filters = filter
            .as_group()
            .and_then(|group| self.parent_constraint_for(attribute, group))
            .map(|constraint| self.map_attributes(&constraint));

        Ok(AggregateRequest {
            attribute: descriptor.field_name().to_string(),
            aggregator: descriptor.options_aggregator.clone(),
            search,
            filters,
            limit: None,
        })
    }
}

/// [`FilterContext::read_request`] discarding diagnostics.
pub fn read_request(filter: &Filter, registry: &AttributeRegistry) -> ReadRequest {
    FilterContext::new(registry).read_request(filter)
}

/// [`FilterContext::option_query`] discarding diagnostics.
pub fn option_query(
    attribute: &str,
    registry: &AttributeRegistry,
    filter: &Filter,
    search: Option<String>,
) -> FilterResult<AggregateRequest> {
    FilterContext::new(registry).option_query(attribute, filter, search)
}

/// Canonicalizes a persisted view's filters on load.
pub fn normalize_view(view: &View) -> View {
    let mut view = view.clone();
    view.config.filters = canonicalize(&view.config.filters);
    view
}
