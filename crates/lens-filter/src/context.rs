//! Shared context of the registry-aware operations.

use serde_json::Value;

use crate::registry::AttributeRegistry;
use crate::sink::{Level, LogSink, NoopSink};

/// Registry plus logging sink used by mapping and cascade operations.
///
/// The free functions of this crate use a context with [`NoopSink`]; build a
/// context with [`FilterContext::with_sink`] to observe diagnostics.
///
/// # Example
///
/// ```
/// use lens_filter::{AttributeRegistry, FilterContext, MemorySink};
///
/// let registry = AttributeRegistry::new();
/// let sink = MemorySink::new();
/// let context = FilterContext::new(&registry).with_sink(&sink);
///
/// assert!(context.parent_constraint_for("city", &Default::default()).is_none());
/// assert_eq!(sink.entries().len(), 1);
/// ```
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    registry: &'a AttributeRegistry,
    sink: &'a dyn LogSink,
}

impl<'a> FilterContext<'a> {
    /// Creates a context that discards diagnostics.
    pub fn new(registry: &'a AttributeRegistry) -> Self {
        Self {
            registry,
            sink: &NoopSink,
        }
    }

    /// Routes diagnostics to `sink`.
    pub fn with_sink(self, sink: &'a dyn LogSink) -> Self {
        Self { sink, ..self }
    }

    pub fn registry(&self) -> &'a AttributeRegistry {
        self.registry
    }

    pub(crate) fn log(&self, level: Level, message: &str, data: Option<&Value>) {
        self.sink.log(level, message, data);
    }
}

impl std::fmt::Debug for FilterContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContext")
            .field("attributes", &self.registry.len())
            .finish_non_exhaustive()
    }
}
