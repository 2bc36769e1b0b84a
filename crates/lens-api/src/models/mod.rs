//! Data types exchanged with the Lens backend.
//!
//! The filter tree types are shared by the read payload, the aggregate-options
//! payload and persisted views.

mod attribute;
mod filter;
mod request;
mod view;

pub use attribute::*;
pub use filter::*;
pub use request::*;
pub use view::*;
