//! Lens backend client library
//!
//! Wire models for filter trees, attribute descriptors, read requests and
//! saved views, plus an async client for the backend's REST endpoints.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use lens_api::prelude::*;
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
