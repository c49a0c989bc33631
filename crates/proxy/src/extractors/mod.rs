//! Axum extractors for proxy requests.
//!
//! - [`query_params`] - Insertion-ordered, one-or-many query parameters

pub mod query_params;

pub use query_params::{ParamValue, QueryParams};
