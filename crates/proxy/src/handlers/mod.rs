//! HTTP request handlers for proxied FHIR interactions.
//!
//! Every handler runs the same pipeline (see [`forward`]): normalize
//! `_format`, check the resource type and interaction, build the backend
//! URL, call the backend and relay its answer.

pub mod forward;
pub mod health;
pub mod history;
pub mod interactions;
pub mod read;
pub mod vread;

pub use forward::{ProxyCall, forward};
pub use health::health_handler;
pub use history::{history_instance_handler, history_type_handler};
pub use interactions::interactions_handler;
pub use read::read_handler;
pub use vread::vread_handler;
