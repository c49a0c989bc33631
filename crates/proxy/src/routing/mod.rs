//! Route configuration for the proxy.

pub mod proxy_routes;

pub use proxy_routes::create_routes;
