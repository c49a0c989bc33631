//! Blue Button FHIR proxy server.
//!
//! Fronts a backend FHIR server with format normalization, resource and
//! interaction checks, and JSON error kickouts.

use bluebutton_proxy::access::StaticResourceTable;
use bluebutton_proxy::upstream::HttpUpstream;
use bluebutton_proxy::{ProxyConfig, create_app, init_logging};
use clap::Parser;
use tracing::{info, warn};

/// Loads the supported resource table, or an empty one when none is configured.
fn load_resource_table(config: &ProxyConfig) -> anyhow::Result<StaticResourceTable> {
    match &config.resource_table {
        Some(path) => Ok(StaticResourceTable::from_file(path)?),
        None => {
            warn!("No resource table configured; every resource type will be rejected");
            Ok(StaticResourceTable::default())
        }
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ProxyConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ProxyConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        backend = %config.backend_url,
        debug = config.debug,
        "Starting FHIR proxy"
    );

    let table = load_resource_table(&config)?;
    let upstream = HttpUpstream::new(config.timeout())?;
    let app = create_app(table, upstream, config.clone());

    serve(app, &config).await
}
