//! # Feature: Health Endpoint
//!
//! Minimal liveness probe so the hosting platform sees an open port.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use log::info;

/// Serve `GET /` and `GET /healthz` on all interfaces until the process
/// exits.
pub async fn serve(port: u16) -> Result<()> {
    let app = Router::new().route("/", get(ok)).route("/healthz", get(ok));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Health endpoint listening on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn ok() -> &'static str {
    "ok"
}
