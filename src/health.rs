//! Liveness endpoint for hosting platforms that expect an open HTTP port.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::{Router, http::StatusCode, routing::any};
use tokio::net::TcpListener;
use tokio::sync::watch;

pub const ALIVE_BODY: &str = "Bot is alive and running!";

async fn alive() -> (StatusCode, &'static str) {
    (StatusCode::OK, ALIVE_BODY)
}

/// Every path and method answers 200.
pub fn router() -> Router {
    Router::new().route("/", any(alive)).fallback(alive)
}

pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind health endpoint on {}", addr))
}

/// Serves until `shutdown` turns `true` or its sender is dropped.
pub async fn serve(listener: TcpListener, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Health endpoint listening on http://{}", addr);
    }
    axum::serve(listener, router())
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .context("health endpoint stopped unexpectedly")?;
    log::info!("Health endpoint stopped.");
    Ok(())
}
