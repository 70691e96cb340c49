//! Liveness HTTP surface (axum).
//!
//! A stateless, read-only reporter of process status so an external
//! supervisor can detect that the bot is alive. Also owns the heartbeat
//! task that keeps `last_update` fresh.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::task::JoinHandle;

use courier_core::{
    liveness::{format_uptime, Liveness},
    Result,
};

type Shared = Arc<Liveness>;

pub fn router(liveness: Shared) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/ping", get(ping))
        .with_state(liveness)
}

pub async fn serve(addr: SocketAddr, liveness: Shared) -> Result<()> {
    let app = router(liveness);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "liveness server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodic tick refreshing `last_update`, so readers can tell a live
/// process from a wedged one.
pub fn spawn_heartbeat(liveness: Shared, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(interval);
        loop {
            tick.tick().await;
            liveness.touch();
        }
    })
}

#[derive(Serialize)]
struct RootBody {
    status: &'static str,
    uptime_seconds: i64,
    bot_status: &'static str,
}

async fn root(State(liveness): State<Shared>) -> Json<RootBody> {
    let snap = liveness.snapshot();
    Json(RootBody {
        status: "alive",
        uptime_seconds: snap.uptime_seconds,
        bot_status: snap.status.as_str(),
    })
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    bot_status: &'static str,
    uptime: String,
    uptime_seconds: i64,
    started_at: String,
    last_update: String,
    user_count: usize,
    message_count: usize,
}

async fn health(State(liveness): State<Shared>) -> Json<HealthBody> {
    let snap = liveness.snapshot();
    Json(HealthBody {
        status: "alive",
        bot_status: snap.status.as_str(),
        uptime: format_uptime(snap.uptime_seconds),
        uptime_seconds: snap.uptime_seconds,
        started_at: snap.started_at.to_rfc3339(),
        last_update: snap.last_update.to_rfc3339(),
        user_count: snap.user_count,
        message_count: snap.message_count,
    })
}

#[derive(Serialize)]
struct StatusBody {
    alive: bool,
    status: &'static str,
    uptime: String,
}

async fn status(State(liveness): State<Shared>) -> Json<StatusBody> {
    let snap = liveness.snapshot();
    Json(StatusBody {
        alive: true,
        status: snap.status.as_str(),
        uptime: format_uptime(snap.uptime_seconds),
    })
}

async fn ping() -> &'static str {
    "pong"
}
