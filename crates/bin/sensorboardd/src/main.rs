//! # sensorboardd — sensorboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and initialise logging
//! - Construct the HTTP feed client and the SSE client (driven adapters)
//! - Construct application services and the background tasks that feed them
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), aborting background tasks
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sensorboard_adapter_http_axum::{AppState, router};
use sensorboard_adapter_http_reqwest::{HttpFeedClient, SseClient};
use sensorboard_app::event_bus::InProcessEventBus;
use sensorboard_app::services::dashboard_service::DashboardService;
use sensorboard_app::services::live_service::LiveService;
use sensorboard_app::services::poller::IntervalPoller;
use sensorboard_app::services::stream_forwarder::StreamForwarder;

use crate::config::Config;

/// Messages buffered between the SSE client and the forwarder.
const STREAM_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.server.event_capacity));

    // Services
    let live = Arc::new(LiveService::new(
        config.aggregator.duplicates,
        Arc::clone(&event_bus),
    ));
    let dashboard = Arc::new(DashboardService::new(Arc::clone(&event_bus)));

    // Interval polling
    let feed = HttpFeedClient::new(&config.feed).context("failed to build feed client")?;
    let poller = Arc::new(IntervalPoller::new(
        feed,
        Arc::clone(&dashboard),
        config.feed.schedule(),
    ));
    let mut tasks = poller.spawn();

    // Push stream
    if config.stream.enabled {
        let client = SseClient::new(&config.stream).context("failed to build stream client")?;
        let (events, handle) = client.spawn(STREAM_BUFFER);
        tasks.push(handle);
        tasks.push(StreamForwarder::new(Arc::clone(&live), Arc::clone(&dashboard)).spawn(events));
        tracing::info!(url = %config.stream.url, "push stream enabled");
    } else {
        tracing::info!("push stream disabled, live counters stay empty");
    }

    // HTTP
    let settings = config
        .dashboard
        .settings()
        .context("invalid dashboard settings")?;
    let app = router::build(AppState::new(live, dashboard, event_bus, settings));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, base_url = %config.feed.base_url, "sensorboardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    for task in &tasks {
        task.abort();
    }
    tracing::info!(tasks = tasks.len(), "background tasks stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
