// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::data_access::DataAccess;
use crate::application::poller::TelemetryPoller;
use crate::application::store::DashboardState;
use crate::domain::position::Position;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::proxy::ProxyClient;
use crate::infrastructure::upstream::UpstreamTelemetryApi;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    diagnostics_view, field_chart_view, health_check, map_view, proxy_gps, proxy_sensor,
    proxy_trips, readings_view, trips_view,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create telemetry source (infrastructure layer)
    let source = Arc::new(UpstreamTelemetryApi::new(
        config.upstream.base_url.clone(),
        config.upstream.username.clone(),
    ));

    // Create the state store and start the polling loops
    let initial_position = Position::new(config.map.initial.latitude, config.map.initial.longitude);
    let store = Arc::new(RwLock::new(DashboardState::new(
        config.polling.history_cap,
        initial_position,
    )));
    let poller = TelemetryPoller::new(
        DataAccess::new(source),
        store.clone(),
        config.polling.clone(),
    );
    // Held for the server's lifetime; dropping it stops the loops
    let _poller = poller.spawn();

    // Create services (application layer)
    let dashboard_service = DashboardService::new(store, config.map.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        proxy: ProxyClient::new(config.upstream.base_url, config.upstream.username),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/sensor", get(proxy_sensor))
        .route("/api/gps", get(proxy_gps))
        .route("/api/trips", get(proxy_trips))
        .route("/dashboard/diagnostics", get(diagnostics_view))
        .route("/dashboard/readings", get(readings_view))
        .route("/dashboard/readings/:field", get(field_chart_view))
        .route("/dashboard/map", get(map_view))
        .route("/dashboard/trips", get(trips_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    println!("Starting vehicle-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
