// HTTP request handlers
use crate::infrastructure::proxy::{ProxyKind, UpstreamError};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Proxy route: relay the upstream sensor snapshot verbatim
pub async fn proxy_sensor(State(state): State<Arc<AppState>>) -> Response {
    relay(&state, ProxyKind::Sensor).await
}

/// Proxy route: relay the upstream GPS fix verbatim
pub async fn proxy_gps(State(state): State<Arc<AppState>>) -> Response {
    relay(&state, ProxyKind::Gps).await
}

/// Proxy route: relay the upstream trip list verbatim
pub async fn proxy_trips(State(state): State<Arc<AppState>>) -> Response {
    relay(&state, ProxyKind::Trip).await
}

async fn relay(state: &AppState, kind: ProxyKind) -> Response {
    let result = state.proxy.relay(kind).await;
    if let Err(UpstreamError::Transport(e)) = &result {
        tracing::error!("Error relaying {} data: {}", kind.label(), e);
    }
    relay_response(result, kind)
}

/// Success passes the upstream body through untouched; a non-success upstream
/// status is propagated on an error envelope; transport failures collapse to
/// a generic 500.
fn relay_response(result: Result<Bytes, UpstreamError>, kind: ProxyKind) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(UpstreamError::Status { status }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let message = format!("Failed to fetch {} data from external API.", kind.label());
            (status, Json(json!({ "error": message }))).into_response()
        }
        Err(UpstreamError::Transport(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "An unexpected error occurred." })),
        )
            .into_response(),
    }
}

/// Diagnostic trouble codes tab
pub async fn diagnostics_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dashboard_service.diagnostics().await).into_response()
}

/// Live readings grid
pub async fn readings_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dashboard_service.readings().await).into_response()
}

/// Drill-down chart for one sensor field
pub async fn field_chart_view(
    Path(field): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.dashboard_service.field_chart(&field).await {
        Some(chart) => Json(chart).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown sensor field '{}'", field) })),
        )
            .into_response(),
    }
}

/// Map tab: current position, route endpoints, estimated range
pub async fn map_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dashboard_service.map().await).into_response()
}

/// Trips tab
pub async fn trips_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dashboard_service.trips().await).into_response()
}
