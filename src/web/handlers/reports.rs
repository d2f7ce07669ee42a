//! Dashboard, statistics, export and health check.

use crate::{
    core::{report, route},
    errors::Result,
    web::{AppState, render::Rendered, session::CurrentUser},
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde_json::{Value, json};

/// Liveness check that also pings the database.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state.db.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Landing page after login.
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    state.render(
        "dashboard",
        json!({ "title": "Dashboard", "username": session.username, "role": session.role }),
    )
}

/// Distinct cars per route.
pub async fn statistics(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    let routes = route::route_vehicle_counts(&state.db).await?;
    state.render(
        "statistics",
        json!({
            "title": "Route statistics",
            "username": session.username,
            "role": session.role,
            "routes": routes,
        }),
    )
}

/// The whole journal as an xlsx attachment.
pub async fn download(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse> {
    let bytes = report::export_journal(&state.db, state.exporter.as_ref()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, report::XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"journal.xlsx\""),
        ],
        bytes,
    ))
}
