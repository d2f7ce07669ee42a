//! Route pages.

use crate::{
    core::route,
    errors::Result,
    web::{AppState, render::Rendered, session::CurrentUser},
};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Add and edit form.
#[derive(Debug, Deserialize)]
pub struct RouteForm {
    /// Where trips start
    pub start_point: String,
    /// Where trips end
    pub end_point: String,
}

/// Route listing.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    let routes: Vec<Value> = route::list_routes(&state.db)
        .await?
        .into_iter()
        .map(|r| json!({ "name": r.name(), "route": r }))
        .collect();
    state.render(
        "routes",
        json!({
            "title": "Routes",
            "username": session.username,
            "role": session.role,
            "routes": routes,
        }),
    )
}

/// Adds a route.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Form(form): Form<RouteForm>,
) -> Result<Redirect> {
    route::add_route(&state.db, &form.start_point, &form.end_point).await?;
    Ok(Redirect::to("/routes"))
}

/// Edit page of one route.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Rendered> {
    let found = route::get_route(&state.db, id).await?;
    state.render(
        "route_edit",
        json!({
            "title": "Edit route",
            "username": session.username,
            "role": session.role,
            "route": found,
        }),
    )
}

/// Saves the edit form.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<RouteForm>,
) -> Result<Redirect> {
    route::update_route(&state.db, id, &form.start_point, &form.end_point).await?;
    Ok(Redirect::to("/routes"))
}

/// Refused with 409 while any trip references the route.
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    route::delete_route(&state.db, id).await?;
    Ok(Redirect::to("/routes"))
}
