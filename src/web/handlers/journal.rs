//! Trip journal pages.

use super::parse_id;
use crate::{
    core::{car, journal, route},
    db::JournalRow,
    errors::Result,
    web::{AppState, render::Rendered, session::CurrentUser},
};
use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Departure form.
#[derive(Debug, Deserialize)]
pub struct JournalForm {
    /// Selected car id
    pub car_id: String,
    /// Selected route id
    pub route_id: String,
    /// `YYYY-MM-DDTHH:MM`
    pub time_out: String,
}

/// Body of the completion request sent by the journal page script.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    /// Arrival, `YYYY-MM-DDTHH:MM`
    pub time_in: String,
}

/// Arrival form of the trip page.
#[derive(Debug, Deserialize)]
pub struct ArrivalForm {
    /// Arrival, `YYYY-MM-DDTHH:MM`
    pub time_in: String,
}

fn row_json(row: &JournalRow) -> Value {
    json!({
        "id": row.id,
        "route": row.route_name(),
        "vehicle": row.vehicle(),
        "driver": row.driver_name(),
        "time_out": journal::format_form_timestamp(&row.time_out),
        "time_in": row.time_in.as_ref().map(journal::format_form_timestamp),
        "status": row.status(),
    })
}

/// Journal listing with the departure form choices.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    let entries: Vec<Value> = journal::list_journal(&state.db)
        .await?
        .iter()
        .map(row_json)
        .collect();
    // Choices for the departure form
    let cars = car::list_cars(&state.db).await?;
    let routes = route::list_routes(&state.db).await?;
    state.render(
        "journal",
        json!({
            "title": "Journal",
            "username": session.username,
            "role": session.role,
            "entries": entries,
            "cars": cars,
            "routes": routes,
        }),
    )
}

/// Records a departure.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Form(form): Form<JournalForm>,
) -> Result<Redirect> {
    let car_id = parse_id(&form.car_id, "car id")?;
    let route_id = parse_id(&form.route_id, "route id")?;
    journal::add_journal_entry(&state.db, car_id, route_id, &form.time_out).await?;
    Ok(Redirect::to("/journal"))
}

/// One trip, with its arrival form.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Rendered> {
    let row = journal::get_journal_entry(&state.db, id).await?;
    state.render(
        "journal_edit",
        json!({
            "title": "Trip",
            "username": session.username,
            "role": session.role,
            "entry": row_json(&row),
        }),
    )
}

/// Records the arrival. Answers with JSON since the page calls it from script.
pub async fn complete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<CompleteRequest>,
) -> Result<Json<Value>> {
    let entry = journal::complete_journal_entry(&state.db, id, &request.time_in).await?;
    Ok(Json(json!({
        "message": "Trip completed",
        "id": entry.id,
        "status": entry.status(),
    })))
}

/// Records the arrival from the plain form and returns to the journal.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<ArrivalForm>,
) -> Result<Redirect> {
    journal::complete_journal_entry(&state.db, id, &form.time_in).await?;
    Ok(Redirect::to("/journal"))
}

/// Removes a trip, open or closed.
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    journal::delete_journal_entry(&state.db, id).await?;
    Ok(Redirect::to("/journal"))
}
