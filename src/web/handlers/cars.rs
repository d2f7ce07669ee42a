//! Car pages.

use super::parse_optional_id;
use crate::{
    core::{car, driver},
    errors::Result,
    web::{AppState, render::Rendered, session::CurrentUser},
};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use serde_json::json;

/// Add and edit form.
#[derive(Debug, Deserialize)]
pub struct CarForm {
    /// Plate number
    pub num: String,
    /// Body color
    pub color: String,
    /// Manufacturer or model
    pub mark: String,
    /// Empty when no driver is selected
    #[serde(default)]
    pub driver_id: String,
}

/// Car listing with the driver choices.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    let cars = car::list_cars(&state.db).await?;
    let drivers = driver::list_drivers(&state.db).await?;
    state.render(
        "autos",
        json!({
            "title": "Cars",
            "username": session.username,
            "role": session.role,
            "cars": cars,
            "drivers": drivers,
        }),
    )
}

/// Adds a car.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Form(form): Form<CarForm>,
) -> Result<Redirect> {
    let driver_id = parse_optional_id(&form.driver_id, "driver id")?;
    car::add_car(&state.db, &form.num, &form.color, &form.mark, driver_id).await?;
    Ok(Redirect::to("/autos"))
}

/// Edit page of one car.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Rendered> {
    let listing = car::get_car(&state.db, id).await?;
    let drivers = driver::list_drivers(&state.db).await?;
    state.render(
        "auto_edit",
        json!({
            "title": "Edit car",
            "username": session.username,
            "role": session.role,
            "car": listing,
            "drivers": drivers,
        }),
    )
}

/// Saves the edit form.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<CarForm>,
) -> Result<Redirect> {
    let driver_id = parse_optional_id(&form.driver_id, "driver id")?;
    car::update_car(&state.db, id, &form.num, &form.color, &form.mark, driver_id).await?;
    Ok(Redirect::to("/autos"))
}

/// Removes the car and its trips.
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    car::delete_car(&state.db, id).await?;
    Ok(Redirect::to("/autos"))
}
