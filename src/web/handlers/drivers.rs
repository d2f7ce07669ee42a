//! Driver pages.

use crate::{
    core::driver,
    entities::driver as driver_entity,
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
pub struct DriverForm {
    /// Required
    pub first_name: String,
    /// Required
    pub last_name: String,
    /// Optional patronymic
    #[serde(default)]
    pub father_name: String,
}

fn driver_json(driver: &driver_entity::Model) -> Value {
    json!({
        "id": driver.id,
        "first_name": driver.first_name,
        "last_name": driver.last_name,
        "father_name": driver.father_name,
        "full_name": driver.full_name(),
    })
}

/// Driver listing.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Rendered> {
    let drivers: Vec<Value> = driver::list_drivers(&state.db)
        .await?
        .iter()
        .map(driver_json)
        .collect();
    state.render(
        "drivers",
        json!({
            "title": "Drivers",
            "username": session.username,
            "role": session.role,
            "drivers": drivers,
        }),
    )
}

/// Adds a driver.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Form(form): Form<DriverForm>,
) -> Result<Redirect> {
    driver::add_driver(&state.db, &form.first_name, &form.last_name, &form.father_name).await?;
    Ok(Redirect::to("/drivers"))
}

/// Edit page of one driver.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Rendered> {
    let found = driver::get_driver(&state.db, id).await?;
    state.render(
        "driver_edit",
        json!({
            "title": "Edit driver",
            "username": session.username,
            "role": session.role,
            "driver": driver_json(&found),
        }),
    )
}

/// Saves the edit form.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<DriverForm>,
) -> Result<Redirect> {
    driver::update_driver(&state.db, id, &form.first_name, &form.last_name, &form.father_name)
        .await?;
    Ok(Redirect::to("/drivers"))
}

/// Removes the driver together with their cars and those cars' trips.
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    driver::delete_driver(&state.db, id).await?;
    Ok(Redirect::to("/drivers"))
}

/// Cars assigned to one driver.
pub async fn autos(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Rendered> {
    let found = driver::get_driver(&state.db, id).await?;
    let cars = driver::cars_for_driver(&state.db, id).await?;
    state.render(
        "driver_autos",
        json!({
            "title": format!("Cars of {}", found.full_name()),
            "username": session.username,
            "role": session.role,
            "driver": driver_json(&found),
            "cars": cars,
        }),
    )
}
