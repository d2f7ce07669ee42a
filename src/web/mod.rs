//! HTTP interface - axum router, shared state and form handlers.
//!
//! Handlers stay thin: they resolve the session, parse the form, call into
//! [`crate::core`] and either render a view or redirect with 303.

pub mod error;
pub mod handlers;
pub mod render;
pub mod session;

use crate::{
    config::settings::Settings,
    core::report::{SpreadsheetWriter, XlsxJournalWriter},
    errors::Result,
};
use axum::{
    Router,
    routing::{get, post},
};
use render::{JsonRenderer, Rendered, ViewRenderer, view_model};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use session::{InMemorySessionStore, SessionStore};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool
    pub db: Arc<DatabaseConnection>,
    /// Login sessions
    pub sessions: Arc<dyn SessionStore>,
    /// Page renderer
    pub renderer: Arc<dyn ViewRenderer>,
    /// Journal spreadsheet writer used by `/download`
    pub exporter: Arc<dyn SpreadsheetWriter>,
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State with the in-memory session store, JSON views and xlsx export.
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: Settings) -> Self {
        Self {
            db: Arc::new(db),
            sessions: Arc::new(InMemorySessionStore::new(settings.auth.session_ttl_secs)),
            renderer: Arc::new(JsonRenderer),
            exporter: Arc::new(XlsxJournalWriter),
            settings: Arc::new(settings),
        }
    }

    /// Renders `view` with a `json!` object as its model.
    pub fn render(&self, view: &str, model: Value) -> Result<Rendered> {
        self.renderer.render(view, &view_model(model)?)
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    use handlers::{auth, cars, drivers, journal, reports, routes};

    Router::new()
        .route("/health", get(reports::health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(reports::dashboard))
        .route("/drivers", get(drivers::list).post(drivers::create))
        .route("/drivers/:id", get(drivers::show).post(drivers::update))
        .route("/drivers/:id/delete", post(drivers::delete))
        .route("/drivers/:id/autos", get(drivers::autos))
        .route("/autos", get(cars::list).post(cars::create))
        .route("/autos/:id", get(cars::show).post(cars::update))
        .route("/autos/:id/delete", post(cars::delete))
        .route("/routes", get(routes::list).post(routes::create))
        .route("/routes/:id", get(routes::show).post(routes::update))
        .route("/routes/:id/delete", post(routes::delete))
        .route("/journal", get(journal::list).post(journal::create))
        .route("/journal/:id", get(journal::show))
        .route("/journal/:id/complete", post(journal::complete))
        .route("/journal/:id/update", post(journal::update))
        .route("/journal/:id/delete", post(journal::delete))
        .route("/download", get(reports::download))
        .route("/statistics", get(reports::statistics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
