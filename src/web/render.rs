//! View rendering behind a trait so the page technology can be swapped.
//!
//! Handlers build a plain JSON view model and name the view; the renderer
//! decides what bytes go on the wire.

use crate::errors::{Error, Result};
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

/// A rendered page ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Value of the `Content-Type` header
    pub content_type: &'static str,
    /// Response body
    pub body: Vec<u8>,
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Turns a named view and its model into a response body.
pub trait ViewRenderer: Send + Sync {
    /// Renders the named view with its model.
    ///
    /// # Errors
    /// Returns `Render` if the view cannot be produced.
    fn render(&self, view: &str, model: &Map<String, Value>) -> Result<Rendered>;
}

/// Renders every view as `{"view": ..., "model": {...}}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, view: &str, model: &Map<String, Value>) -> Result<Rendered> {
        let body = serde_json::to_vec(&json!({ "view": view, "model": model })).map_err(|e| {
            Error::Render {
                message: format!("view '{view}': {e}"),
            }
        })?;
        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}

/// Converts a `json!` object into a view model.
///
/// # Errors
/// Returns `Render` if `model` is not a JSON object.
pub fn view_model(model: Value) -> Result<Map<String, Value>> {
    match model {
        Value::Object(map) => Ok(map),
        other => Err(Error::Render {
            message: format!("view model must be an object, got {other}"),
        }),
    }
}
