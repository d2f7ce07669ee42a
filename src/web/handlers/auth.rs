//! Login, registration and logout.

use crate::{
    core::user,
    errors::Result,
    web::{
        AppState,
        render::Rendered,
        session::{SESSION_COOKIE_NAME, SessionData, logout_cookie, session_cookie},
    },
};
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Login and registration form.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    /// Login name
    pub username: String,
    /// Plain password, hashed or verified immediately
    pub password: String,
}

/// Login page.
pub async fn login_page(State(state): State<AppState>) -> Result<Rendered> {
    state.render("login", json!({ "title": "Sign in" }))
}

/// Checks the credentials, starts a session and sets its cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse> {
    let account = user::authenticate_user(&state.db, &form.username, &form.password).await?;

    let token = state.sessions.create(SessionData {
        user_id: account.id,
        username: account.username.clone(),
        role: account.role,
    });
    info!("User {} signed in", account.username);

    let auth = &state.settings.auth;
    let cookie = session_cookie(token, auth.session_ttl_secs, auth.secure_cookies);
    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

/// Registration page.
pub async fn register_page(State(state): State<AppState>) -> Result<Rendered> {
    state.render("register", json!({ "title": "Create account" }))
}

/// Creates an account, then sends the user to the login page.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    user::register_user_with_cost(
        &state.db,
        &form.username,
        &form.password,
        state.settings.auth.password_hash_cost,
    )
    .await?;
    Ok(Redirect::to("/login"))
}

/// Always succeeds, with or without a live session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        state.sessions.remove(cookie.value());
    }
    let jar = jar.add(logout_cookie(state.settings.auth.secure_cookies));
    (jar, Redirect::to("/login"))
}
