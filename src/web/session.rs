//! Cookie sessions for signed-in users.
//!
//! The cookie carries only an opaque random token; the session data lives in
//! a [`SessionStore`]. Handlers ask for a [`CurrentUser`] to require a login.

use crate::errors::Error;
use crate::web::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "autopark_session";

/// What a session remembers about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Id of the `users` row
    pub user_id: i64,
    /// Login name, shown in page headers
    pub username: String,
    /// Role name; pages use it to gate their controls
    pub role: String,
}

/// Server-side session storage keyed by opaque token.
pub trait SessionStore: Send + Sync {
    /// Stores `data` under a fresh token and returns the token.
    fn create(&self, data: SessionData) -> String;

    /// Looks up a live session.
    fn get(&self, token: &str) -> Option<SessionData>;

    /// Forgets a session. Unknown tokens are ignored.
    fn remove(&self, token: &str);
}

struct StoredSession {
    data: SessionData,
    created_at: i64,
}

/// Process-local session store with a fixed time to live.
///
/// Expired sessions are dropped when looked up and swept on every `create`.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    ttl_secs: i64,
}

impl InMemorySessionStore {
    /// Store whose sessions live for `ttl_secs` seconds.
    #[must_use]
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl_secs,
        }
    }

    fn is_expired(&self, session: &StoredSession, now: i64) -> bool {
        now - session.created_at >= self.ttl_secs
    }

    /// Drops every expired session.
    pub fn cleanup_expired_sessions(&self) {
        let now = chrono::Utc::now().timestamp();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.retain(|_, session| !self.is_expired(session, now));
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, data: SessionData) -> String {
        let token = Uuid::new_v4().to_string();
        let stored = StoredSession {
            data,
            created_at: chrono::Utc::now().timestamp(),
        };

        self.cleanup_expired_sessions();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.clone(), stored);
        }
        token
    }

    fn get(&self, token: &str) -> Option<SessionData> {
        let now = chrono::Utc::now().timestamp();
        {
            let sessions = self.sessions.read().ok()?;
            let session = sessions.get(token)?;
            if !self.is_expired(session, now) {
                return Some(session.data.clone());
            }
        }

        self.remove(token);
        None
    }

    fn remove(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }
}

/// Builds the session cookie: HttpOnly, SameSite=Lax, scoped to the whole site.
#[must_use]
pub fn session_cookie(token: String, ttl_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs))
        .path("/")
        .build()
}

/// An already-expired cookie that clears the session in the browser.
#[must_use]
pub fn logout_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}

/// Resolves the session referenced by the request cookies.
///
/// # Errors
/// Returns `Unauthenticated` if there is no cookie or the session is unknown or expired.
pub fn session_from_jar(jar: &CookieJar, store: &dyn SessionStore) -> Result<SessionData, Error> {
    let cookie = jar.get(SESSION_COOKIE_NAME).ok_or(Error::Unauthenticated)?;
    store.get(cookie.value()).ok_or(Error::Unauthenticated)
}

/// Extractor for handlers that require a signed-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionData);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        session_from_jar(&jar, state.sessions.as_ref()).map(CurrentUser)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn alice() -> SessionData {
        SessionData {
            user_id: 1,
            username: "alice".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_session_round_trip() {
        let store = InMemorySessionStore::new(3600);
        let token = store.create(alice());

        assert_eq!(store.get(&token), Some(alice()));
        assert_eq!(store.get("not-a-token"), None);

        store.remove(&token);
        assert_eq!(store.get(&token), None);
        // Removing twice is harmless
        store.remove(&token);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = InMemorySessionStore::new(3600);
        assert_ne!(store.create(alice()), store.create(alice()));
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let store = InMemorySessionStore::new(0);
        let token = store.create(alice());
        assert_eq!(store.get(&token), None);
        assert!(store.sessions.read().unwrap().is_empty());
    }

    #[test]
    fn test_create_sweeps_abandoned_sessions() {
        let store = InMemorySessionStore::new(0);
        for _ in 0..1000 {
            store.create(alice());
        }
        // Only the newest session can still be in the map
        assert!(store.sessions.read().unwrap().len() <= 1);

        store.cleanup_expired_sessions();
        assert!(store.sessions.read().unwrap().is_empty());
    }

    #[test]
    fn test_cleanup_keeps_live_sessions() {
        let store = InMemorySessionStore::new(3600);
        let tokens: Vec<String> = (0..3).map(|_| store.create(alice())).collect();

        store.cleanup_expired_sessions();
        assert_eq!(store.sessions.read().unwrap().len(), 3);
        for token in &tokens {
            assert_eq!(store.get(token), Some(alice()));
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), 60, true);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let cleared = logout_cookie(false);
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_session_from_jar() {
        let store = InMemorySessionStore::new(3600);
        let token = store.create(alice());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={token}")).unwrap(),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_from_jar(&jar, &store).unwrap(), alice());

        let empty = CookieJar::from_headers(&HeaderMap::new());
        assert!(matches!(
            session_from_jar(&empty, &store).unwrap_err(),
            Error::Unauthenticated
        ));
    }
}
