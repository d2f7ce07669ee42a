//! Server settings loading from config.toml
//!
//! All keys are optional; a missing file yields the defaults so the server
//! can start with nothing but a `DATABASE_URL`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// HTTP server settings
    pub server: ServerSettings,
    /// Login and session settings
    pub auth: AuthSettings,
}

/// `[server]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind_addr: String,
}

/// `[auth]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSettings {
    /// Session lifetime in seconds
    pub session_ttl_secs: i64,
    /// bcrypt cost used when registering accounts
    pub password_hash_cost: u32,
    /// Whether the session cookie is marked `Secure`
    pub secure_cookies: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_secs: 3600,
            password_hash_cost: bcrypt::DEFAULT_COST,
            secure_cookies: false,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A key has the wrong type
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_settings(&contents)
}

fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from ./config.toml, falling back to defaults when the file is absent.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using default settings");
        return Ok(Settings::default());
    }
    load_settings(path)
}
