//! Configuration management for songpilot.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::error::{Error, Result};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Scopes requested on every authorization.
pub const SCOPES: [&str; 4] = [
    "user-read-email",
    "app-remote-control",
    "user-read-playback-state",
    "user-modify-playback-state",
];

/// Loads environment variables from `<data_local_dir>/songpilot/.env`.
///
/// The directory is created if needed. A missing file is fine: variables may
/// come from the process environment alone, and variables that are already
/// set are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/songpilot/.env`
/// - macOS: `~/Library/Application Support/songpilot/.env`
/// - Windows: `%LOCALAPPDATA%/songpilot/.env`
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded env file");
            Ok(())
        }
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Config(format!("{}: {}", path.display(), e))),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songpilot/.env");
    path
}

/// Everything the coordinator needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    /// Playback target; `None` lets Spotify pick the active device.
    pub device_id: Option<String>,
    /// Registered redirect URI. The callback listener binds its port and
    /// serves its path.
    pub redirect_uri: Url,
    pub auth_url: Url,
    pub api_url: String,
    pub auth_timeout: Duration,
}

impl Settings {
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client_id: client_id.into(),
            device_id: None,
            redirect_uri: parse_url("redirect uri", DEFAULT_REDIRECT_URI)?,
            auth_url: parse_url("auth url", DEFAULT_AUTH_URL)?,
            api_url: DEFAULT_API_URL.to_string(),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
        })
    }

    /// Reads the settings from the environment.
    ///
    /// Only `SPOTIFY_CLIENT_ID` is required.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("SPOTIFY_CLIENT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("SPOTIFY_CLIENT_ID must be set".to_string()))?;

        let mut settings = Self::new(client_id)?;
        settings.device_id = optional_var("SPOTIFY_DEVICE_ID");

        if let Some(uri) = optional_var("SPOTIFY_REDIRECT_URI") {
            settings.redirect_uri = parse_url("SPOTIFY_REDIRECT_URI", &uri)?;
        }
        if let Some(url) = optional_var("SPOTIFY_AUTH_URL") {
            settings.auth_url = parse_url("SPOTIFY_AUTH_URL", &url)?;
        }
        if let Some(url) = optional_var("SPOTIFY_API_URL") {
            settings.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = optional_var("SPOTIFY_AUTH_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("SPOTIFY_AUTH_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            settings.auth_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Config(format!("{name} is invalid ({value}): {e}")))
}
