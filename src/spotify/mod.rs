//! # Spotify Integration Module
//!
//! Authorization and the authenticated Web API client used by the
//! coordinator.
//!
//! ## Architecture
//!
//! ```text
//! Coordinator (authorization gate, user messages)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authorization (implicit grant + local callback listener)
//!     ├── Search
//!     └── Player (state, play/resume, pause, queue, devices)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - [`auth::AuthorizationFlow`]: builds the authorization URL,
//!   opens the browser and waits for the redirect with a bounded timeout.
//! - [`search`] - Track search.
//! - [`player`] - Player state and transport commands.
//!
//! ## Error Handling
//!
//! Every request is a single attempt. A non-success status becomes
//! [`Error::Provider`] with the response body, a network failure becomes
//! [`Error::Transport`]. Nothing here triggers authorization: callers pass
//! a [`Credential`] they already hold.

pub mod auth;
pub mod player;
pub mod search;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::{Error, Result},
    types::Credential,
};

/// Thin authenticated wrapper over the Spotify Web API.
#[derive(Debug, Clone)]
pub struct PlaybackClient {
    http: Client,
    api_url: String,
}

impl PlaybackClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends with the bearer token and turns a non-success status into
    /// [`Error::Provider`].
    async fn send(&self, request: RequestBuilder, credential: &Credential) -> Result<Response> {
        let response = request.bearer_auth(credential.access_token()).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "spotify request failed");
        Err(Error::Provider {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credential: &Credential,
    ) -> Result<T> {
        let body = self.send(request, credential).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
