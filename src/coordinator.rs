//! Entry point for the command layer.
//!
//! [`Coordinator`] owns the process-wide credential. Every operation first
//! makes sure a credential exists, running at most one authorization attempt
//! at a time; callers arriving while an attempt is in flight wait for that
//! same attempt. Failures never escape: each operation returns a message.

use std::sync::Arc;

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    error::{AuthError, Error, Result},
    spotify::{
        PlaybackClient,
        auth::{AuthorizationFlow, Authorize},
    },
    types::Credential,
    utils,
};

/// Stable outcome messages returned to the command layer.
pub mod messages {
    pub const NOT_FOUND: &str = "Impossible de trouver cette musique";
    pub const NO_TRACKS: &str = "Aucun titre trouvé";
    pub const ALREADY_PLAYING: &str = "Une musique est déjà en cours de lecture";
    pub const RESUMED: &str = "La musique reprend";
    pub const PAUSED: &str = "La musique est en pause";
    pub const NO_DEVICES: &str = "Aucun appareil disponible";
    pub const SERVICE_UNAVAILABLE: &str =
        "Le service de musique n'est pas disponible pour le moment";
    pub const AUTH_FAILED: &str = "L'autorisation Spotify a échoué";
    pub const AUTH_TIMEOUT: &str = "L'autorisation Spotify n'a pas abouti à temps";
}

type PendingAuth = Shared<BoxFuture<'static, std::result::Result<Credential, AuthError>>>;

enum AuthSlot {
    Absent,
    Pending(PendingAuth),
    Ready(Credential),
}

pub struct Coordinator<A = AuthorizationFlow> {
    authorizer: Arc<A>,
    client: PlaybackClient,
    target: Option<String>,
    slot: Mutex<AuthSlot>,
}

impl Coordinator {
    /// Wires the browser-based flow and the Web API client from settings.
    pub fn from_settings(settings: Settings) -> Self {
        let flow = AuthorizationFlow::new(&settings);
        let client = PlaybackClient::new(settings.api_url);
        Self::new(flow, client, settings.device_id)
    }
}

impl<A: Authorize> Coordinator<A> {
    pub fn new(authorizer: A, client: PlaybackClient, target: Option<String>) -> Self {
        Self {
            authorizer: Arc::new(authorizer),
            client,
            target,
            slot: Mutex::new(AuthSlot::Absent),
        }
    }

    /// Returns the cached credential, authorizing first if there is none.
    ///
    /// Concurrent callers share one attempt and all observe its outcome. A
    /// failed attempt leaves no credential, so the next call starts over.
    pub async fn ensure_authorized(&self) -> std::result::Result<Credential, AuthError> {
        let pending = {
            let mut slot = self.slot.lock().await;
            let in_flight = match &*slot {
                AuthSlot::Ready(credential) => return Ok(credential.clone()),
                AuthSlot::Pending(attempt) => Some(attempt.clone()),
                AuthSlot::Absent => None,
            };
            match in_flight {
                Some(attempt) => attempt,
                None => {
                    tracing::info!("no credential, starting authorization");
                    let authorizer = Arc::clone(&self.authorizer);
                    let attempt = async move { authorizer.authorize().await }
                        .boxed()
                        .shared();
                    *slot = AuthSlot::Pending(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slot = self.slot.lock().await;
        let settled_here =
            matches!(&*slot, AuthSlot::Pending(current) if current.ptr_eq(&pending));
        if settled_here {
            *slot = match &outcome {
                Ok(credential) => AuthSlot::Ready(credential.clone()),
                Err(_) => AuthSlot::Absent,
            };
        }

        outcome
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Plays the best match for `title` on the configured device.
    pub async fn play_track_by_name(&self, title: &str) -> String {
        self.outcome("play", self.try_play_track_by_name(title).await)
    }

    /// Resumes playback unless something is already playing.
    pub async fn resume(&self) -> String {
        self.outcome("resume", self.try_resume().await)
    }

    pub async fn pause(&self) -> String {
        self.outcome("pause", self.try_pause().await)
    }

    /// Lists every match for `query` as `name par artist`.
    pub async fn search_tracks(&self, query: &str) -> String {
        self.outcome("search", self.try_search_tracks(query).await)
    }

    /// Adds the best match for `title` to the play queue.
    pub async fn queue_track_by_name(&self, title: &str) -> String {
        self.outcome("queue", self.try_queue_track_by_name(title).await)
    }

    pub async fn devices(&self) -> String {
        self.outcome("devices", self.try_devices().await)
    }

    async fn try_play_track_by_name(&self, title: &str) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        let Some(track) = self.client.search_track(&credential, title).await? else {
            return Ok(messages::NOT_FOUND.to_string());
        };

        tracing::info!(track = %track.name, artist = track.primary_artist(), "playing");
        self.client
            .play(&credential, Some(track.id.as_str()), self.target())
            .await?;

        Ok(format!(
            "La musique {} est en cours de lecture",
            utils::describe_track(&track)
        ))
    }

    async fn try_resume(&self) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        let playing = self
            .client
            .get_currently_playing(&credential)
            .await?
            .is_some_and(|status| status.is_playing);
        if playing {
            return Ok(messages::ALREADY_PLAYING.to_string());
        }

        self.client.play(&credential, None, self.target()).await?;
        Ok(messages::RESUMED.to_string())
    }

    async fn try_pause(&self) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        self.client.pause(&credential).await?;
        Ok(messages::PAUSED.to_string())
    }

    async fn try_search_tracks(&self, query: &str) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        let tracks = self.client.search_tracks(&credential, query).await?;
        if tracks.is_empty() {
            return Ok(messages::NO_TRACKS.to_string());
        }

        Ok(format!(
            "Voici les titres trouvés : {}",
            utils::describe_tracks(&tracks)
        ))
    }

    async fn try_queue_track_by_name(&self, title: &str) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        let Some(track) = self.client.search_track(&credential, title).await? else {
            return Ok(messages::NOT_FOUND.to_string());
        };

        self.client
            .add_to_queue(&credential, &track.id, self.target())
            .await?;

        Ok(format!(
            "La musique {} a été ajoutée à la file d'attente",
            utils::describe_track(&track)
        ))
    }

    async fn try_devices(&self) -> Result<String> {
        let credential = self.ensure_authorized().await?;
        let devices = self.client.list_devices(&credential).await?;
        if devices.is_empty() {
            return Ok(messages::NO_DEVICES.to_string());
        }

        Ok(format!(
            "Voici les appareils disponibles : {}",
            utils::describe_devices(&devices)
        ))
    }

    fn outcome(&self, operation: &str, result: Result<String>) -> String {
        match result {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(operation, error = %e, "operation failed");
                failure_message(&e).to_string()
            }
        }
    }
}

/// User-facing message for a failed operation.
pub fn failure_message(error: &Error) -> &'static str {
    match error {
        Error::Auth(AuthError::Timeout(_)) => messages::AUTH_TIMEOUT,
        Error::Auth(_) => messages::AUTH_FAILED,
        _ => messages::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn failures_map_to_stable_messages() {
        assert_eq!(
            failure_message(&Error::Provider {
                status: 503,
                body: String::new()
            }),
            messages::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            failure_message(&AuthError::Timeout(Duration::from_secs(3)).into()),
            messages::AUTH_TIMEOUT
        );
        assert_eq!(
            failure_message(&AuthError::StateMismatch.into()),
            messages::AUTH_FAILED
        );
    }
}
