use reqwest::{StatusCode, header::CONTENT_LENGTH};

use crate::{
    error::Result,
    spotify::PlaybackClient,
    types::{
        Credential, CurrentlyPlayingResponse, Device, DevicesResponse, PlaybackStatus,
        StartPlaybackRequest, track_uri,
    },
};

impl PlaybackClient {
    /// Current playback, or `None` when the account has no active playback.
    pub async fn get_currently_playing(
        &self,
        credential: &Credential,
    ) -> Result<Option<PlaybackStatus>> {
        let request = self.http.get(self.endpoint("/me/player/currently-playing"));
        let response = self.send(request, credential).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let res: CurrentlyPlayingResponse = serde_json::from_str(&body)?;
        Ok(Some(res.into()))
    }

    /// Starts `track_id` on `device_id`, or resumes whatever is loaded there
    /// when `track_id` is `None`.
    pub async fn play(
        &self,
        credential: &Credential,
        track_id: Option<&str>,
        device_id: Option<&str>,
    ) -> Result<()> {
        let mut request = self.http.put(self.endpoint("/me/player/play"));
        if let Some(device_id) = device_id {
            request = request.query(&[("device_id", device_id)]);
        }
        request = match track_id {
            Some(id) => request.json(&StartPlaybackRequest {
                uris: vec![track_uri(id)],
            }),
            None => request.json(&serde_json::json!({})),
        };

        self.send(request, credential).await?;
        tracing::debug!(track_id, "playback started");
        Ok(())
    }

    pub async fn pause(&self, credential: &Credential) -> Result<()> {
        let request = self
            .http
            .put(self.endpoint("/me/player/pause"))
            .header(CONTENT_LENGTH, "0");
        self.send(request, credential).await?;
        Ok(())
    }

    pub async fn add_to_queue(
        &self,
        credential: &Credential,
        track_id: &str,
        device_id: Option<&str>,
    ) -> Result<()> {
        let uri = track_uri(track_id);
        let mut query = vec![("uri", uri.as_str())];
        if let Some(device_id) = device_id {
            query.push(("device_id", device_id));
        }

        let request = self
            .http
            .post(self.endpoint("/me/player/queue"))
            .query(&query)
            .header(CONTENT_LENGTH, "0");
        self.send(request, credential).await?;
        Ok(())
    }

    pub async fn list_devices(&self, credential: &Credential) -> Result<Vec<Device>> {
        let request = self.http.get(self.endpoint("/me/player/devices"));
        let res: DevicesResponse = self.send_json(request, credential).await?;
        Ok(res.devices)
    }
}
