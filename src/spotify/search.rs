use crate::{
    error::Result,
    spotify::PlaybackClient,
    types::{Credential, SearchResponse, Track, TrackObject},
};

impl PlaybackClient {
    /// Tracks matching `query`, in the provider's relevance order.
    ///
    /// No match is an empty vector, not an error.
    pub async fn search_tracks(&self, credential: &Credential, query: &str) -> Result<Vec<Track>> {
        let request = self
            .http
            .get(self.endpoint("/search"))
            .query(&[("q", query), ("type", "track")]);

        let res: SearchResponse = self.send_json(request, credential).await?;
        let tracks: Vec<Track> = res
            .tracks
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(TrackObject::into_track)
            .collect();

        tracing::debug!(query, found = tracks.len(), "track search");
        Ok(tracks)
    }

    /// First match of [`search_tracks`](Self::search_tracks).
    pub async fn search_track(&self, credential: &Credential, query: &str) -> Result<Option<Track>> {
        Ok(self
            .search_tracks(credential, query)
            .await?
            .into_iter()
            .next())
    }
}
