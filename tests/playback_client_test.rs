//! PlaybackClient against a mocked Spotify Web API

use reqwest::Client;
use serde_json::json;
use songpilot::{
    Error,
    spotify::PlaybackClient,
    types::{Credential, Track},
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PlaybackClient {
    let http = Client::builder().no_proxy().build().unwrap();
    PlaybackClient::with_client(http, server.uri())
}

fn credential() -> Credential {
    Credential::new("test-token")
}

fn track_json(id: &str, name: &str, artists: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn test_search_tracks_keeps_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "imagine"))
        .and(query_param("type", "track"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [
                track_json("b", "Imagine", &["John Lennon"]),
                track_json("a", "Imagine Dragons Medley", &["Various", "Artists"]),
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = client_for(&server)
        .search_tracks(&credential(), "imagine")
        .await
        .unwrap();

    assert_eq!(
        tracks,
        vec![
            Track {
                id: "b".to_string(),
                name: "Imagine".to_string(),
                artists: vec!["John Lennon".to_string()],
            },
            Track {
                id: "a".to_string(),
                name: "Imagine Dragons Medley".to_string(),
                artists: vec!["Various".to_string(), "Artists".to_string()],
            },
        ]
    );
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(
        client
            .search_tracks(&credential(), "zzzz")
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(client.search_track(&credential(), "zzzz").await.unwrap(), None);
}

#[tokio::test]
async fn test_currently_playing_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let status = client_for(&server)
        .get_currently_playing(&credential())
        .await
        .unwrap();
    assert!(status.is_none());
}

#[tokio::test]
async fn test_currently_playing_parses_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": true,
            "progress_ms": 42000,
            "item": track_json("t1", "Imagine", &["John Lennon"]),
        })))
        .mount(&server)
        .await;

    let status = client_for(&server)
        .get_currently_playing(&credential())
        .await
        .unwrap()
        .unwrap();

    assert!(status.is_playing);
    assert_eq!(status.progress_ms, Some(42000));
    assert_eq!(status.item.unwrap().name, "Imagine");
}

#[tokio::test]
async fn test_play_track_on_device() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/me/player/play"))
        .and(query_param("device_id", "desk"))
        .and(body_json(json!({ "uris": ["spotify:track:t1"] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .play(&credential(), Some("t1"), Some("desk"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_to_queue() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/me/player/queue"))
        .and(query_param("uri", "spotify:track:t9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .add_to_queue(&credential(), "t9", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_devices() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [
                { "id": "d1", "name": "Salon", "type": "Speaker", "is_active": true, "volume_percent": 40 },
                { "id": null, "name": "Phone", "type": "Smartphone", "is_active": false, "volume_percent": null }
            ]
        })))
        .mount(&server)
        .await;

    let devices = client_for(&server).list_devices(&credential()).await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].id.as_deref(), Some("d1"));
    assert!(devices[0].is_active);
    assert_eq!(devices[1].kind, "Smartphone");
    assert_eq!(devices[1].id, None);
}

#[tokio::test]
async fn test_non_success_status_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/me/player/pause"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server).pause(&credential()).await.unwrap_err();
    match err {
        Error::Provider { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let http = Client::builder().no_proxy().build().unwrap();
    // Nothing listens on port 9 locally
    let client = PlaybackClient::with_client(http, "http://127.0.0.1:9");

    let err = client.pause(&credential()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
