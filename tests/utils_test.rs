use songpilot::types::{Device, Track};
use songpilot::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

fn create_test_device(name: &str, kind: &str, is_active: bool) -> Device {
    Device {
        id: Some(format!("{}_id", name)),
        name: name.to_string(),
        kind: kind.to_string(),
        is_active,
        volume_percent: Some(50),
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_describe_track_uses_first_artist() {
    let track = create_test_track("1", "Under Pressure", &["Queen", "David Bowie"]);
    assert_eq!(describe_track(&track), "Under Pressure par Queen");
}

#[test]
fn test_describe_track_without_artists() {
    let track = create_test_track("1", "Untitled", &[]);
    assert_eq!(track.primary_artist(), "");
    assert_eq!(describe_track(&track), "Untitled par ");
}

#[test]
fn test_describe_tracks_keeps_order() {
    let tracks = vec![
        create_test_track("2", "Zebra", &["Beach House"]),
        create_test_track("1", "Alpha", &["Vangelis"]),
    ];
    assert_eq!(
        describe_tracks(&tracks),
        "Zebra par Beach House, Alpha par Vangelis"
    );
}

#[test]
fn test_describe_tracks_empty() {
    assert_eq!(describe_tracks(&[]), "");
}

#[test]
fn test_describe_devices_marks_active() {
    let devices = vec![
        create_test_device("Salon", "Speaker", false),
        create_test_device("Bureau", "Computer", true),
    ];
    assert_eq!(
        describe_devices(&devices),
        "Salon (Speaker), Bureau (Computer, actif)"
    );
}
