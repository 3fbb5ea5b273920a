use rand::{Rng, distr::Alphanumeric};

use crate::types::{Device, Track};

/// Random nonce sent as the OAuth `state` and expected back on the redirect.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// `"<name> par <first artist>"`.
pub fn describe_track(track: &Track) -> String {
    format!("{} par {}", track.name, track.primary_artist())
}

/// Comma separated listing, keeping the provider's relevance order.
pub fn describe_tracks(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(describe_track)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn describe_devices(devices: &[Device]) -> String {
    devices
        .iter()
        .map(|d| {
            if d.is_active {
                format!("{} ({}, actif)", d.name, d.kind)
            } else {
                format!("{} ({})", d.name, d.kind)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
