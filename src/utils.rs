use std::collections::HashSet;

use chrono::{DateTime, Local, Utc};

use crate::types::{PlaylistRecord, PlaylistTableRow};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Keeps the first playlist for every id, preserving provider order.
pub fn remove_duplicate_playlists(playlists: &mut Vec<PlaylistRecord>) {
    let mut seen_ids = HashSet::new();
    playlists.retain(|playlist| seen_ids.insert(playlist.id.clone()));
}

pub fn playlist_table_rows(playlists: &[PlaylistRecord]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            owner: p.owner.clone(),
            tracks: p.track_count,
            url: p.external_url.clone(),
        })
        .collect()
}

/// Renders epoch milliseconds in local time, or "unknown" for the zero value.
pub fn format_millis(millis: i64) -> String {
    if millis <= 0 {
        return "unknown".to_string();
    }

    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}

/// Returns `Some(value)` unless the value is absent or blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
