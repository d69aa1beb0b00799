//! Loads per-trip JSON event arrays from disk.
//!
//! Loading is all-or-nothing: the first file that cannot be read or decoded aborts the
//! load, so the replay never starts from a partial fleet.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::event::Event;
use crate::trip::Trip;

/// Fleet files shipped with the dashboard data set and their display names.
pub const FLEET_FILES: [(&str, &str); 5] = [
    ("trip1crosscountry.json", "Cross-Country Long Haul"),
    ("trip2urbandense.json", "Urban Dense Delivery"),
    ("trip3mountaincancelled.json", "Mountain Route (Cancelled)"),
    ("trip4southerntechnical.json", "Southern Technical Issues"),
    ("trip5regionallogistics.json", "Regional Logistics"),
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One entry of the load manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFile {
    pub file: String,
    /// Falls back to [display_name_for] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl TripFile {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            display_name: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| display_name_for(&self.file))
    }
}

pub fn default_manifest() -> Vec<TripFile> {
    FLEET_FILES
        .iter()
        .map(|(file, _)| TripFile::new(*file))
        .collect()
}

/// Friendly name for a known fleet file; any other file keeps its own name.
pub fn display_name_for(file: &str) -> String {
    FLEET_FILES
        .iter()
        .find(|(known, _)| *known == file)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| file.to_string())
}

/// Decodes a JSON array of events into a trip.
pub fn parse_trip(
    id: impl Into<String>,
    display_name: impl Into<String>,
    json: &str,
) -> Result<Trip, serde_json::Error> {
    let events: Vec<Event> = serde_json::from_str(json)?;
    Ok(Trip::new(id, display_name, events))
}

/// Reads one event file. The trip id is the file stem.
pub fn load_trip_file(path: &Path, display_name: &str) -> Result<Trip, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_name.to_string());
    let trip = parse_trip(id, display_name, &contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(trip = trip.id(), events = trip.len(), "trip loaded");
    Ok(trip)
}

/// Loads every manifest entry from `dir`, in manifest order.
pub fn load_all_trips(dir: &Path, manifest: &[TripFile]) -> Result<Vec<Trip>, LoadError> {
    let trips = manifest
        .iter()
        .map(|entry| load_trip_file(&dir.join(&entry.file), &entry.display_name()))
        .collect::<Result<Vec<_>, _>>()?;
    info!(trips = trips.len(), dir = %dir.display(), "fleet loaded");
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIP_JSON: &str = r#"[
        {"event_id": "e1", "event_type": "trip_started", "timestamp": "2025-11-03T08:00:00.000Z",
         "estimated_duration_hours": 2, "location": {"lat": 40.0, "lng": -74.0}},
        {"event_id": "e2", "event_type": "location_ping", "timestamp": "2025-11-03T08:30:00.000Z"}
    ]"#;

    #[test]
    fn known_files_get_friendly_names() {
        assert_eq!(
            display_name_for("trip3mountaincancelled.json"),
            "Mountain Route (Cancelled)"
        );
        assert_eq!(display_name_for("custom.json"), "custom.json");
        assert_eq!(
            TripFile {
                file: "trip1crosscountry.json".to_string(),
                display_name: Some("Override".to_string()),
            }
            .display_name(),
            "Override"
        );
    }

    #[test]
    fn loads_manifest_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("b.json"), TRIP_JSON).expect("write");
        fs::write(dir.path().join("a.json"), "[]").expect("write");

        let trips = load_all_trips(dir.path(), &[TripFile::new("b.json"), TripFile::new("a.json")])
            .expect("trips");
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].id(), "b");
        assert_eq!(trips[0].display_name(), "b.json");
        assert_eq!(trips[0].len(), 2);
        assert!(trips[1].is_empty());
    }

    #[test]
    fn any_failing_file_aborts_the_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("good.json"), TRIP_JSON).expect("write");
        fs::write(dir.path().join("bad.json"), r#"{"not": "an array"}"#).expect("write");

        let err = load_all_trips(
            dir.path(),
            &[TripFile::new("good.json"), TripFile::new("bad.json")],
        )
        .expect_err("decode failure");
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));

        let err = load_all_trips(dir.path(), &[TripFile::new("missing.json")])
            .expect_err("missing file");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn default_manifest_lists_fleet_files() {
        let manifest = default_manifest();
        assert_eq!(manifest.len(), FLEET_FILES.len());
        assert_eq!(manifest[4].display_name(), "Regional Logistics");
    }
}
