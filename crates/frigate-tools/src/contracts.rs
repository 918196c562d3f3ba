//! Result shapes returned by the tool operations.
//!
//! Every type here is a request-scoped projection of exactly one Frigate
//! JSON response. Fields that are contractually present-only-under-a-flag
//! (`thumbnail`, `duration`, `media.clip`) are skipped entirely when absent;
//! everything else mirrors whatever the backend reported, including nulls.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// One camera from the Frigate configuration, reduced to identity plus the
/// detection geometry.
#[derive(Debug, Clone, Serialize)]
pub struct CameraSummary {
    pub name: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<i64>,
}

/// One detection event as returned by the events listing.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: Option<String>,
    pub camera: Option<String>,
    pub label: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub has_clip: bool,
    pub has_snapshot: bool,
    pub zone: Vec<String>,
    /// Present only when the event has a snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Full detail for a single event, including derived media URLs.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub id: Option<String>,
    pub camera: Option<String>,
    pub label: Option<String>,
    pub sub_label: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    /// `end_time - start_time`; present only for events that have ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub score: Option<f64>,
    pub zones: Vec<String>,
    pub has_clip: bool,
    pub has_snapshot: bool,
    pub retain_indefinitely: bool,
    pub media: EventMedia,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventMedia {
    pub thumbnail: String,
    pub snapshot: String,
    /// Present only when the event has a recorded clip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<String>,
}

/// System statistics, filtered to a known field subset per category.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub service: ServiceStats,
    pub detectors: BTreeMap<String, DetectorStats>,
    pub cameras: BTreeMap<String, CameraStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub uptime: Option<serde_json::Value>,
    pub version: Option<String>,
    pub storage: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectorStats {
    pub inference_speed: Option<f64>,
    pub detection_start: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraStats {
    pub camera_fps: Option<f64>,
    pub process_fps: Option<f64>,
    pub detection_fps: Option<f64>,
}

/// Snapshot URL plus the request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub camera: String,
    pub timestamp: SnapshotMoment,
    pub url: String,
    pub description: String,
}

/// Either a concrete unix timestamp or the literal string `"latest"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMoment {
    Unix(i64),
    Latest,
}

impl Serialize for SnapshotMoment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Unix(ts) => serializer.serialize_i64(*ts),
            Self::Latest => serializer.serialize_str("latest"),
        }
    }
}

/// Per-hour recording segments for one camera on one date.
#[derive(Debug, Clone, Serialize)]
pub struct RecordingsSummary {
    pub camera: String,
    pub date: String,
    pub recordings_count: usize,
    pub recordings: Vec<RecordingSegment>,
    pub total_duration: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordingSegment {
    pub day: Option<String>,
    pub hour: Option<serde_json::Value>,
    pub duration: Option<f64>,
    pub events: i64,
}

/// Reduced projection of the Frigate configuration. Never carries the raw
/// camera/detector bodies, only their names.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub cameras: Vec<String>,
    pub detectors: Vec<String>,
    pub mqtt: MqttSummary,
    pub model: Option<String>,
    pub version: Option<String>,
    pub full_config_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MqttSummary {
    pub enabled: bool,
    pub host: Option<String>,
}
