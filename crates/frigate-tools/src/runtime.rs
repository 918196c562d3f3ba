//! Runtime for the Frigate tool surface.
//!
//! Each operation validates its inputs, issues exactly one GET against the
//! Frigate HTTP API (the snapshot existence check is its own, second GET),
//! reshapes the JSON body into one of the [`crate::contracts`] types, and
//! returns it. Nothing is cached or retried and no state survives a call.

use crate::client;
use crate::config::FrigateConfig;
use crate::contracts::{
    CameraStats, CameraSummary, ConfigSummary, DetectorStats, EventDetails, EventMedia,
    EventSummary, MqttSummary, RecordingSegment, RecordingsSummary, ServiceStats, SnapshotInfo,
    SnapshotMoment, StatsSummary,
};
use crate::error::{FrigateToolsError, Result};
use chrono::Local;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool, ToolAnnotations};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const DEFAULT_EVENT_LIMIT: i64 = 10;
const MAX_EVENT_LIMIT: i64 = 100;

/// Filters for the events listing. Out-of-range limits are clamped, not
/// rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsQuery {
    pub camera: Option<String>,
    pub label: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventDetailsArgs {
    event_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotArgs {
    camera: String,
    timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordingsArgs {
    camera: String,
    date: Option<String>,
}

/// The seven read-only Frigate operations, addressable by tool name.
///
/// Safe to share across tasks; concurrent calls are fully independent.
#[derive(Clone)]
pub struct FrigateToolSource {
    config: FrigateConfig,
}

impl FrigateToolSource {
    #[must_use]
    pub fn new(config: FrigateConfig) -> Self {
        Self { config }
    }

    /// List the MCP `Tool`s exposed by this source.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            declare_tool(
                "get_cameras",
                "List the cameras configured in Frigate with their enabled state and detection geometry.",
                json!({"type": "object", "properties": {}}),
            ),
            declare_tool(
                "get_events",
                "List recent detection events, optionally filtered by camera and detected label.",
                json!({
                    "type": "object",
                    "properties": {
                        "camera": {"type": "string", "description": "Only return events from this camera"},
                        "label": {"type": "string", "description": "Only return events with this label, e.g. 'person' or 'car'"},
                        "limit": {"type": "integer", "description": "Maximum number of events to return (1-100)", "default": DEFAULT_EVENT_LIMIT}
                    }
                }),
            ),
            declare_tool(
                "get_stats",
                "Fetch Frigate service, detector, and per-camera performance statistics.",
                json!({"type": "object", "properties": {}}),
            ),
            declare_tool(
                "get_event_details",
                "Fetch full details and media URLs for a single detection event.",
                json!({
                    "type": "object",
                    "properties": {
                        "event_id": {"type": "string", "description": "Unique id of the event"}
                    },
                    "required": ["event_id"]
                }),
            ),
            declare_tool(
                "get_snapshot",
                "Build the snapshot URL for a camera, either the latest frame or one at a unix timestamp.",
                json!({
                    "type": "object",
                    "properties": {
                        "camera": {"type": "string", "description": "Name of the camera"},
                        "timestamp": {"type": "integer", "description": "Unix timestamp of a historical snapshot (latest when omitted)"}
                    },
                    "required": ["camera"]
                }),
            ),
            declare_tool(
                "get_recordings",
                "Summarize the per-hour recording segments for a camera on one date.",
                json!({
                    "type": "object",
                    "properties": {
                        "camera": {"type": "string", "description": "Name of the camera"},
                        "date": {"type": "string", "description": "Date in YYYY-MM-DD format (defaults to today)"}
                    },
                    "required": ["camera"]
                }),
            ),
            declare_tool(
                "get_config",
                "Summarize the Frigate configuration: camera and detector names, MQTT, model, and version.",
                json!({"type": "object", "properties": {}}),
            ),
        ]
    }

    /// Execute a tool call by name.
    ///
    /// # Errors
    ///
    /// Returns a `Runtime` error for unknown tool names or malformed
    /// arguments; otherwise whatever the operation itself surfaces.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult> {
        match name {
            "get_cameras" => text_result(&self.get_cameras().await?),
            "get_events" => {
                let query: EventsQuery = parse_args(name, arguments)?;
                text_result(&self.get_events(query).await?)
            }
            "get_stats" => text_result(&self.get_stats().await?),
            "get_event_details" => {
                let args: EventDetailsArgs = parse_args(name, arguments)?;
                text_result(&self.get_event_details(&args.event_id).await?)
            }
            "get_snapshot" => {
                let args: SnapshotArgs = parse_args(name, arguments)?;
                text_result(&self.get_snapshot(&args.camera, args.timestamp).await?)
            }
            "get_recordings" => {
                let args: RecordingsArgs = parse_args(name, arguments)?;
                text_result(&self.get_recordings(&args.camera, args.date).await?)
            }
            "get_config" => text_result(&self.get_config().await?),
            _ => Err(FrigateToolsError::Runtime(format!("Tool not found: {name}"))),
        }
    }

    /// Cameras from the Frigate configuration, reduced to name, enabled
    /// state, and detection geometry.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing `/config` call.
    pub async fn get_cameras(&self) -> Result<Vec<CameraSummary>> {
        let data = self.get_json("/config", &[]).await?;
        let Some(cameras) = data.get("cameras").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        Ok(cameras
            .iter()
            .map(|(name, camera)| {
                let detect = camera.get("detect");
                CameraSummary {
                    name: name.clone(),
                    enabled: bool_field(camera, "enabled", true),
                    width: detect.and_then(|d| int_field(d, "width")),
                    height: detect.and_then(|d| int_field(d, "height")),
                    fps: detect.and_then(|d| int_field(d, "fps")),
                }
            })
            .collect())
    }

    /// Recent detection events. The limit is clamped to `1..=100` and
    /// defaults to 10; empty filter strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing `/events` call.
    pub async fn get_events(&self, query: EventsQuery) -> Result<Vec<EventSummary>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_EVENT_LIMIT)
            .clamp(1, MAX_EVENT_LIMIT);

        let mut params: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(camera) = query.camera.as_deref().filter(|c| !c.is_empty()) {
            params.push(("camera", camera.to_string()));
        }
        if let Some(label) = query.label.as_deref().filter(|l| !l.is_empty()) {
            params.push(("label", label.to_string()));
        }

        let events = self.get_json("/events", &params).await?;
        let Some(items) = events.as_array() else {
            return Ok(Vec::new());
        };

        Ok(items.iter().map(|event| self.event_summary(event)).collect())
    }

    /// Service, detector, and camera statistics, filtered to a known field
    /// subset per category.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing `/stats` call.
    pub async fn get_stats(&self) -> Result<StatsSummary> {
        let stats = self.get_json("/stats", &[]).await?;

        let detectors: BTreeMap<String, DetectorStats> = stats
            .get("detectors")
            .and_then(Value::as_object)
            .map(|detectors| {
                detectors
                    .iter()
                    .map(|(name, d)| {
                        (
                            name.clone(),
                            DetectorStats {
                                inference_speed: f64_field(d, "inference_speed"),
                                detection_start: f64_field(d, "detection_start"),
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let cameras: BTreeMap<String, CameraStats> = stats
            .get("cameras")
            .and_then(Value::as_object)
            .map(|cameras| {
                cameras
                    .iter()
                    .map(|(name, c)| {
                        (
                            name.clone(),
                            CameraStats {
                                camera_fps: f64_field(c, "camera_fps"),
                                process_fps: f64_field(c, "process_fps"),
                                detection_fps: f64_field(c, "detection_fps"),
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(StatsSummary {
            service: ServiceStats {
                uptime: stats.pointer("/service/uptime").cloned(),
                version: stats
                    .pointer("/service/version")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                storage: stats.pointer("/service/storage").cloned(),
            },
            detectors,
            cameras,
        })
    }

    /// Full detail for one event, including derived duration and media URLs.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing `/events/{id}`
    /// call.
    pub async fn get_event_details(&self, event_id: &str) -> Result<EventDetails> {
        let event = self.get_json(&format!("/events/{event_id}"), &[]).await?;

        let start_time = f64_field(&event, "start_time");
        let end_time = f64_field(&event, "end_time");
        let has_clip = bool_field(&event, "has_clip", false);

        Ok(EventDetails {
            id: str_field(&event, "id"),
            camera: str_field(&event, "camera"),
            label: str_field(&event, "label"),
            sub_label: str_field(&event, "sub_label"),
            start_time,
            end_time,
            duration: end_time.map(|end| end - start_time.unwrap_or(0.0)),
            score: f64_field(&event, "top_score"),
            zones: string_list(&event, "zones"),
            has_clip,
            has_snapshot: bool_field(&event, "has_snapshot", false),
            retain_indefinitely: bool_field(&event, "retain_indefinitely", false),
            media: EventMedia {
                thumbnail: self.event_media_url(event_id, "thumbnail.jpg"),
                snapshot: self.event_media_url(event_id, "snapshot.jpg"),
                clip: has_clip.then(|| self.event_media_url(event_id, "clip.mp4")),
            },
        })
    }

    /// Snapshot URL for a camera, after verifying the camera exists in the
    /// current Frigate configuration (a second, independent backend call).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (listing the available camera names) when the
    /// camera is absent from the configuration, otherwise `Http`/`Transport`
    /// errors from the existence check.
    pub async fn get_snapshot(
        &self,
        camera: &str,
        timestamp: Option<i64>,
    ) -> Result<SnapshotInfo> {
        let url = match timestamp {
            Some(ts) => format!("{}/api/{camera}/snapshot/{ts}.jpg", self.config.base_url()),
            None => format!("{}/api/{camera}/latest.jpg", self.config.base_url()),
        };

        let data = self.get_json("/config", &[]).await?;
        let available: Vec<String> = data
            .get("cameras")
            .and_then(Value::as_object)
            .map(|cameras| cameras.keys().cloned().collect())
            .unwrap_or_default();

        if !available.iter().any(|name| name == camera) {
            return Err(FrigateToolsError::NotFound(format!(
                "Camera '{camera}' not found. Available cameras: {available:?}"
            )));
        }

        let (moment, description) = match timestamp {
            Some(ts) => (
                SnapshotMoment::Unix(ts),
                format!("Snapshot from {camera} at timestamp {ts}"),
            ),
            None => (SnapshotMoment::Latest, format!("Snapshot from {camera} (latest)")),
        };

        Ok(SnapshotInfo {
            camera: camera.to_string(),
            timestamp: moment,
            url,
            description,
        })
    }

    /// Recording segments for one camera, filtered to one date (current
    /// local date when omitted), with the summed duration.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing recordings
    /// summary call.
    pub async fn get_recordings(
        &self,
        camera: &str,
        date: Option<String>,
    ) -> Result<RecordingsSummary> {
        let date = match date.filter(|d| !d.is_empty()) {
            Some(date) => date,
            None => Local::now().format("%Y-%m-%d").to_string(),
        };

        let summary = self
            .get_json(&format!("/{camera}/recordings/summary"), &[])
            .await?;

        let mut recordings = Vec::new();
        let mut total_duration = 0.0;
        if let Some(items) = summary.as_array() {
            for item in items {
                if str_field(item, "day").as_deref() != Some(date.as_str()) {
                    continue;
                }
                let duration = f64_field(item, "duration");
                total_duration += duration.unwrap_or(0.0);
                recordings.push(RecordingSegment {
                    day: str_field(item, "day"),
                    hour: item.get("hour").cloned(),
                    duration,
                    events: int_field(item, "events").unwrap_or(0),
                });
            }
        }

        Ok(RecordingsSummary {
            camera: camera.to_string(),
            date,
            recordings_count: recordings.len(),
            recordings,
            total_duration,
        })
    }

    /// Reduced projection of the Frigate configuration; the raw camera and
    /// detector bodies never leave this function.
    ///
    /// # Errors
    ///
    /// Surfaces `Http`/`Transport` errors from the backing `/config` call.
    pub async fn get_config(&self) -> Result<ConfigSummary> {
        let data = self.get_json("/config", &[]).await?;

        Ok(ConfigSummary {
            cameras: object_keys(&data, "cameras"),
            detectors: object_keys(&data, "detectors"),
            mqtt: MqttSummary {
                enabled: data.get("mqtt").is_some(),
                host: data
                    .pointer("/mqtt/host")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            model: data
                .pointer("/model/path")
                .and_then(Value::as_str)
                .map(str::to_string),
            version: str_field(&data, "version"),
            full_config_available: true,
        })
    }

    fn event_summary(&self, event: &Value) -> EventSummary {
        let id = str_field(event, "id");
        let has_snapshot = bool_field(event, "has_snapshot", false);
        let thumbnail = has_snapshot
            .then(|| self.event_media_url(id.as_deref().unwrap_or_default(), "thumbnail.jpg"));

        EventSummary {
            id,
            camera: str_field(event, "camera"),
            label: str_field(event, "label"),
            start_time: f64_field(event, "start_time"),
            end_time: f64_field(event, "end_time"),
            has_clip: bool_field(event, "has_clip", false),
            has_snapshot,
            zone: string_list(event, "zones"),
            thumbnail,
        }
    }

    fn event_media_url(&self, event_id: &str, file: &str) -> String {
        format!("{}/api/events/{event_id}/{file}", self.config.base_url())
    }

    /// Issue one GET against the Frigate API and parse the JSON body.
    ///
    /// Non-2xx responses become `Http` errors carrying the status and body;
    /// send/timeout failures become `Transport` errors.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let client = client::build_client(&self.config)?;

        let mut url = Url::parse(&format!("{}{path}", self.config.api_base_url()))
            .map_err(|e| FrigateToolsError::Runtime(format!("Invalid request URL: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        debug!(path, "GET Frigate API");
        let response = client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(FrigateToolsError::Http(format!(
                "API returned {} {reason}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| FrigateToolsError::Http(format!("API returned invalid JSON: {e}")))
    }
}

fn declare_tool(name: &'static str, description: &'static str, input_schema: Value) -> Tool {
    let schema_obj = input_schema
        .as_object()
        .cloned()
        .unwrap_or_else(JsonObject::new);
    let mut tool = Tool::new(name, description, Arc::new(schema_obj));
    tool.annotations = Some(read_only_annotations());
    tool
}

/// Every operation here is a GET against an external system.
fn read_only_annotations() -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(true),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(JsonObject::new()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|e| FrigateToolsError::Runtime(format!("Invalid arguments for {tool}: {e}")))
}

fn text_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult> {
    let text = serde_json::to_string(value)
        .map_err(|e| FrigateToolsError::Runtime(format!("Serialize tool result: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn f64_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn int_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

fn bool_field(value: &Value, key: &str, default: bool) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn object_keys(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}
