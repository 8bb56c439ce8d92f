//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Embeddable-text sentinel for records carrying neither a usable summary
/// nor a topic. Embedding text is never empty.
pub const EMPTY_TEXT_SENTINEL: &str = "No summary or topic available";

/// Sentinel for payload fields absent from a retrieved point.
pub const MISSING_FIELD_SENTINEL: &str = "N/A";

/// A batch file as produced by the recorder: a JSON object with a
/// `recordings` array. A file without the array parses as an empty batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingBatch {
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// One meeting recording as read from a batch file.
///
/// `uuid` and `topic` are required; a record missing either fails the
/// whole file's parse (the ingestor then skips that file and continues).
/// `start_time` and `duration` are kept opaque and round-tripped into the
/// payload verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Opaque base64-encoded 16-byte identifier issued by the recorder.
    pub uuid: String,
    pub topic: String,
    #[serde(default)]
    pub start_time: Value,
    #[serde(default)]
    pub duration: Value,
    /// Either a structured object containing `summary_overview`, or absent.
    #[serde(default)]
    pub summary: Value,
}

impl Recording {
    /// Text to embed for this recording.
    ///
    /// Precedence: the summary object's `summary_overview` → `topic` →
    /// [`EMPTY_TEXT_SENTINEL`]. A non-object `summary` falls back to the
    /// topic directly.
    pub fn embedding_text(&self) -> String {
        let text = match self.summary.as_object() {
            Some(obj) => obj
                .get("summary_overview")
                .and_then(Value::as_str)
                .unwrap_or(&self.topic),
            None => &self.topic,
        };
        if text.trim().is_empty() {
            EMPTY_TEXT_SENTINEL.to_string()
        } else {
            text.to_string()
        }
    }

    /// Summary as stored in the point payload: the original object, or an
    /// empty object when `summary` is absent or not structured.
    pub fn payload_summary(&self) -> Value {
        if self.summary.is_object() {
            self.summary.clone()
        } else {
            json!({})
        }
    }
}

/// A retrieved point projected into the shape handed to the answer model.
///
/// Field names match the serialized result list embedded into the
/// completion prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ContextEntry {
    #[serde(rename = "Score")]
    pub score: f32,
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Summary")]
    pub summary_overview: String,
}

impl ContextEntry {
    /// Projects a scored payload into a context entry. Missing payload
    /// fields default to [`MISSING_FIELD_SENTINEL`].
    pub fn from_payload(score: f32, payload: &Value) -> Self {
        Self {
            score,
            topic: field_text(payload.get("topic")),
            start_time: field_text(payload.get("start_time")),
            duration: field_text(payload.get("duration")),
            summary_overview: field_text(
                payload.get("summary").and_then(|s| s.get("summary_overview")),
            ),
        }
    }
}

/// Renders a payload field for the result list: strings verbatim, other
/// non-null values in compact JSON form, null/absent as the sentinel.
fn field_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => MISSING_FIELD_SENTINEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(summary: Value, topic: &str) -> Recording {
        Recording {
            uuid: "dGVzdA".into(),
            topic: topic.into(),
            start_time: json!("2024-08-01T10:00:00Z"),
            duration: json!(30),
            summary,
        }
    }

    #[test]
    fn overview_wins_over_topic() {
        let r = recording(json!({"summary_overview": "Discussed roadmap"}), "Standup");
        assert_eq!(r.embedding_text(), "Discussed roadmap");
    }

    #[test]
    fn topic_when_summary_missing() {
        let r = recording(Value::Null, "Standup");
        assert_eq!(r.embedding_text(), "Standup");
    }

    #[test]
    fn topic_when_summary_not_structured() {
        let r = recording(json!("free-form note"), "Standup");
        assert_eq!(r.embedding_text(), "Standup");
    }

    #[test]
    fn topic_when_overview_missing_from_object() {
        let r = recording(json!({"summary_details": []}), "Standup");
        assert_eq!(r.embedding_text(), "Standup");
    }

    #[test]
    fn sentinel_when_nothing_available() {
        let r = recording(Value::Null, "");
        assert_eq!(r.embedding_text(), EMPTY_TEXT_SENTINEL);
    }

    #[test]
    fn payload_summary_defaults_to_empty_object() {
        assert_eq!(recording(json!("text"), "t").payload_summary(), json!({}));
        assert_eq!(recording(Value::Null, "t").payload_summary(), json!({}));
        let obj = json!({"summary_overview": "x", "summary_details": [1]});
        assert_eq!(recording(obj.clone(), "t").payload_summary(), obj);
    }

    #[test]
    fn batch_without_recordings_is_empty() {
        let batch: RecordingBatch = serde_json::from_str(r#"{"meta": 1}"#).unwrap();
        assert!(batch.recordings.is_empty());
    }

    #[test]
    fn record_without_topic_fails_the_batch() {
        let res: Result<RecordingBatch, _> =
            serde_json::from_str(r#"{"recordings": [{"uuid": "abc"}]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn context_entry_defaults_missing_fields() {
        let entry = ContextEntry::from_payload(0.5, &json!({"topic": "Zoom platform"}));
        assert_eq!(entry.topic, "Zoom platform");
        assert_eq!(entry.start_time, "N/A");
        assert_eq!(entry.duration, "N/A");
        assert_eq!(entry.summary_overview, "N/A");
    }

    #[test]
    fn context_entry_carries_payload_fields() {
        let payload = json!({
            "topic": "Zoom developer platform",
            "start_time": "2024-08-01T10:00:00Z",
            "duration": 45,
            "summary": {"summary_overview": "API walkthrough"}
        });
        let entry = ContextEntry::from_payload(0.91, &payload);
        assert_eq!(entry.topic, "Zoom developer platform");
        assert_eq!(entry.start_time, "2024-08-01T10:00:00Z");
        assert_eq!(entry.duration, "45");
        assert_eq!(entry.summary_overview, "API walkthrough");
    }
}
