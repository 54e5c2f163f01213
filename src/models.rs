//! Wire models for the BLACKBOX incident service.
//!
//! Field names mirror the service's JSON responses exactly. Everything here
//! is an immutable snapshot owned by the view that fetched it; a refetch
//! replaces the whole value rather than patching it in place.

use serde::{Deserialize, Serialize};

/// Incident lifecycle. The only transition is `open -> resolved`, performed
/// server-side by the resolve operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Open,
    Resolved,
}

impl IncidentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Open => "open",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

/// One row of the incidents list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub id: i64,
    pub primary_service: String,
    pub environment: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub severity: Option<String>,
    pub status: IncidentStatus,
    pub created_at: String,
}

/// Full incident record with its embedded timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    pub primary_service: String,
    pub environment: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub severity: Option<String>,
    pub status: IncidentStatus,
    pub root_cause_summary: String,
    /// Ordered by ascending timestamp, server-guaranteed. Displayed as
    /// received; never re-sorted client-side.
    pub timeline: Vec<TimelineEvent>,
    pub event_count: i64,
}

/// One correlated event inside an incident's timeline.
///
/// `level` stays a free-form string: the color mapping must be total over
/// arbitrary input, not just the levels the service emits today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: i64,
    pub timestamp: String,
    pub level: String,
    pub service: String,
    pub message: String,
    pub request_id: Option<String>,
    pub correlation_reason: String,
}

/// Payload for event ingestion (`POST /events`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub service: String,
    pub environment: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// A raw ingested event as returned by `GET /events` / `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub service: String,
    pub environment: String,
    pub level: String,
    pub message: String,
    pub request_id: Option<String>,
    pub timestamp: String,
    pub received_at: String,
}

/// Status filter for the incidents list. `All` sends no query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Resolved,
}

impl StatusFilter {
    pub fn as_query(self) -> Option<(&'static str, &'static str)> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Open => Some(("status", "open")),
            StatusFilter::Resolved => Some(("status", "resolved")),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Open => "Open",
            StatusFilter::Resolved => "Resolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_query_params() {
        assert_eq!(StatusFilter::All.as_query(), None);
        assert_eq!(StatusFilter::Open.as_query(), Some(("status", "open")));
        assert_eq!(
            StatusFilter::Resolved.as_query(),
            Some(("status", "resolved"))
        );
    }

    #[test]
    fn status_filter_defaults_to_all() {
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }

    #[test]
    fn incident_status_roundtrip() {
        let open: IncidentStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(open, IncidentStatus::Open);
        assert_eq!(serde_json::to_string(&open).unwrap(), "\"open\"");
        assert_eq!(IncidentStatus::Resolved.as_str(), "resolved");
    }

    #[test]
    fn deserializes_full_incident() {
        let json = r#"{
            "id": 42,
            "primary_service": "payments",
            "environment": "prod",
            "start_time": "2024-01-01T00:00:00",
            "end_time": null,
            "severity": "high",
            "status": "open",
            "root_cause_summary": "Database timeout cascading into payments.",
            "timeline": [
                {
                    "id": 1,
                    "timestamp": "2024-01-01T00:00:00",
                    "level": "info",
                    "service": "payments",
                    "message": "start",
                    "request_id": null,
                    "correlation_reason": "same request chain"
                },
                {
                    "id": 2,
                    "timestamp": "2024-01-01T00:05:00",
                    "level": "error",
                    "service": "payments",
                    "message": "fail",
                    "request_id": "abc123",
                    "correlation_reason": "same service burst"
                }
            ],
            "event_count": 2
        }"#;

        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.id, 42);
        assert_eq!(incident.status, IncidentStatus::Open);
        assert_eq!(incident.timeline.len(), 2);
        // Server order is preserved verbatim.
        assert_eq!(incident.timeline[0].id, 1);
        assert_eq!(incident.timeline[1].id, 2);
        assert_eq!(incident.timeline[1].request_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn deserializes_summary_with_absent_severity() {
        let json = r#"{
            "id": 7,
            "primary_service": "auth",
            "environment": "staging",
            "start_time": "2024-03-10T08:15:00",
            "end_time": "2024-03-10T09:00:00",
            "severity": null,
            "status": "resolved",
            "created_at": "2024-03-10T08:20:00"
        }"#;

        let summary: IncidentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.severity, None);
        assert_eq!(summary.status, IncidentStatus::Resolved);
    }

    #[test]
    fn new_event_omits_absent_request_id() {
        let event = NewEvent {
            service: "payments".into(),
            environment: "prod".into(),
            level: "error".into(),
            message: "Database timeout".into(),
            request_id: None,
            timestamp: "2026-02-03T10:42:11Z".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("request_id"));
    }
}
