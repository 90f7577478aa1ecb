use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_STATUS: &str = "open";
pub const DEFAULT_PRIORITY: &str = "medium";

/// Status values the reference server accepts. Anything else is still shown as-is.
pub const KNOWN_STATUSES: &[&str] = &["open", "in-progress", "closed"];
pub const KNOWN_PRIORITIES: &[&str] = &["low", "medium", "high"];

/// A persisted issue as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// The form's in-progress record. Only the fields that are set go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IssueDraft {
    /// Blank draft used by the create form.
    pub fn new_default() -> Self {
        Self {
            title: Some(String::new()),
            status: Some(DEFAULT_STATUS.to_string()),
            priority: Some(DEFAULT_PRIORITY.to_string()),
            assignee: Some(String::new()),
            ..Self::default()
        }
    }
}

impl From<&Issue> for IssueDraft {
    fn from(issue: &Issue) -> Self {
        Self {
            id: Some(issue.id.clone()),
            title: Some(issue.title.clone()),
            status: Some(issue.status.clone()),
            priority: Some(issue.priority.clone()),
            assignee: issue.assignee.clone(),
            created_at: Some(issue.created_at),
            updated_at: Some(issue.updated_at),
        }
    }
}

// The reference backend emits naive ISO-8601 timestamps in UTC; other servers send RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "7f0c",
            "title": "Login page crashes",
            "status": "open",
            "priority": "high",
            "assignee": null,
            "createdAt": "2024-03-01T10:00:00.123456",
            "updatedAt": "2024-03-02T08:30:00Z"
        }"#
    }

    #[test]
    fn test_issue_deserialization_camel_case() {
        let issue: Issue = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(issue.id, "7f0c");
        assert_eq!(issue.title, "Login page crashes");
        assert_eq!(issue.assignee, None);
        assert!(issue.created_at <= issue.updated_at);
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let dt = parse_timestamp("2024-03-01T10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_offset_timestamp_is_converted() {
        let dt = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_garbage_timestamp_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let json = sample_json().replace("\"open\"", "\"triage\"");
        let issue: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(issue.status, "triage");
    }

    #[test]
    fn test_default_draft_body() {
        let body = serde_json::to_value(IssueDraft::new_default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "",
                "status": "open",
                "priority": "medium",
                "assignee": ""
            })
        );
    }

    #[test]
    fn test_draft_from_issue_copies_every_field() {
        let issue: Issue = serde_json::from_str(sample_json()).unwrap();
        let draft = IssueDraft::from(&issue);
        assert_eq!(draft.id.as_deref(), Some("7f0c"));
        assert_eq!(draft.priority.as_deref(), Some("high"));
        assert_eq!(draft.assignee, None);
        assert_eq!(draft.updated_at, Some(issue.updated_at));

        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("assignee").is_none());
        assert!(body.get("createdAt").is_some());
    }
}
