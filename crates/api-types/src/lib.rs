//! Shared request/response types used by API-facing crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Body of `POST /problems` and `PUT /problems/{id}`.
///
/// Everything is optional at the wire level so that missing required
/// fields surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub leetcode_link: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub id: String,
    pub name: String,
    pub difficulty: String,
    pub code: String,
    pub notes: Option<String>,
    pub leetcode_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub topics: Vec<TagResponse>,
    pub languages: Vec<TagResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStatsResponse {
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn problem_payload_accepts_camel_case_and_missing_fields() {
        let payload: ProblemPayload = serde_json::from_str(
            r#"{"name":"Two Sum","leetcodeLink":"https://leetcode.com/problems/two-sum","topics":null}"#,
        )
        .expect("deserialize payload");

        assert_eq!(payload.name.as_deref(), Some("Two Sum"));
        assert_eq!(
            payload.leetcode_link.as_deref(),
            Some("https://leetcode.com/problems/two-sum")
        );
        assert_eq!(payload.difficulty, None);
        assert_eq!(payload.topics, None);
        assert_eq!(payload.languages, None);
    }

    #[test]
    fn problem_response_uses_camel_case_keys() {
        let timestamp = DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .expect("parse timestamp")
            .with_timezone(&Utc);
        let response = ProblemResponse {
            id: "p1".to_string(),
            name: "Two Sum".to_string(),
            difficulty: "Easy".to_string(),
            code: "def f(): pass".to_string(),
            notes: None,
            leetcode_link: None,
            created_at: timestamp,
            updated_at: timestamp,
            topics: vec![TagResponse {
                id: "t1".to_string(),
                name: "Array".to_string(),
            }],
            languages: Vec::new(),
        };

        let json = serde_json::to_value(&response).expect("serialize problem response");

        assert_eq!(json["leetcodeLink"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], "2026-03-01T09:00:00Z");
        assert_eq!(json["topics"][0]["name"], "Array");
    }
}
