use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single logged study session. Identity is the `id` alone; two records
/// with the same id are the same logical entity regardless of field drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub subject: String,
    pub duration_minutes: u32,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Mutable fields of a session. `id` and `occurred_at` are fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub subject: Option<String>,
    pub duration_minutes: Option<u32>,
}
