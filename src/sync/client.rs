use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ClassEntry, Expense, Income, StudyPlan, StudySession};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Payload of `GET /motivation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationData {
    pub success: bool,
    pub message: Option<String>,
    pub quote: Option<String>,
    pub tip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    sessions: Vec<RemoteSession>,
}

/// Wire shape of a session as the hosted API returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSession {
    #[serde(rename = "_id")]
    id: String,
    subject: String,
    duration: u32,
    date: DateTime<Utc>,
    user_id: Option<String>,
}

impl From<RemoteSession> for StudySession {
    fn from(remote: RemoteSession) -> Self {
        Self {
            id: remote.id,
            subject: remote.subject,
            duration_minutes: remote.duration,
            occurred_at: remote.date,
            owner_id: remote.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewSessionBody<'a> {
    subject: &'a str,
    duration: u32,
}

/// Thin async client for the hosted StudyDeck REST API. Credentials are a
/// per-call parameter, never ambient state.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_sessions(&self, token: &str) -> Result<Vec<StudySession>> {
        let response = self
            .http
            .get(self.url("/motivation/sessions"))
            .bearer_auth(token)
            .send()
            .await
            .context("failed to fetch study sessions")?
            .error_for_status()
            .map_err(|err| anyhow!("session fetch rejected: {err}"))?;

        let body: SessionsResponse = response
            .json()
            .await
            .context("failed to decode session list")?;

        log_info!("fetched {} remote sessions", body.sessions.len());
        Ok(body.sessions.into_iter().map(StudySession::from).collect())
    }

    pub async fn push_session(&self, token: &str, subject: &str, duration: u32) -> Result<()> {
        self.http
            .post(self.url("/motivation/add"))
            .bearer_auth(token)
            .json(&NewSessionBody { subject, duration })
            .send()
            .await
            .context("failed to push study session")?
            .error_for_status()
            .map_err(|err| anyhow!("session push rejected: {err}"))?;
        Ok(())
    }

    pub async fn fetch_motivation(&self, token: &str) -> Result<MotivationData> {
        let response = self
            .http
            .get(self.url("/motivation"))
            .bearer_auth(token)
            .send()
            .await
            .context("failed to fetch motivation")?
            .error_for_status()
            .map_err(|err| anyhow!("motivation fetch rejected: {err}"))?;

        response
            .json()
            .await
            .context("failed to decode motivation payload")
    }

    pub async fn fetch_plans(&self) -> Result<Vec<StudyPlan>> {
        let response = self
            .http
            .get(self.url("/study"))
            .send()
            .await
            .context("failed to fetch study plans")?
            .error_for_status()
            .map_err(|err| anyhow!("plan fetch rejected: {err}"))?;

        response.json().await.context("failed to decode plan list")
    }

    pub async fn create_plan(&self, plan: &StudyPlan) -> Result<()> {
        self.http
            .post(self.url("/study"))
            .json(plan)
            .send()
            .await
            .context("failed to create remote study plan")?
            .error_for_status()
            .map_err(|err| anyhow!("plan create rejected: {err}"))?;
        Ok(())
    }

    pub async fn update_plan(&self, plan: &StudyPlan) -> Result<()> {
        self.http
            .put(self.url(&format!("/study/{}", plan.id)))
            .json(plan)
            .send()
            .await
            .context("failed to update remote study plan")?
            .error_for_status()
            .map_err(|err| anyhow!("plan update rejected: {err}"))?;
        Ok(())
    }

    pub async fn complete_plan(&self, plan_id: &str) -> Result<()> {
        self.http
            .put(self.url(&format!("/study/{plan_id}/complete")))
            .send()
            .await
            .context("failed to complete remote study plan")?
            .error_for_status()
            .map_err(|err| anyhow!("plan completion rejected: {err}"))?;
        Ok(())
    }

    pub async fn delete_plan(&self, plan_id: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/study/{plan_id}")))
            .send()
            .await
            .context("failed to delete remote study plan")?
            .error_for_status()
            .map_err(|err| anyhow!("plan delete rejected: {err}"))?;
        Ok(())
    }

    pub async fn push_class(&self, entry: &ClassEntry) -> Result<()> {
        self.http
            .post(self.url("/classes"))
            .json(entry)
            .send()
            .await
            .context("failed to push class")?
            .error_for_status()
            .map_err(|err| anyhow!("class push rejected: {err}"))?;
        Ok(())
    }

    pub async fn delete_class(&self, class_id: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/classes/{class_id}")))
            .send()
            .await
            .context("failed to delete remote class")?
            .error_for_status()
            .map_err(|err| anyhow!("class delete rejected: {err}"))?;
        Ok(())
    }

    pub async fn push_income(&self, income: &Income) -> Result<()> {
        self.http
            .post(self.url("/income"))
            .json(income)
            .send()
            .await
            .context("failed to push income")?
            .error_for_status()
            .map_err(|err| anyhow!("income push rejected: {err}"))?;
        Ok(())
    }

    pub async fn delete_income(&self, income_id: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/income/{income_id}")))
            .send()
            .await
            .context("failed to delete remote income")?
            .error_for_status()
            .map_err(|err| anyhow!("income delete rejected: {err}"))?;
        Ok(())
    }

    pub async fn push_expense(&self, expense: &Expense) -> Result<()> {
        self.http
            .post(self.url("/expenses"))
            .json(expense)
            .send()
            .await
            .context("failed to push expense")?
            .error_for_status()
            .map_err(|err| anyhow!("expense push rejected: {err}"))?;
        Ok(())
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        self.http
            .delete(self.url(&format!("/expenses/{expense_id}")))
            .send()
            .await
            .context("failed to delete remote expense")?
            .error_for_status()
            .map_err(|err| anyhow!("expense delete rejected: {err}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(
            client.url("/motivation/sessions"),
            "http://localhost:5000/api/motivation/sessions"
        );
    }

    #[test]
    fn remote_session_maps_to_domain_record() {
        let raw = r#"{"_id":"abc123","subject":"history","duration":40,"date":"2025-03-01T09:00:00Z","userId":"user123"}"#;
        let remote: RemoteSession = serde_json::from_str(raw).unwrap();
        let session = StudySession::from(remote);
        assert_eq!(session.id, "abc123");
        assert_eq!(session.duration_minutes, 40);
        assert_eq!(session.owner_id.as_deref(), Some("user123"));
    }
}
