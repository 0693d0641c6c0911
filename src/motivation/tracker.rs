use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use log::{info, warn};
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    db::Database,
    models::{SessionPatch, StudySession},
    motivation::{
        set::SessionSet,
        stats::{compute_stats, StudyStats},
    },
    sync::ApiClient,
};

/// Which session-dashboard behaviors are enabled. One tracker covers the
/// local-only, remote-synced, and edit-enabled dashboard variants.
#[derive(Debug, Clone, Copy)]
pub struct TrackerCapabilities {
    pub remote_synced: bool,
    pub editable: bool,
}

impl Default for TrackerCapabilities {
    fn default() -> Self {
        Self {
            remote_synced: true,
            editable: true,
        }
    }
}

/// Owns the reconciled session set for one app instance. All mutation goes
/// through these methods, which serialize on the inner lock, rewrite the
/// SQLite snapshot, and mirror to the remote API when configured.
#[derive(Clone)]
pub struct SessionTracker {
    set: Arc<Mutex<SessionSet>>,
    db: Database,
    client: ApiClient,
    capabilities: TrackerCapabilities,
    fetch_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    fetch_cancel: Arc<Mutex<Option<CancellationToken>>>,
}

impl SessionTracker {
    pub fn new(db: Database, client: ApiClient, capabilities: TrackerCapabilities) -> Self {
        Self {
            set: Arc::new(Mutex::new(SessionSet::new())),
            db,
            client,
            capabilities,
            fetch_task: Arc::new(Mutex::new(None)),
            fetch_cancel: Arc::new(Mutex::new(None)),
        }
    }

    /// Seeds the set from the cache table. Called once at startup, before
    /// any command can touch the tracker.
    pub async fn load_cache(&self) -> Result<()> {
        let cached = self.db.load_session_cache().await?;
        let mut set = self.set.lock().await;
        *set = SessionSet::from_records(cached);
        info!("Seeded session tracker with {} cached sessions", set.len());
        Ok(())
    }

    pub async fn sessions(&self) -> Vec<StudySession> {
        self.set.lock().await.records().to_vec()
    }

    /// Sessions inside the trailing 7-day window, for the recent list.
    pub async fn recent_sessions(&self) -> Vec<StudySession> {
        let week_ago = Utc::now() - Duration::days(7);
        self.set
            .lock()
            .await
            .records()
            .iter()
            .filter(|record| record.occurred_at >= week_ago)
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> StudyStats {
        compute_stats(&*self.set.lock().await, Utc::now())
    }

    /// Logs a new session at the front of the set, persists the snapshot,
    /// and mirrors it to the remote API. The local record stays even when
    /// the mirror fails, so an offline add is not lost.
    pub async fn log_session(
        &self,
        subject: String,
        duration_minutes: u32,
        owner_id: Option<String>,
        token: Option<String>,
    ) -> Result<StudySession> {
        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            subject,
            duration_minutes,
            occurred_at: Utc::now(),
            owner_id,
        };

        {
            let mut set = self.set.lock().await;
            set.add(session.clone())?;
            self.db.replace_session_cache(set.records()).await?;
        }

        if self.capabilities.remote_synced {
            if let Some(token) = token {
                if let Err(err) = self
                    .client
                    .push_session(&token, &session.subject, session.duration_minutes)
                    .await
                {
                    warn!("Session saved locally but remote push failed: {err:#}");
                }
            }
        }

        Ok(session)
    }

    pub async fn edit_session(&self, id: &str, patch: SessionPatch) -> Result<()> {
        if !self.capabilities.editable {
            return Err(anyhow!("session editing is disabled"));
        }

        let mut set = self.set.lock().await;
        set.edit(id, patch).map_err(anyhow::Error::from)?;
        self.db.replace_session_cache(set.records()).await?;
        Ok(())
    }

    /// Removes a session. Absent ids are a successful no-op so a retried
    /// delete cannot fail; returns whether anything was removed.
    pub async fn remove_session(&self, id: &str) -> Result<bool> {
        let mut set = self.set.lock().await;
        let removed = set.remove(id);
        if removed {
            self.db.replace_session_cache(set.records()).await?;
        }
        Ok(removed)
    }

    /// Folds a fetched remote list into the set and persists the result.
    pub async fn merge_remote(&self, remote: Vec<StudySession>) -> Result<usize> {
        let mut set = self.set.lock().await;
        let appended = set.merge(remote);
        if appended > 0 {
            self.db.replace_session_cache(set.records()).await?;
        }
        Ok(appended)
    }

    /// Kicks off a background fetch-and-merge. A previous in-flight fetch is
    /// cancelled first, and the result of a fetch that outlives its view is
    /// discarded instead of applied.
    pub async fn start_refresh(&self, token: String) {
        if !self.capabilities.remote_synced {
            return;
        }

        self.stop_refresh().await;

        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();
        let tracker = self.clone();

        let handle = tokio::spawn(async move {
            let fetched = tokio::select! {
                result = tracker.client.fetch_sessions(&token) => result,
                _ = task_token.cancelled() => {
                    info!("Session refresh cancelled before fetch completed");
                    return;
                }
            };

            let remote = match fetched {
                Ok(remote) => remote,
                Err(err) => {
                    warn!("Session refresh failed: {err:#}");
                    return;
                }
            };

            // The view may have been torn down while the response was in
            // flight; a cancelled refresh must not touch the set.
            if task_token.is_cancelled() {
                info!("Discarding stale session fetch result");
                return;
            }

            match tracker.merge_remote(remote).await {
                Ok(appended) => info!("Session refresh merged {appended} new sessions"),
                Err(err) => warn!("Failed to apply fetched sessions: {err:#}"),
            }
        });

        *self.fetch_task.lock().await = Some(handle);
        *self.fetch_cancel.lock().await = Some(cancel_token);
    }

    /// Cancels any in-flight fetch. Called when the owning view goes away.
    pub async fn stop_refresh(&self) {
        if let Some(token) = self.fetch_cancel.lock().await.take() {
            token.cancel();
        }
        if let Some(handle) = self.fetch_task.lock().await.take() {
            handle.abort();
        }
    }
}
