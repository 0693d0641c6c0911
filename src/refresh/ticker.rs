use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::{sync::Mutex, task::JoinHandle, time};

use crate::{
    db::Database,
    models::StudyPlan,
    motivation::{SessionTracker, StudyStats},
    study::deadline::{plan_progress, DeadlineProgress},
};

const REFRESH_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub plan: StudyPlan,
    /// Absent when the plan has no deadline; such cards render no countdown.
    pub progress: Option<DeadlineProgress>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub plans: Vec<PlanProgress>,
    pub stats: StudyStats,
}

/// Evaluates every plan's deadline progress at `now`. Pure so the ticker
/// and the on-demand snapshot command share one code path.
pub fn build_snapshot(
    plans: Vec<StudyPlan>,
    stats: StudyStats,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let plans = plans
        .into_iter()
        .map(|plan| {
            let progress = plan_progress(&plan, now);
            PlanProgress { plan, progress }
        })
        .collect();

    DashboardSnapshot {
        generated_at: now,
        plans,
        stats,
    }
}

/// Recomputes the dashboard on a fixed cadence while a view is active and
/// emits the result as a `dashboard-refresh` event. Started on view mount,
/// stopped on teardown so no tick runs against a disposed view.
#[derive(Clone)]
pub struct RefreshTicker {
    app_handle: AppHandle,
    db: Database,
    tracker: SessionTracker,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
}

impl RefreshTicker {
    pub fn new(app_handle: AppHandle, db: Database, tracker: SessionTracker) -> Self {
        let debug_mode = std::env::var("STUDYDECK_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            app_handle,
            db,
            tracker,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(if debug_mode { 5 } else { REFRESH_INTERVAL_SECS }),
        }
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let plans = self.db.list_plans().await?;
        let stats = self.tracker.stats().await;
        Ok(build_snapshot(plans, stats, Utc::now()))
    }

    pub async fn start(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let app_handle = self.app_handle.clone();
        let refresher = self.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            loop {
                interval.tick().await;

                match refresher.snapshot().await {
                    Ok(snapshot) => {
                        let _ = app_handle.emit("dashboard-refresh", snapshot);
                    }
                    Err(err) => {
                        warn!("Dashboard refresh tick failed: {err:#}");
                    }
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration as ChronoDuration, TimeZone};

    #[test]
    fn snapshot_computes_progress_only_for_deadlined_plans() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let created_at = now - ChronoDuration::days(5);
        let plans = vec![
            StudyPlan {
                id: "p1".to_string(),
                subject: "calculus".to_string(),
                topic: None,
                priority: Priority::High,
                day: None,
                start_time: None,
                duration_minutes: 60,
                deadline: Some(now + ChronoDuration::days(5)),
                created_at,
                completed: false,
            },
            StudyPlan {
                id: "p2".to_string(),
                subject: "reading".to_string(),
                topic: None,
                priority: Priority::Low,
                day: None,
                start_time: None,
                duration_minutes: 30,
                deadline: None,
                created_at,
                completed: false,
            },
        ];

        let snapshot = build_snapshot(plans, StudyStats::default(), now);
        assert_eq!(snapshot.plans.len(), 2);

        let with_deadline = snapshot.plans[0].progress.as_ref().unwrap();
        assert!((with_deadline.percent_complete - 50.0).abs() < 1e-9);
        assert!(snapshot.plans[1].progress.is_none());
    }
}
