use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::motivation::set::SessionSet;

/// Aggregates over the current session set, shown on the dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_minutes: u64,
    pub total_sessions: u64,
    pub average_minutes: u64,
    pub weekly_minutes: u64,
}

impl Default for StudyStats {
    fn default() -> Self {
        Self {
            total_minutes: 0,
            total_sessions: 0,
            average_minutes: 0,
            weekly_minutes: 0,
        }
    }
}

/// Recomputes the stats from scratch. Always a full pass over the set:
/// edits can move a record in or out of the trailing week as `now`
/// advances, so incremental maintenance would drift.
pub fn compute_stats(set: &SessionSet, now: DateTime<Utc>) -> StudyStats {
    let total_minutes: u64 = set
        .records()
        .iter()
        .map(|record| u64::from(record.duration_minutes))
        .sum();
    let total_sessions = set.len() as u64;
    let average_minutes = if total_sessions == 0 {
        0
    } else {
        (total_minutes as f64 / total_sessions as f64).round() as u64
    };

    let week_ago = now - Duration::days(7);
    let weekly_minutes: u64 = set
        .records()
        .iter()
        .filter(|record| record.occurred_at >= week_ago)
        .map(|record| u64::from(record.duration_minutes))
        .sum();

    StudyStats {
        total_minutes,
        total_sessions,
        average_minutes,
        weekly_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudySession;
    use chrono::TimeZone;

    fn session_at(id: &str, minutes: u32, occurred_at: DateTime<Utc>) -> StudySession {
        StudySession {
            id: id.to_string(),
            subject: "biology".to_string(),
            duration_minutes: minutes,
            occurred_at,
            owner_id: None,
        }
    }

    #[test]
    fn empty_set_yields_all_zeroes() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(compute_stats(&SessionSet::new(), now), StudyStats::default());
    }

    #[test]
    fn weekly_sum_only_counts_trailing_window() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let set = SessionSet::from_records(vec![
            session_at("a", 30, now - Duration::days(1)),
            session_at("b", 60, now - Duration::days(10)),
        ]);
        let stats = compute_stats(&set, now);
        assert_eq!(stats.total_minutes, 90);
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.average_minutes, 45);
        assert_eq!(stats.weekly_minutes, 30);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let set = SessionSet::from_records(vec![session_at("a", 25, now - Duration::days(7))]);
        assert_eq!(compute_stats(&set, now).weekly_minutes, 25);
    }

    #[test]
    fn average_rounds_half_up() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let set = SessionSet::from_records(vec![
            session_at("a", 10, now),
            session_at("b", 15, now),
        ]);
        // 12.5 rounds to 13.
        assert_eq!(compute_stats(&set, now).average_minutes, 13);
    }
}
