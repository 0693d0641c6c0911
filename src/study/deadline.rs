use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::StudyPlan;

/// When a plan has no recorded creation time, progress is measured against a
/// window opening this many days before the deadline.
const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeadlineUrgency {
    Overdue,
    Imminent,
    Near,
    Approaching,
    Comfortable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineProgress {
    pub percent_complete: f64,
    pub remaining_label: String,
    pub is_past_deadline: bool,
    pub urgency: DeadlineUrgency,
}

/// Elapsed-fraction progress and countdown label for a deadline, evaluated
/// at `now`. Total and never panics: a zero or negative planning window
/// reports 100% instead of dividing by it.
pub fn compute_progress(
    created_at: Option<DateTime<Utc>>,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DeadlineProgress {
    let created = created_at.unwrap_or(deadline - Duration::days(DEFAULT_WINDOW_DAYS));
    let total_ms = (deadline - created).num_milliseconds();
    let elapsed_ms = (now - created).num_milliseconds();
    let remaining = deadline - now;

    let percent_complete = if total_ms <= 0 {
        100.0
    } else if remaining.num_milliseconds() <= 0 {
        100.0
    } else {
        (elapsed_ms as f64 / total_ms as f64 * 100.0).clamp(0.0, 100.0)
    };

    let is_past_deadline = remaining.num_milliseconds() <= 0;
    let remaining_label = if is_past_deadline {
        "Deadline passed".to_string()
    } else {
        format_remaining(remaining)
    };

    DeadlineProgress {
        percent_complete,
        remaining_label,
        is_past_deadline,
        urgency: urgency_for(remaining),
    }
}

/// Progress for a plan's card. Plans without a deadline render no countdown.
pub fn plan_progress(plan: &StudyPlan, now: DateTime<Utc>) -> Option<DeadlineProgress> {
    plan.deadline
        .map(|deadline| compute_progress(Some(plan.created_at), deadline, now))
}

/// Renders a positive remainder at minute granularity: days, then hours of
/// the remainder, then minutes only while under a day ("1d 2h left",
/// "45m left"). A sub-minute remainder still shows "0m left".
fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let mut label = String::new();
    if days > 0 {
        label.push_str(&format!("{days}d "));
    }
    if hours > 0 {
        label.push_str(&format!("{hours}h "));
    }
    if minutes > 0 && days == 0 {
        label.push_str(&format!("{minutes}m "));
    }
    if label.is_empty() {
        label.push_str("0m ");
    }
    label.push_str("left");
    label
}

fn urgency_for(remaining: Duration) -> DeadlineUrgency {
    if remaining.num_milliseconds() <= 0 {
        return DeadlineUrgency::Overdue;
    }
    let days_ceil = (remaining.num_milliseconds() as f64 / 86_400_000.0).ceil() as i64;
    if days_ceil <= 1 {
        DeadlineUrgency::Imminent
    } else if days_ceil <= 2 {
        DeadlineUrgency::Near
    } else if days_ceil <= 7 {
        DeadlineUrgency::Approaching
    } else {
        DeadlineUrgency::Comfortable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn progress_clamps_to_zero_before_creation() {
        let created = at(2025, 3, 1, 0, 0);
        let deadline = created + Duration::days(10);
        let result = compute_progress(Some(created), deadline, created - Duration::days(1));
        assert_eq!(result.percent_complete, 0.0);
        assert!(!result.is_past_deadline);
    }

    #[test]
    fn progress_clamps_to_hundred_after_deadline() {
        let created = at(2025, 3, 1, 0, 0);
        let deadline = created + Duration::days(10);
        let result = compute_progress(Some(created), deadline, created + Duration::days(11));
        assert_eq!(result.percent_complete, 100.0);
        assert!(result.is_past_deadline);
        assert_eq!(result.remaining_label, "Deadline passed");
    }

    #[test]
    fn halfway_through_window_is_fifty_percent() {
        let created = at(2025, 3, 1, 0, 0);
        let deadline = created + Duration::days(10);
        let result = compute_progress(Some(created), deadline, created + Duration::days(5));
        assert!((result.percent_complete - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_creation_time_defaults_to_week_before_deadline() {
        let deadline = at(2025, 3, 8, 0, 0);
        // 3.5 days before the deadline is halfway through the implied window.
        let now = deadline - Duration::hours(84);
        let result = compute_progress(None, deadline, now);
        assert!((result.percent_complete - 50.0).abs() < 1e-9);
    }

    #[test]
    fn minutes_hidden_once_a_day_remains() {
        let now = at(2025, 3, 1, 0, 0);
        let deadline = now + Duration::days(1) + Duration::hours(2) + Duration::minutes(30);
        let result = compute_progress(Some(now - Duration::days(1)), deadline, now);
        assert_eq!(result.remaining_label, "1d 2h left");
    }

    #[test]
    fn sub_day_remainder_shows_minutes() {
        let now = at(2025, 3, 1, 0, 0);
        let result =
            compute_progress(Some(now - Duration::days(1)), now + Duration::minutes(45), now);
        assert_eq!(result.remaining_label, "45m left");
    }

    #[test]
    fn twenty_five_hours_rounds_down_to_one_day_one_hour() {
        let now = at(2025, 3, 1, 0, 0);
        let deadline = now + Duration::hours(25) + Duration::seconds(90);
        let result = compute_progress(Some(now - Duration::days(1)), deadline, now);
        assert_eq!(result.remaining_label, "1d 1h left");
    }

    #[test]
    fn sub_minute_remainder_shows_zero_minutes() {
        let now = at(2025, 3, 1, 0, 0);
        let result =
            compute_progress(Some(now - Duration::days(1)), now + Duration::seconds(30), now);
        assert_eq!(result.remaining_label, "0m left");
        assert!(!result.is_past_deadline);
    }

    #[test]
    fn negative_remainder_is_deadline_passed() {
        let now = at(2025, 3, 1, 0, 0);
        let result =
            compute_progress(Some(now - Duration::days(1)), now - Duration::minutes(5), now);
        assert_eq!(result.remaining_label, "Deadline passed");
        assert!(result.is_past_deadline);
        assert_eq!(result.percent_complete, 100.0);
    }

    #[test]
    fn zero_length_window_reports_full_progress() {
        let instant = at(2025, 3, 1, 12, 0);
        let before = compute_progress(Some(instant), instant, instant - Duration::hours(1));
        assert_eq!(before.percent_complete, 100.0);
        assert!(!before.is_past_deadline);

        let after = compute_progress(Some(instant), instant, instant + Duration::hours(1));
        assert_eq!(after.percent_complete, 100.0);
        assert!(after.is_past_deadline);
    }

    #[test]
    fn inverted_window_reports_full_progress_without_panicking() {
        let deadline = at(2025, 3, 1, 0, 0);
        let created = deadline + Duration::days(2);
        let result = compute_progress(Some(created), deadline, deadline - Duration::hours(1));
        assert_eq!(result.percent_complete, 100.0);
        assert!(!result.is_past_deadline);
    }

    #[test]
    fn urgency_buckets_by_days_remaining() {
        let now = at(2025, 3, 1, 0, 0);
        let created = Some(now - Duration::days(1));
        let urgency = |deadline| compute_progress(created, deadline, now).urgency;

        assert_eq!(urgency(now - Duration::days(2)), DeadlineUrgency::Overdue);
        assert_eq!(urgency(now + Duration::hours(20)), DeadlineUrgency::Imminent);
        assert_eq!(urgency(now + Duration::hours(30)), DeadlineUrgency::Near);
        assert_eq!(urgency(now + Duration::days(5)), DeadlineUrgency::Approaching);
        assert_eq!(urgency(now + Duration::days(30)), DeadlineUrgency::Comfortable);
    }
}
