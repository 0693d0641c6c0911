pub mod commands;

use anyhow::{bail, Result};
use chrono::NaiveTime;

/// Class times come in as "HH:MM". Both must parse and the class must end
/// after it starts.
pub fn validate_class_times(start_time: &str, end_time: &str) -> Result<()> {
    let start = NaiveTime::parse_from_str(start_time, "%H:%M");
    let end = NaiveTime::parse_from_str(end_time, "%H:%M");

    let (start, end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        _ => bail!("times must be in HH:MM format"),
    };

    if start >= end {
        bail!("start time must be earlier than end time");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_times() {
        assert!(validate_class_times("09:00", "10:30").is_ok());
    }

    #[test]
    fn rejects_equal_or_inverted_times() {
        assert!(validate_class_times("10:30", "10:30").is_err());
        assert!(validate_class_times("11:00", "09:00").is_err());
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(validate_class_times("9am", "10:30").is_err());
        assert!(validate_class_times("09:00", "later").is_err());
    }
}
