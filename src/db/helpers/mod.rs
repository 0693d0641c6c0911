use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::models::{Difficulty, Priority, QuestionKind, Weekday};

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn parse_priority(value: &str) -> Result<Priority> {
    match value {
        "Low" => Ok(Priority::Low),
        "Medium" => Ok(Priority::Medium),
        "High" => Ok(Priority::High),
        other => Err(anyhow!("unknown priority {other}")),
    }
}

pub fn parse_weekday(value: &str) -> Result<Weekday> {
    match value {
        "Monday" => Ok(Weekday::Monday),
        "Tuesday" => Ok(Weekday::Tuesday),
        "Wednesday" => Ok(Weekday::Wednesday),
        "Thursday" => Ok(Weekday::Thursday),
        "Friday" => Ok(Weekday::Friday),
        "Saturday" => Ok(Weekday::Saturday),
        "Sunday" => Ok(Weekday::Sunday),
        other => Err(anyhow!("unknown weekday {other}")),
    }
}

pub fn parse_kind(value: &str) -> Result<QuestionKind> {
    match value {
        "MultipleChoice" => Ok(QuestionKind::MultipleChoice),
        "TrueFalse" => Ok(QuestionKind::TrueFalse),
        "ShortAnswer" => Ok(QuestionKind::ShortAnswer),
        other => Err(anyhow!("unknown question kind {other}")),
    }
}

pub fn parse_difficulty(value: &str) -> Result<Difficulty> {
    match value {
        "Easy" => Ok(Difficulty::Easy),
        "Medium" => Ok(Difficulty::Medium),
        "Hard" => Ok(Difficulty::Hard),
        other => Err(anyhow!("unknown difficulty {other}")),
    }
}
