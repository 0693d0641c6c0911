use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_datetime, parse_optional_datetime, parse_priority, to_u32},
    Database,
};
use crate::models::StudyPlan;

fn row_to_plan(row: &Row) -> Result<StudyPlan> {
    let priority: String = row.get("priority")?;
    let deadline: Option<String> = row.get("deadline")?;
    let created_at: String = row.get("created_at")?;
    let duration_minutes: i64 = row.get("duration_minutes")?;

    Ok(StudyPlan {
        id: row.get("id")?,
        subject: row.get("subject")?,
        topic: row.get("topic")?,
        priority: parse_priority(&priority)?,
        day: row.get("day")?,
        start_time: row.get("start_time")?,
        duration_minutes: to_u32(duration_minutes, "duration_minutes")?,
        deadline: parse_optional_datetime(deadline, "deadline")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        completed: row.get("completed")?,
    })
}

const PLAN_COLUMNS: &str =
    "id, subject, topic, priority, day, start_time, duration_minutes, deadline, created_at, completed";

impl Database {
    pub async fn upsert_plan(&self, plan: &StudyPlan) -> Result<()> {
        let record = plan.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO study_plans (id, subject, topic, priority, day, start_time, duration_minutes, deadline, created_at, completed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                     subject = excluded.subject,
                     topic = excluded.topic,
                     priority = excluded.priority,
                     day = excluded.day,
                     start_time = excluded.start_time,
                     duration_minutes = excluded.duration_minutes,
                     deadline = excluded.deadline,
                     completed = excluded.completed",
                params![
                    record.id,
                    record.subject,
                    record.topic,
                    record.priority.as_str(),
                    record.day,
                    record.start_time,
                    i64::from(record.duration_minutes),
                    record.deadline.as_ref().map(|dt| dt.to_rfc3339()),
                    record.created_at.to_rfc3339(),
                    record.completed,
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_plan(&self, plan_id: &str) -> Result<Option<StudyPlan>> {
        let plan_id = plan_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM study_plans WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![plan_id])?;
            let plan = match rows.next()? {
                Some(row) => Some(row_to_plan(row)?),
                None => None,
            };
            Ok(plan)
        })
        .await
    }

    pub async fn list_plans(&self) -> Result<Vec<StudyPlan>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM study_plans ORDER BY created_at DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut plans = Vec::new();
            while let Some(row) = rows.next()? {
                plans.push(row_to_plan(row)?);
            }
            Ok(plans)
        })
        .await
    }

    /// Returns false when no plan has that id.
    pub async fn set_plan_completed(&self, plan_id: &str, completed: bool) -> Result<bool> {
        let plan_id = plan_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE study_plans SET completed = ?1 WHERE id = ?2",
                params![completed, plan_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn delete_plan(&self, plan_id: &str) -> Result<bool> {
        let plan_id = plan_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM study_plans WHERE id = ?1", params![plan_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, TimeZone, Utc};

    fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
        (db, dir)
    }

    fn plan(id: &str) -> StudyPlan {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        StudyPlan {
            id: id.to_string(),
            subject: "calculus".to_string(),
            topic: Some("integrals".to_string()),
            priority: Priority::High,
            day: Some("Monday".to_string()),
            start_time: Some("18:30".to_string()),
            duration_minutes: 90,
            deadline: Some(created_at + Duration::days(10)),
            created_at,
            completed: false,
        }
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let (db, _dir) = open_db();
        let record = plan("p1");
        db.upsert_plan(&record).await.unwrap();

        let loaded = db.get_plan("p1").await.unwrap().unwrap();
        assert_eq!(loaded.subject, record.subject);
        assert_eq!(loaded.priority, Priority::High);
        assert_eq!(loaded.deadline, record.deadline);
        assert_eq!(loaded.created_at, record.created_at);
    }

    #[tokio::test]
    async fn upsert_overwrites_mutable_fields() {
        let (db, _dir) = open_db();
        let mut record = plan("p1");
        db.upsert_plan(&record).await.unwrap();

        record.subject = "linear algebra".to_string();
        record.duration_minutes = 45;
        db.upsert_plan(&record).await.unwrap();

        let loaded = db.get_plan("p1").await.unwrap().unwrap();
        assert_eq!(loaded.subject, "linear algebra");
        assert_eq!(loaded.duration_minutes, 45);
        assert_eq!(db.list_plans().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn completion_and_delete_report_row_presence() {
        let (db, _dir) = open_db();
        db.upsert_plan(&plan("p1")).await.unwrap();

        assert!(db.set_plan_completed("p1", true).await.unwrap());
        assert!(db.get_plan("p1").await.unwrap().unwrap().completed);
        assert!(!db.set_plan_completed("ghost", true).await.unwrap());

        assert!(db.delete_plan("p1").await.unwrap());
        assert!(!db.delete_plan("p1").await.unwrap());
        assert!(db.get_plan("p1").await.unwrap().is_none());
    }
}
