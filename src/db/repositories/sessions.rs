use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_datetime, to_u32},
    Database,
};
use crate::models::StudySession;

fn row_to_session(row: &Row) -> Result<StudySession> {
    let occurred_at: String = row.get("occurred_at")?;
    let duration_minutes: i64 = row.get("duration_minutes")?;

    Ok(StudySession {
        id: row.get("id")?,
        subject: row.get("subject")?,
        duration_minutes: to_u32(duration_minutes, "duration_minutes")?,
        occurred_at: parse_datetime(&occurred_at, "occurred_at")?,
        owner_id: row.get("owner_id")?,
    })
}

impl Database {
    /// Seeds the reconciled set at startup: every cached session in the
    /// order it was last persisted.
    pub async fn load_session_cache(&self) -> Result<Vec<StudySession>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, subject, duration_minutes, occurred_at, owner_id
                 FROM study_sessions
                 ORDER BY position ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    /// Rewrites the snapshot after a mutation. The whole table is replaced
    /// so row order always mirrors the in-memory set.
    pub async fn replace_session_cache(&self, sessions: &[StudySession]) -> Result<()> {
        let records = sessions.to_vec();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM study_sessions", [])?;

            {
                let mut stmt = tx.prepare(
                    "INSERT INTO study_sessions (id, subject, duration_minutes, occurred_at, owner_id, position)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )?;
                for (position, record) in records.iter().enumerate() {
                    stmt.execute(params![
                        record.id,
                        record.subject,
                        i64::from(record.duration_minutes),
                        record.occurred_at.to_rfc3339(),
                        record.owner_id,
                        position as i64,
                    ])?;
                }
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
        (db, dir)
    }

    fn session(id: &str, minutes: u32) -> StudySession {
        StudySession {
            id: id.to_string(),
            subject: "chemistry".to_string(),
            duration_minutes: minutes,
            occurred_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            owner_id: Some("user123".to_string()),
        }
    }

    #[tokio::test]
    async fn cache_round_trips_in_order() {
        let (db, _dir) = open_db();
        let records = vec![session("b", 20), session("a", 10), session("c", 30)];

        db.replace_session_cache(&records).await.unwrap();
        let loaded = db.load_session_cache().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn rewrite_replaces_previous_snapshot() {
        let (db, _dir) = open_db();
        db.replace_session_cache(&[session("a", 10), session("b", 20)])
            .await
            .unwrap();
        db.replace_session_cache(&[session("b", 25)]).await.unwrap();

        let loaded = db.load_session_cache().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "b");
        assert_eq!(loaded[0].duration_minutes, 25);
    }
}
