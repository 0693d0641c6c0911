use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{helpers::parse_weekday, Database};
use crate::models::ClassEntry;

fn row_to_class(row: &Row) -> Result<ClassEntry> {
    let day: String = row.get("day")?;

    Ok(ClassEntry {
        id: row.get("id")?,
        subject: row.get("subject")?,
        instructor: row.get("instructor")?,
        day: parse_weekday(&day)?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        color: row.get("color")?,
        owner_id: row.get("owner_id")?,
    })
}

impl Database {
    pub async fn insert_class(&self, entry: &ClassEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO classes (id, subject, instructor, day, start_time, end_time, color, owner_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.subject,
                    record.instructor,
                    record.day.as_str(),
                    record.start_time,
                    record.end_time,
                    record.color,
                    record.owner_id,
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn update_class(&self, entry: &ClassEntry) -> Result<bool> {
        let record = entry.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE classes
                 SET subject = ?1,
                     instructor = ?2,
                     day = ?3,
                     start_time = ?4,
                     end_time = ?5,
                     color = ?6
                 WHERE id = ?7",
                params![
                    record.subject,
                    record.instructor,
                    record.day.as_str(),
                    record.start_time,
                    record.end_time,
                    record.color,
                    record.id,
                ],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn delete_class(&self, class_id: &str) -> Result<bool> {
        let class_id = class_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM classes WHERE id = ?1", params![class_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    /// Classes for one owner, ordered for the weekly grid.
    pub async fn list_classes(&self, owner_id: Option<String>) -> Result<Vec<ClassEntry>> {
        self.execute(move |conn| {
            let mut entries = Vec::new();
            match owner_id {
                Some(owner) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, subject, instructor, day, start_time, end_time, color, owner_id
                         FROM classes
                         WHERE owner_id = ?1
                         ORDER BY day, start_time",
                    )?;
                    let mut rows = stmt.query(params![owner])?;
                    while let Some(row) = rows.next()? {
                        entries.push(row_to_class(row)?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, subject, instructor, day, start_time, end_time, color, owner_id
                         FROM classes
                         ORDER BY day, start_time",
                    )?;
                    let mut rows = stmt.query([])?;
                    while let Some(row) = rows.next()? {
                        entries.push(row_to_class(row)?);
                    }
                }
            }
            Ok(entries)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
        (db, dir)
    }

    fn class(id: &str, owner: &str) -> ClassEntry {
        ClassEntry {
            id: id.to_string(),
            subject: "statistics".to_string(),
            instructor: "Dr. Rahman".to_string(),
            day: Weekday::Tuesday,
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
            color: "#A2AF9B".to_string(),
            owner_id: Some(owner.to_string()),
        }
    }

    #[tokio::test]
    async fn listing_filters_by_owner() {
        let (db, _dir) = open_db();
        db.insert_class(&class("c1", "user123")).await.unwrap();
        db.insert_class(&class("c2", "someone-else")).await.unwrap();

        let mine = db.list_classes(Some("user123".to_string())).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "c1");

        let all = db.list_classes(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_report_row_presence() {
        let (db, _dir) = open_db();
        let mut entry = class("c1", "user123");
        db.insert_class(&entry).await.unwrap();

        entry.end_time = "11:00".to_string();
        assert!(db.update_class(&entry).await.unwrap());

        let loaded = db.list_classes(None).await.unwrap();
        assert_eq!(loaded[0].end_time, "11:00");

        assert!(db.delete_class("c1").await.unwrap());
        assert!(!db.delete_class("c1").await.unwrap());
    }
}
