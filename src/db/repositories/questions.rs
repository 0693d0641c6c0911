use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_difficulty, parse_kind},
    Database,
};
use crate::models::ExamQuestion;

fn row_to_question(row: &Row) -> Result<ExamQuestion> {
    let kind: String = row.get("kind")?;
    let difficulty: String = row.get("difficulty")?;
    let options: String = row.get("options")?;

    Ok(ExamQuestion {
        id: row.get("id")?,
        question: row.get("question")?,
        kind: parse_kind(&kind)?,
        options: serde_json::from_str(&options).context("failed to parse question options")?,
        answer: row.get("answer")?,
        difficulty: parse_difficulty(&difficulty)?,
    })
}

impl Database {
    pub async fn insert_question(&self, question: &ExamQuestion) -> Result<()> {
        let record = question.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO questions (id, question, kind, options, answer, difficulty)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.question,
                    record.kind.as_str(),
                    serde_json::to_string(&record.options)?,
                    record.answer,
                    record.difficulty.as_str(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn update_question(&self, question: &ExamQuestion) -> Result<bool> {
        let record = question.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE questions
                 SET question = ?1,
                     kind = ?2,
                     options = ?3,
                     answer = ?4,
                     difficulty = ?5
                 WHERE id = ?6",
                params![
                    record.question,
                    record.kind.as_str(),
                    serde_json::to_string(&record.options)?,
                    record.answer,
                    record.difficulty.as_str(),
                    record.id,
                ],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn delete_question(&self, question_id: &str) -> Result<bool> {
        let question_id = question_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM questions WHERE id = ?1", params![question_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn list_questions(&self) -> Result<Vec<ExamQuestion>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, question, kind, options, answer, difficulty
                 FROM questions
                 ORDER BY rowid",
            )?;

            let mut rows = stmt.query([])?;
            let mut questions = Vec::new();
            while let Some(row) = rows.next()? {
                questions.push(row_to_question(row)?);
            }
            Ok(questions)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionKind};

    fn open_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn question_round_trips_with_options() {
        let (db, _dir) = open_db();
        let question = ExamQuestion {
            id: "q1".to_string(),
            question: "What is the derivative of x^2?".to_string(),
            kind: QuestionKind::MultipleChoice,
            options: vec![
                "2x".to_string(),
                "x".to_string(),
                "x^2".to_string(),
                "2".to_string(),
            ],
            answer: "2x".to_string(),
            difficulty: Difficulty::Easy,
        };

        db.insert_question(&question).await.unwrap();
        let loaded = db.list_questions().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].options, question.options);
        assert_eq!(loaded[0].kind, QuestionKind::MultipleChoice);

        assert!(db.delete_question("q1").await.unwrap());
        assert!(!db.delete_question("q1").await.unwrap());
    }
}
