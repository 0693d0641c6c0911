use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{helpers::parse_optional_datetime, Database};
use crate::models::{Expense, Income};

fn row_to_income(row: &Row) -> Result<Income> {
    let date: Option<String> = row.get("date")?;

    Ok(Income {
        id: row.get("id")?,
        source: row.get("source")?,
        amount: row.get("amount")?,
        date: parse_optional_datetime(date, "date")?,
        frequency: row.get("frequency")?,
    })
}

fn row_to_expense(row: &Row) -> Result<Expense> {
    let date: Option<String> = row.get("date")?;

    Ok(Expense {
        id: row.get("id")?,
        category: row.get("category")?,
        amount: row.get("amount")?,
        date: parse_optional_datetime(date, "date")?,
        note: row.get("note")?,
    })
}

impl Database {
    pub async fn insert_income(&self, income: &Income) -> Result<()> {
        let record = income.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO incomes (id, source, amount, date, frequency)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.source,
                    record.amount,
                    record.date.as_ref().map(|dt| dt.to_rfc3339()),
                    record.frequency,
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn delete_income(&self, income_id: &str) -> Result<bool> {
        let income_id = income_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM incomes WHERE id = ?1", params![income_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn list_incomes(&self) -> Result<Vec<Income>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, source, amount, date, frequency
                 FROM incomes
                 ORDER BY date DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut incomes = Vec::new();
            while let Some(row) = rows.next()? {
                incomes.push(row_to_income(row)?);
            }
            Ok(incomes)
        })
        .await
    }

    pub async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        let record = expense.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO expenses (id, category, amount, date, note)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.category,
                    record.amount,
                    record.date.as_ref().map(|dt| dt.to_rfc3339()),
                    record.note,
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let expense_id = expense_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM expenses WHERE id = ?1", params![expense_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, category, amount, date, note
                 FROM expenses
                 ORDER BY date DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut expenses = Vec::new();
            while let Some(row) = rows.next()? {
                expenses.push(row_to_expense(row)?);
            }
            Ok(expenses)
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

    #[tokio::test]
    async fn income_and_expense_round_trip() {
        let (db, _dir) = open_db();
        let date = Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());

        db.insert_income(&Income {
            id: "i1".to_string(),
            source: "part-time job".to_string(),
            amount: 320.50,
            date,
            frequency: Some("monthly".to_string()),
        })
        .await
        .unwrap();

        db.insert_expense(&Expense {
            id: "e1".to_string(),
            category: "books".to_string(),
            amount: 45.0,
            date,
            note: None,
        })
        .await
        .unwrap();

        let incomes = db.list_incomes().await.unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].amount, 320.50);

        let expenses = db.list_expenses().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "books");

        assert!(db.delete_income("i1").await.unwrap());
        assert!(!db.delete_income("i1").await.unwrap());
        assert!(db.delete_expense("e1").await.unwrap());
    }
}
