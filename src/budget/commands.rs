use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use tauri::State;
use uuid::Uuid;

use crate::{
    budget::compute_summary,
    models::{BudgetSummary, Expense, Income},
    AppState,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeInput {
    pub source: String,
    pub amount: f64,
    pub date: Option<DateTime<Utc>>,
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub category: String,
    pub amount: f64,
    pub date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[tauri::command]
pub async fn list_incomes(state: State<'_, AppState>) -> Result<Vec<Income>, String> {
    state.db.list_incomes().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_income(state: State<'_, AppState>, input: IncomeInput) -> Result<Income, String> {
    if input.source.trim().is_empty() {
        return Err("source is required".to_string());
    }
    if input.amount < 0.0 {
        return Err("amount cannot be negative".to_string());
    }

    let income = Income {
        id: Uuid::new_v4().to_string(),
        source: input.source,
        amount: input.amount,
        date: Some(input.date.unwrap_or_else(Utc::now)),
        frequency: input.frequency,
    };

    state
        .db
        .insert_income(&income)
        .await
        .map_err(|e| e.to_string())?;

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.push_income(&income).await {
            warn!("Income saved locally but remote push failed: {err:#}");
        }
    }

    Ok(income)
}

#[tauri::command]
pub async fn delete_income(state: State<'_, AppState>, income_id: String) -> Result<bool, String> {
    let removed = state
        .db
        .delete_income(&income_id)
        .await
        .map_err(|e| e.to_string())?;

    if removed && state.settings.api().token.is_some() {
        if let Err(err) = state.client.delete_income(&income_id).await {
            warn!("Income deleted locally but remote delete failed: {err:#}");
        }
    }

    Ok(removed)
}

#[tauri::command]
pub async fn list_expenses(state: State<'_, AppState>) -> Result<Vec<Expense>, String> {
    state.db.list_expenses().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_expense(
    state: State<'_, AppState>,
    input: ExpenseInput,
) -> Result<Expense, String> {
    if input.category.trim().is_empty() {
        return Err("category is required".to_string());
    }
    if input.amount < 0.0 {
        return Err("amount cannot be negative".to_string());
    }

    let expense = Expense {
        id: Uuid::new_v4().to_string(),
        category: input.category,
        amount: input.amount,
        date: Some(input.date.unwrap_or_else(Utc::now)),
        note: input.note,
    };

    state
        .db
        .insert_expense(&expense)
        .await
        .map_err(|e| e.to_string())?;

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.push_expense(&expense).await {
            warn!("Expense saved locally but remote push failed: {err:#}");
        }
    }

    Ok(expense)
}

#[tauri::command]
pub async fn delete_expense(
    state: State<'_, AppState>,
    expense_id: String,
) -> Result<bool, String> {
    let removed = state
        .db
        .delete_expense(&expense_id)
        .await
        .map_err(|e| e.to_string())?;

    if removed && state.settings.api().token.is_some() {
        if let Err(err) = state.client.delete_expense(&expense_id).await {
            warn!("Expense deleted locally but remote delete failed: {err:#}");
        }
    }

    Ok(removed)
}

#[tauri::command]
pub async fn get_budget_summary(state: State<'_, AppState>) -> Result<BudgetSummary, String> {
    let incomes = state.db.list_incomes().await.map_err(|e| e.to_string())?;
    let expenses = state.db.list_expenses().await.map_err(|e| e.to_string())?;
    Ok(compute_summary(&incomes, &expenses))
}
