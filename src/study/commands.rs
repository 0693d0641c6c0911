use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use tauri::State;
use uuid::Uuid;

use crate::{
    models::{Priority, StudyPlan},
    study::deadline::{plan_progress, DeadlineProgress},
    AppState,
};

/// Everything the plan form submits. Edits send the full form too, so an
/// update replaces all editable fields at once.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub subject: String,
    pub topic: Option<String>,
    pub priority: Option<Priority>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub duration_minutes: u32,
    pub deadline: Option<DateTime<Utc>>,
}

fn validate_plan_input(input: &PlanInput) -> Result<(), String> {
    if input.subject.trim().is_empty() {
        return Err("subject is required".to_string());
    }
    Ok(())
}

#[tauri::command]
pub async fn list_study_plans(state: State<'_, AppState>) -> Result<Vec<StudyPlan>, String> {
    state.db.list_plans().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_study_plan(
    state: State<'_, AppState>,
    input: PlanInput,
) -> Result<StudyPlan, String> {
    validate_plan_input(&input)?;

    let plan = StudyPlan {
        id: Uuid::new_v4().to_string(),
        subject: input.subject,
        topic: input.topic,
        priority: input.priority.unwrap_or_default(),
        day: input.day,
        start_time: input.start_time,
        duration_minutes: input.duration_minutes,
        deadline: input.deadline,
        created_at: Utc::now(),
        completed: false,
    };

    state.db.upsert_plan(&plan).await.map_err(|e| e.to_string())?;

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.create_plan(&plan).await {
            warn!("Plan saved locally but remote create failed: {err:#}");
        }
    }

    Ok(plan)
}

#[tauri::command]
pub async fn update_study_plan(
    state: State<'_, AppState>,
    plan_id: String,
    input: PlanInput,
) -> Result<StudyPlan, String> {
    validate_plan_input(&input)?;

    let existing = state
        .db
        .get_plan(&plan_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no study plan with id `{plan_id}`"))?;

    // `created_at` is kept so deadline progress keeps its baseline.
    let plan = StudyPlan {
        id: existing.id,
        subject: input.subject,
        topic: input.topic,
        priority: input.priority.unwrap_or(existing.priority),
        day: input.day,
        start_time: input.start_time,
        duration_minutes: input.duration_minutes,
        deadline: input.deadline,
        created_at: existing.created_at,
        completed: existing.completed,
    };

    state.db.upsert_plan(&plan).await.map_err(|e| e.to_string())?;

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.update_plan(&plan).await {
            warn!("Plan updated locally but remote update failed: {err:#}");
        }
    }

    Ok(plan)
}

#[tauri::command]
pub async fn complete_study_plan(
    state: State<'_, AppState>,
    plan_id: String,
) -> Result<(), String> {
    let found = state
        .db
        .set_plan_completed(&plan_id, true)
        .await
        .map_err(|e| e.to_string())?;
    if !found {
        return Err(format!("no study plan with id `{plan_id}`"));
    }

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.complete_plan(&plan_id).await {
            warn!("Plan completed locally but remote completion failed: {err:#}");
        }
    }

    Ok(())
}

/// Deleting an already-gone plan succeeds, so a retried delete is harmless.
#[tauri::command]
pub async fn delete_study_plan(
    state: State<'_, AppState>,
    plan_id: String,
) -> Result<bool, String> {
    let removed = state
        .db
        .delete_plan(&plan_id)
        .await
        .map_err(|e| e.to_string())?;

    if removed && state.settings.api().token.is_some() {
        if let Err(err) = state.client.delete_plan(&plan_id).await {
            warn!("Plan deleted locally but remote delete failed: {err:#}");
        }
    }

    Ok(removed)
}

/// Pulls the remote plan list into the cache and returns the refreshed
/// listing. The command is awaited by the calling view, so there is no
/// in-flight result to guard against here.
#[tauri::command]
pub async fn refresh_study_plans(state: State<'_, AppState>) -> Result<Vec<StudyPlan>, String> {
    let remote = state.client.fetch_plans().await.map_err(|e| e.to_string())?;
    for plan in &remote {
        state.db.upsert_plan(plan).await.map_err(|e| e.to_string())?;
    }
    state.db.list_plans().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_deadline_progress(
    state: State<'_, AppState>,
    plan_id: String,
) -> Result<Option<DeadlineProgress>, String> {
    let plan = state
        .db
        .get_plan(&plan_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no study plan with id `{plan_id}`"))?;

    Ok(plan_progress(&plan, Utc::now()))
}
