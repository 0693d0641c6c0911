use log::warn;
use serde::Deserialize;
use tauri::State;
use uuid::Uuid;

use crate::{
    models::{ClassEntry, Weekday},
    schedule::validate_class_times,
    AppState,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInput {
    pub subject: String,
    pub instructor: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub color: Option<String>,
}

fn validate_class_input(input: &ClassInput) -> Result<(), String> {
    if input.subject.trim().is_empty() || input.instructor.trim().is_empty() {
        return Err("all fields are required".to_string());
    }
    validate_class_times(&input.start_time, &input.end_time).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_classes(state: State<'_, AppState>) -> Result<Vec<ClassEntry>, String> {
    let owner = state.settings.api().owner_id;
    state.db.list_classes(owner).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_class(
    state: State<'_, AppState>,
    input: ClassInput,
) -> Result<ClassEntry, String> {
    validate_class_input(&input)?;

    let entry = ClassEntry {
        id: Uuid::new_v4().to_string(),
        subject: input.subject,
        instructor: input.instructor,
        day: input.day,
        start_time: input.start_time,
        end_time: input.end_time,
        color: input.color.unwrap_or_else(|| "#A2AF9B".to_string()),
        owner_id: state.settings.api().owner_id,
    };

    state
        .db
        .insert_class(&entry)
        .await
        .map_err(|e| e.to_string())?;

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.push_class(&entry).await {
            warn!("Class saved locally but remote push failed: {err:#}");
        }
    }

    Ok(entry)
}

#[tauri::command]
pub async fn update_class(
    state: State<'_, AppState>,
    class_id: String,
    input: ClassInput,
) -> Result<ClassEntry, String> {
    validate_class_input(&input)?;

    let owner_id = state.settings.api().owner_id;
    let entry = ClassEntry {
        id: class_id.clone(),
        subject: input.subject,
        instructor: input.instructor,
        day: input.day,
        start_time: input.start_time,
        end_time: input.end_time,
        color: input.color.unwrap_or_else(|| "#A2AF9B".to_string()),
        owner_id,
    };

    let found = state
        .db
        .update_class(&entry)
        .await
        .map_err(|e| e.to_string())?;
    if !found {
        return Err(format!("no class with id `{class_id}`"));
    }

    if state.settings.api().token.is_some() {
        if let Err(err) = state.client.push_class(&entry).await {
            warn!("Class updated locally but remote push failed: {err:#}");
        }
    }

    Ok(entry)
}

#[tauri::command]
pub async fn delete_class(state: State<'_, AppState>, class_id: String) -> Result<bool, String> {
    let removed = state
        .db
        .delete_class(&class_id)
        .await
        .map_err(|e| e.to_string())?;

    if removed && state.settings.api().token.is_some() {
        if let Err(err) = state.client.delete_class(&class_id).await {
            warn!("Class deleted locally but remote delete failed: {err:#}");
        }
    }

    Ok(removed)
}
