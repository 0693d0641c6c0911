use tauri::State;

use crate::{
    models::{SessionPatch, StudySession},
    motivation::stats::StudyStats,
    sync::MotivationData,
    AppState,
};

#[tauri::command]
pub async fn log_study_session(
    state: State<'_, AppState>,
    subject: String,
    duration_minutes: u32,
) -> Result<StudySession, String> {
    if subject.trim().is_empty() {
        return Err("subject is required".to_string());
    }
    if duration_minutes == 0 {
        return Err("duration must be at least one minute".to_string());
    }

    let api = state.settings.api();
    state
        .tracker
        .log_session(subject, duration_minutes, api.owner_id, api.token)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_study_session(
    state: State<'_, AppState>,
    session_id: String,
    patch: SessionPatch,
) -> Result<(), String> {
    state
        .tracker
        .edit_session(&session_id, patch)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn remove_study_session(
    state: State<'_, AppState>,
    session_id: String,
) -> Result<bool, String> {
    state
        .tracker
        .remove_session(&session_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_study_sessions(
    state: State<'_, AppState>,
) -> Result<Vec<StudySession>, String> {
    Ok(state.tracker.sessions().await)
}

#[tauri::command]
pub async fn list_recent_sessions(
    state: State<'_, AppState>,
) -> Result<Vec<StudySession>, String> {
    Ok(state.tracker.recent_sessions().await)
}

#[tauri::command]
pub async fn get_study_stats(state: State<'_, AppState>) -> Result<StudyStats, String> {
    Ok(state.tracker.stats().await)
}

/// Starts the background fetch-and-merge against the remote session list.
/// Requires a configured token; without one the dashboard stays local-only.
#[tauri::command]
pub async fn refresh_study_sessions(state: State<'_, AppState>) -> Result<(), String> {
    let api = state.settings.api();
    let token = api.token.ok_or_else(|| "no API token configured".to_string())?;
    state.tracker.start_refresh(token).await;
    Ok(())
}

/// Cancels any in-flight session fetch. Views call this on teardown so a
/// late response is discarded instead of applied.
#[tauri::command]
pub async fn stop_session_refresh(state: State<'_, AppState>) -> Result<(), String> {
    state.tracker.stop_refresh().await;
    Ok(())
}

#[tauri::command]
pub async fn get_motivation(state: State<'_, AppState>) -> Result<MotivationData, String> {
    let api = state.settings.api();
    let token = api.token.ok_or_else(|| "no API token configured".to_string())?;
    state
        .client
        .fetch_motivation(&token)
        .await
        .map_err(|e| e.to_string())
}
