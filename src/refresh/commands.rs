use tauri::State;

use crate::{refresh::DashboardSnapshot, AppState};

/// Immediate recompute, used right after a plan or session mutation so the
/// view does not wait for the next tick.
#[tauri::command]
pub async fn get_dashboard_snapshot(
    state: State<'_, AppState>,
) -> Result<DashboardSnapshot, String> {
    state.refresh.snapshot().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_dashboard_refresh(state: State<'_, AppState>) -> Result<(), String> {
    state.refresh.start().await;
    Ok(())
}

#[tauri::command]
pub async fn stop_dashboard_refresh(state: State<'_, AppState>) -> Result<(), String> {
    state.refresh.stop().await;
    Ok(())
}
