mod budget;
mod db;
mod models;
mod motivation;
mod questions;
mod refresh;
mod schedule;
mod settings;
mod study;
mod sync;
mod utils;

use db::Database;
use log::info;
use motivation::{SessionTracker, TrackerCapabilities};
use refresh::RefreshTicker;
use settings::{ApiSettings, SettingsStore};
use sync::ApiClient;
use tauri::{Emitter, Manager, State};

use budget::commands::{
    add_expense, add_income, delete_expense, delete_income, get_budget_summary, list_expenses,
    list_incomes,
};
use motivation::commands::{
    get_motivation, get_study_stats, list_recent_sessions, list_study_sessions,
    log_study_session, refresh_study_sessions, remove_study_session, stop_session_refresh,
    update_study_session,
};
use questions::commands::{create_question, delete_question, list_questions, update_question};
use refresh::commands::{
    get_dashboard_snapshot, start_dashboard_refresh, stop_dashboard_refresh,
};
use schedule::commands::{add_class, delete_class, list_classes, update_class};
use study::commands::{
    complete_study_plan, create_study_plan, delete_study_plan, get_deadline_progress,
    list_study_plans, refresh_study_plans, update_study_plan,
};

pub(crate) struct AppState {
    pub(crate) db: Database,
    pub(crate) settings: SettingsStore,
    pub(crate) client: ApiClient,
    pub(crate) tracker: SessionTracker,
    pub(crate) refresh: RefreshTicker,
}

#[tauri::command]
fn get_api_settings(state: State<AppState>) -> Result<ApiSettings, String> {
    Ok(state.settings.api())
}

/// Base URL changes take effect after a restart; the token and owner are
/// read per call.
#[tauri::command]
fn set_api_settings(
    settings: ApiSettings,
    state: State<AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_api(settings.clone())
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("api-settings-updated", &settings)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("StudyDeck starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let db_path = app_data_dir.join("studydeck.sqlite3");
                let database = Database::new(db_path)?;
                info!("Using local cache at {}", database.path().display());

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = SettingsStore::new(settings_path)?;

                let client = ApiClient::new(settings_store.api().base_url);
                let tracker = SessionTracker::new(
                    database.clone(),
                    client.clone(),
                    TrackerCapabilities::default(),
                );

                // Seed the session set from the cache before any command
                // can reach the tracker.
                {
                    let tracker_for_seed = tracker.clone();
                    tauri::async_runtime::block_on(async move {
                        tracker_for_seed.load_cache().await
                    })?;
                }

                let refresh =
                    RefreshTicker::new(app.handle().clone(), database.clone(), tracker.clone());

                app.manage(AppState {
                    db: database,
                    settings: settings_store,
                    client,
                    tracker,
                    refresh,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            // Study planner
            list_study_plans,
            create_study_plan,
            update_study_plan,
            complete_study_plan,
            delete_study_plan,
            refresh_study_plans,
            get_deadline_progress,
            // Motivation dashboard
            log_study_session,
            update_study_session,
            remove_study_session,
            list_study_sessions,
            list_recent_sessions,
            get_study_stats,
            refresh_study_sessions,
            stop_session_refresh,
            get_motivation,
            // Dashboard refresh
            get_dashboard_snapshot,
            start_dashboard_refresh,
            stop_dashboard_refresh,
            // Class schedule
            list_classes,
            add_class,
            update_class,
            delete_class,
            // Budget tracker
            list_incomes,
            add_income,
            delete_income,
            list_expenses,
            add_expense,
            delete_expense,
            get_budget_summary,
            // Question bank
            list_questions,
            create_question,
            update_question,
            delete_question,
            // Settings
            get_api_settings,
            set_api_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
