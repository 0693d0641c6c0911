use serde::Deserialize;
use tauri::State;
use uuid::Uuid;

use crate::{
    models::{Difficulty, ExamQuestion, QuestionKind},
    questions::validate_question,
    AppState,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub question: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Option<Difficulty>,
}

fn build_question(id: String, input: QuestionInput) -> Result<ExamQuestion, String> {
    if input.question.trim().is_empty() {
        return Err("question text is required".to_string());
    }

    // True/false always gets the fixed pair, whatever the form sent.
    let options = match input.kind {
        QuestionKind::TrueFalse => vec!["True".to_string(), "False".to_string()],
        _ => input.options,
    };

    validate_question(input.kind, &options, &input.answer).map_err(|e| e.to_string())?;

    Ok(ExamQuestion {
        id,
        question: input.question,
        kind: input.kind,
        options,
        answer: input.answer,
        difficulty: input.difficulty.unwrap_or_default(),
    })
}

#[tauri::command]
pub async fn list_questions(state: State<'_, AppState>) -> Result<Vec<ExamQuestion>, String> {
    state.db.list_questions().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_question(
    state: State<'_, AppState>,
    input: QuestionInput,
) -> Result<ExamQuestion, String> {
    let question = build_question(Uuid::new_v4().to_string(), input)?;
    state
        .db
        .insert_question(&question)
        .await
        .map_err(|e| e.to_string())?;
    Ok(question)
}

#[tauri::command]
pub async fn update_question(
    state: State<'_, AppState>,
    question_id: String,
    input: QuestionInput,
) -> Result<ExamQuestion, String> {
    let question = build_question(question_id.clone(), input)?;
    let found = state
        .db
        .update_question(&question)
        .await
        .map_err(|e| e.to_string())?;
    if !found {
        return Err(format!("no question with id `{question_id}`"));
    }
    Ok(question)
}

#[tauri::command]
pub async fn delete_question(
    state: State<'_, AppState>,
    question_id: String,
) -> Result<bool, String> {
    state
        .db
        .delete_question(&question_id)
        .await
        .map_err(|e| e.to_string())
}
