//! Axum route handlers for the JSON API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, DocumentKind};
use crate::generation::form::{prepare_request, read_form, ExtractionReport};
use crate::generation::workflow::{generate_email, WorkflowOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub index: usize,
    pub subject: String,
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    #[serde(flatten)]
    pub outcome: WorkflowOutcome,
    pub extraction: Option<ExtractionReport>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub kind: DocumentKind,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.end(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// GET /api/v1/sessions/:id/history
///
/// Entries in generation order.
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<HistoryItem>>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    if session.history.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let items = session
        .history
        .all()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryItem {
            index,
            subject: entry.result.subject.clone(),
            body: entry.result.body.clone(),
            generated_at: entry.generated_at,
        })
        .collect();

    Ok(Json(items))
}

/// POST /api/v1/sessions/:id/emails
///
/// Multipart form: extract → validate → generate subject and body → record.
/// Missing job description or portfolio yields a `warning` status, not an error.
pub async fn handle_generate_email(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<GenerateEmailResponse>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let prepared = prepare_request(read_form(multipart).await?).await?;

    let mut session = handle.lock().await;
    session.touch();
    let outcome =
        generate_email(state.generator.as_ref(), &mut session.history, &prepared.request).await?;

    Ok(Json(GenerateEmailResponse {
        outcome,
        extraction: prepared.extraction,
    }))
}

/// POST /api/v1/extract
///
/// Previews the text pulled out of an uploaded resume.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_form(multipart).await?;
    let file = form
        .resume
        .ok_or_else(|| AppError::Validation("A non-empty 'resume' file is required".to_string()))?;

    let kind = file.kind();
    let text = extract_text_blocking(file.bytes, kind).await;

    Ok(Json(ExtractResponse { kind, text }))
}
