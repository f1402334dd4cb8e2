//! Server-rendered page: the form, the latest email, and the session history.

pub mod page;

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::form::{prepare_request, read_form};
use crate::generation::workflow::{
    artifact_text, generate_email, WorkflowOutcome, ARTIFACT_FILE_NAME,
};
use crate::state::AppState;
use page::{FormView, IndexPage};

const EXTRACTION_SUCCEEDED: &str = "Resume text extracted successfully!";
const EXTRACTION_EMPTY: &str =
    "No text could be extracted from the uploaded file. Paste your portfolio instead.";

/// GET /
/// Starts a session and sends the browser to its page.
pub async fn handle_start(State(state): State<AppState>) -> Redirect {
    let id = state.sessions.create().await;
    Redirect::to(&format!("/sessions/{id}"))
}

/// GET /sessions/:id
/// An expired or unknown session starts over with a fresh one.
pub async fn handle_page(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let Ok(handle) = state.sessions.get(session_id).await else {
        return Ok(Redirect::to("/").into_response());
    };
    let mut session = handle.lock().await;
    session.touch();

    let html = IndexPage::new(session_id, FormView::default(), &session.history).render()?;
    Ok(Html(html).into_response())
}

/// POST /sessions/:id/generate
///
/// Runs the workflow and re-renders the page. Warnings, invalid fields and
/// generation failures are shown on the page rather than as error responses.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Ok(handle) = state.sessions.get(session_id).await else {
        return Ok(Redirect::to("/").into_response());
    };

    let form = read_form(multipart).await?;
    let form_view = FormView::from_input(&form.input);

    let prepared = prepare_request(form).await;

    let mut session = handle.lock().await;
    session.touch();

    let (outcome, extraction) = match prepared {
        Ok(prepared) => {
            let outcome =
                generate_email(state.generator.as_ref(), &mut session.history, &prepared.request)
                    .await;
            (outcome, prepared.extraction)
        }
        Err(e) => (Err(e), None),
    };

    let mut page = IndexPage::new(session_id, form_view, &session.history);
    page.notice = extraction.map(|report| {
        if report.succeeded() {
            EXTRACTION_SUCCEEDED.to_string()
        } else {
            EXTRACTION_EMPTY.to_string()
        }
    });

    match outcome {
        Ok(WorkflowOutcome::Generated { index, result, .. }) => {
            page = page.with_generated(index, &result);
        }
        Ok(WorkflowOutcome::Warning { message }) => page.warning = Some(message),
        Err(e) => {
            warn!("Generation for session {session_id} failed: {e}");
            page.error = Some(e.user_message());
        }
    }

    Ok(Html(page.render()?).into_response())
}

/// GET /sessions/:id/history/:index/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Response, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let entry = session
        .history
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("History entry {index} not found")))?;
    let content = artifact_text(&entry.result.subject, &entry.result.body);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARTIFACT_FILE_NAME}\""),
            ),
        ],
        content,
    )
        .into_response())
}
