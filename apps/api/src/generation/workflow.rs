//! Cold email workflow — validate → compose → generate → record.
//!
//! Flow: triggers_generation → compose both prompts → body and subject
//!       generation calls → append to session history → download artifact.
//!
//! History is passed in by the caller; this module owns no session state.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{compose_body_prompt, compose_subject_prompt};
use crate::generation::request::GenerationRequest;
use crate::llm_client::TextGenerator;
use crate::session::{GenerationResult, SessionHistory};

pub const MISSING_INPUT_WARNING: &str = "Please provide both Job Description and Portfolio.";
pub const ARTIFACT_FILE_NAME: &str = "cold_email.txt";
pub const ARTIFACT_MIME: &str = "text/plain";

/// Plain-text download offered after a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub content: String,
}

impl DownloadArtifact {
    pub fn for_result(result: &GenerationResult) -> Self {
        Self {
            file_name: ARTIFACT_FILE_NAME,
            mime: ARTIFACT_MIME,
            content: artifact_text(&result.subject, &result.body),
        }
    }
}

/// `Subject: <subject>\n\n<body>`, with both parts verbatim.
pub fn artifact_text(subject: &str, body: &str) -> String {
    format!("Subject: {subject}\n\n{body}")
}

/// What the user sees after pressing "Generate".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    Generated {
        index: usize,
        #[serde(flatten)]
        result: GenerationResult,
        artifact: DownloadArtifact,
    },
    Warning {
        message: String,
    },
}

/// Generation runs only when both texts have content.
pub fn triggers_generation(job_description: &str, portfolio_text: &str) -> bool {
    !job_description.trim().is_empty() && !portfolio_text.trim().is_empty()
}

/// Runs one generation for a session.
///
/// The body and subject calls are independent and run concurrently. If either
/// fails the history is left untouched and the error is returned for display.
pub async fn generate_email(
    generator: &dyn TextGenerator,
    history: &mut SessionHistory,
    request: &GenerationRequest,
) -> Result<WorkflowOutcome, AppError> {
    if !triggers_generation(&request.job_description, &request.portfolio_text) {
        info!("Generation skipped: job description or portfolio is empty");
        return Ok(WorkflowOutcome::Warning {
            message: MISSING_INPUT_WARNING.to_string(),
        });
    }

    let body_prompt = compose_body_prompt(request).map_err(|e| AppError::Internal(e.into()))?;
    let subject_prompt =
        compose_subject_prompt(request).map_err(|e| AppError::Internal(e.into()))?;

    info!(
        "Generating {} {} email (creativity={}, personalization={})",
        request.tone, request.email_format, request.creativity, request.personalization
    );

    let (body, subject) = tokio::try_join!(
        generator.generate(&body_prompt),
        generator.generate(&subject_prompt),
    )?;

    let result = GenerationResult { subject, body };
    let artifact = DownloadArtifact::for_result(&result);
    let index = history.append(result.clone());

    info!(
        "Email {} added to session history ({} total)",
        index + 1,
        history.len()
    );

    Ok(WorkflowOutcome::Generated {
        index,
        result,
        artifact,
    })
}
