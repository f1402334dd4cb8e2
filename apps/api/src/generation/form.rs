//! Multipart form intake shared by the HTML page and the JSON API.

use axum::extract::Multipart;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, resolve_portfolio, DocumentKind};
use crate::generation::request::{GenerationInput, GenerationRequest};

pub const RESUME_FIELD: &str = "resume";

/// A file part from the form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_upload(self.content_type.as_deref(), self.file_name.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct SubmittedForm {
    pub input: GenerationInput,
    pub resume: Option<UploadedFile>,
}

/// Result of extracting the uploaded resume, if one was sent.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub kind: DocumentKind,
    pub extracted_chars: usize,
}

impl ExtractionReport {
    pub fn succeeded(&self) -> bool {
        self.extracted_chars > 0
    }
}

/// A validated request plus what happened to the uploaded file.
#[derive(Debug)]
pub struct PreparedRequest {
    pub request: GenerationRequest,
    pub extraction: Option<ExtractionReport>,
}

/// Reads every known field. Unknown fields are ignored; an empty file part
/// (no file chosen) counts as no upload.
pub async fn read_form(mut multipart: Multipart) -> Result<SubmittedForm, AppError> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.resume = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "job_description" => form.input.job_description = field.text().await?,
            "portfolio" => form.input.portfolio = field.text().await?,
            "tone" => form.input.tone = Some(field.text().await?),
            "email_format" => form.input.email_format = Some(field.text().await?),
            "creativity" => form.input.creativity = Some(field.text().await?),
            "personalization" => form.input.personalization = Some(field.text().await?),
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

/// Extracts the uploaded resume, resolves the portfolio text and validates
/// the remaining fields.
pub async fn prepare_request(form: SubmittedForm) -> Result<PreparedRequest, AppError> {
    let (uploaded_text, extraction) = match form.resume {
        Some(file) => {
            let kind = file.kind();
            let text = extract_text_blocking(file.bytes, kind).await;
            info!(
                "Extracted {} chars from {:?} upload {:?}",
                text.chars().count(),
                kind,
                file.file_name
            );
            let report = ExtractionReport {
                kind,
                extracted_chars: text.chars().count(),
            };
            (Some(text), Some(report))
        }
        None => (None, None),
    };

    let portfolio = resolve_portfolio(uploaded_text.as_deref(), &form.input.portfolio);
    let request = GenerationRequest::new(&form.input, portfolio)?;

    Ok(PreparedRequest {
        request,
        extraction,
    })
}
