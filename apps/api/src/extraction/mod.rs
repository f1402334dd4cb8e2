//! Document Text Extractor — turns an uploaded resume into plain text.
//!
//! Extraction never fails: unreadable pages and paragraphs are skipped, and
//! an unsupported or corrupted document yields an empty string. Callers treat
//! empty text as "nothing extracted" and fall back to pasted text.

mod docx;
mod pdf;

use serde::Serialize;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Recognized upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    /// Resolves the kind from a declared media type.
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => DocumentKind::Pdf,
            DOCX_MIME => DocumentKind::Docx,
            _ => DocumentKind::Unsupported,
        }
    }

    /// Resolves the kind of an upload. The declared media type wins; the file
    /// extension is consulted only when no specific type was declared.
    pub fn from_upload(media_type: Option<&str>, file_name: Option<&str>) -> Self {
        match media_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) if !t.eq_ignore_ascii_case("application/octet-stream") => {
                Self::from_media_type(t)
            }
            _ => file_name.map(Self::from_file_name).unwrap_or(Self::Unsupported),
        }
    }

    fn from_file_name(file_name: &str) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("docx") => DocumentKind::Docx,
            _ => DocumentKind::Unsupported,
        }
    }
}

/// Extracts plain text from a document payload. Returns "" for unsupported kinds.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Pdf => pdf::extract(bytes),
        DocumentKind::Docx => docx::extract(bytes),
        DocumentKind::Unsupported => String::new(),
    }
}

/// Runs `extract_text` on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_text_blocking(bytes: bytes::Bytes, kind: DocumentKind) -> String {
    match tokio::task::spawn_blocking(move || extract_text(&bytes, kind)).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Extraction task did not complete: {e}");
            String::new()
        }
    }
}

/// Picks the portfolio text: uploaded-file text if it has content, else pasted text.
pub fn resolve_portfolio(uploaded_text: Option<&str>, pasted_text: &str) -> String {
    [uploaded_text.unwrap_or_default(), pasted_text]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}
