use askama::Template;
use uuid::Uuid;

use crate::generation::request::{
    EmailFormat, GenerationInput, Tone, DEFAULT_CREATIVITY, DEFAULT_PERSONALIZATION,
};
use crate::session::{GenerationResult, SessionHistory};

/// One radio option.
pub struct Choice {
    pub value: String,
    pub selected: bool,
}

/// The email produced by the latest submission.
pub struct GeneratedView {
    pub subject: String,
    pub body: String,
    pub download_url: String,
}

pub struct HistoryView {
    pub number: usize,
    pub subject: String,
    pub body: String,
    pub download_url: String,
}

/// Values echoed back into the form after a submission.
pub struct FormView {
    pub job_description: String,
    pub portfolio: String,
    pub tone: Tone,
    pub email_format: EmailFormat,
    pub creativity: u8,
    pub personalization: u8,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            job_description: String::new(),
            portfolio: String::new(),
            tone: Tone::default(),
            email_format: EmailFormat::default(),
            creativity: DEFAULT_CREATIVITY,
            personalization: DEFAULT_PERSONALIZATION,
        }
    }
}

impl FormView {
    /// Echoes raw input; values that do not parse fall back to defaults.
    pub fn from_input(input: &GenerationInput) -> Self {
        let defaults = Self::default();
        Self {
            job_description: input.job_description.clone(),
            portfolio: input.portfolio.clone(),
            tone: input
                .tone
                .as_deref()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.tone),
            email_format: input
                .email_format
                .as_deref()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.email_format),
            creativity: slider_or(input.creativity.as_deref(), defaults.creativity),
            personalization: slider_or(input.personalization.as_deref(), defaults.personalization),
        }
    }
}

fn slider_or(raw: Option<&str>, default: u8) -> u8 {
    raw.and_then(|v| v.trim().parse::<u8>().ok())
        .filter(|v| *v <= 100)
        .unwrap_or(default)
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub session_id: Uuid,
    pub form: FormView,
    pub tones: Vec<Choice>,
    pub formats: Vec<Choice>,
    pub notice: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub generated: Option<GeneratedView>,
    pub history: Vec<HistoryView>,
}

impl IndexPage {
    pub fn new(session_id: Uuid, form: FormView, history: &SessionHistory) -> Self {
        let tones = Tone::ALL
            .iter()
            .map(|t| Choice {
                value: t.to_string(),
                selected: *t == form.tone,
            })
            .collect();
        let formats = EmailFormat::ALL
            .iter()
            .map(|f| Choice {
                value: f.to_string(),
                selected: *f == form.email_format,
            })
            .collect();
        let history = history
            .all()
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryView {
                number: index + 1,
                subject: entry.result.subject.clone(),
                body: entry.result.body.clone(),
                download_url: download_url(session_id, index),
            })
            .collect();

        Self {
            session_id,
            form,
            tones,
            formats,
            notice: None,
            warning: None,
            error: None,
            generated: None,
            history,
        }
    }

    pub fn with_generated(mut self, index: usize, result: &GenerationResult) -> Self {
        self.generated = Some(GeneratedView {
            subject: result.subject.clone(),
            body: result.body.clone(),
            download_url: download_url(self.session_id, index),
        });
        self
    }
}

pub fn download_url(session_id: Uuid, index: usize) -> String {
    format!("/sessions/{session_id}/history/{index}/download")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_view_falls_back_on_bad_values() {
        let input = GenerationInput {
            tone: Some("Grumpy".to_string()),
            email_format: Some("short note".to_string()),
            creativity: Some("250".to_string()),
            personalization: Some("12".to_string()),
            ..Default::default()
        };
        let view = FormView::from_input(&input);
        assert_eq!(view.tone, Tone::Professional);
        assert_eq!(view.email_format, EmailFormat::ShortNote);
        assert_eq!(view.creativity, 50);
        assert_eq!(view.personalization, 12);
    }

    #[test]
    fn test_page_renders_history_collapsibles() {
        let mut history = SessionHistory::default();
        history.append(GenerationResult {
            subject: "Hello <Acme>".to_string(),
            body: "Body one".to_string(),
        });
        history.append(GenerationResult {
            subject: "Second".to_string(),
            body: "Body two".to_string(),
        });
        let id = Uuid::new_v4();
        let html = IndexPage::new(id, FormView::default(), &history)
            .render()
            .unwrap();

        assert!(html.contains("Email 1: Hello &lt;Acme&gt;"));
        assert!(html.contains("Email 2: Second"));
        assert!(html.contains(&download_url(id, 1)));
        assert!(html.find("Email 1:").unwrap() < html.find("Email 2:").unwrap());
    }

    #[test]
    fn test_page_marks_selected_options_and_messages() {
        let form = FormView {
            tone: Tone::Concise,
            email_format: EmailFormat::ShortNote,
            ..Default::default()
        };
        let mut page = IndexPage::new(Uuid::new_v4(), form, &SessionHistory::default());
        page.warning = Some("Please provide both Job Description and Portfolio.".to_string());
        let html = page.render().unwrap();

        assert!(html.contains(r#"value="Concise" checked"#));
        assert!(html.contains(r#"value="Short Note" checked"#));
        assert!(html.contains("Please provide both Job Description and Portfolio."));
        assert!(!html.contains("Email History"));
    }
}
