//! Typed generation request. Raw form values are validated here before any
//! prompt is composed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_CREATIVITY: u8 = 50;
pub const DEFAULT_PERSONALIZATION: u8 = 70;
const SLIDER_MAX: u8 = 100;

/// Voice of the generated email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Persuasive,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Persuasive,
        Tone::Concise,
    ];
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Persuasive => "Persuasive",
            Tone::Concise => "Concise",
        };
        f.write_str(label)
    }
}

impl FromStr for Tone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| normalize(&t.to_string()) == normalize(s))
            .ok_or_else(|| AppError::Validation(format!("Unknown tone '{s}'")))
    }
}

/// Layout of the generated email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailFormat {
    #[default]
    FormalLetter,
    ShortNote,
}

impl EmailFormat {
    pub const ALL: [EmailFormat; 2] = [EmailFormat::FormalLetter, EmailFormat::ShortNote];
}

impl fmt::Display for EmailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmailFormat::FormalLetter => "Formal Letter",
            EmailFormat::ShortNote => "Short Note",
        };
        f.write_str(label)
    }
}

impl FromStr for EmailFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailFormat::ALL
            .into_iter()
            .find(|t| normalize(&t.to_string()) == normalize(s))
            .ok_or_else(|| AppError::Validation(format!("Unknown email format '{s}'")))
    }
}

/// "Formal Letter", "formal_letter" and "FormalLetter" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Raw form values as read from the multipart body. Every field may be absent.
#[derive(Debug, Clone, Default)]
pub struct GenerationInput {
    pub job_description: String,
    pub portfolio: String,
    pub tone: Option<String>,
    pub email_format: Option<String>,
    pub creativity: Option<String>,
    pub personalization: Option<String>,
}

/// A validated request for one email. Constructed per trigger, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub job_description: String,
    pub portfolio_text: String,
    pub tone: Tone,
    pub creativity: u8,
    pub personalization: u8,
    pub email_format: EmailFormat,
}

impl GenerationRequest {
    /// Builds a request from form input and the already-resolved portfolio text.
    /// Fails only on malformed selector or slider values; empty texts are
    /// allowed here and rejected later by the workflow as a warning.
    pub fn new(input: &GenerationInput, portfolio_text: String) -> Result<Self, AppError> {
        Ok(Self {
            job_description: input.job_description.clone(),
            portfolio_text,
            tone: parse_or_default(input.tone.as_deref())?,
            creativity: parse_slider("creativity", input.creativity.as_deref(), DEFAULT_CREATIVITY)?,
            personalization: parse_slider(
                "personalization",
                input.personalization.as_deref(),
                DEFAULT_PERSONALIZATION,
            )?,
            email_format: parse_or_default(input.email_format.as_deref())?,
        })
    }
}

fn parse_or_default<T>(raw: Option<&str>) -> Result<T, AppError>
where
    T: FromStr<Err = AppError> + Default,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(T::default()),
    }
}

fn parse_slider(name: &str, raw: Option<&str>, default: u8) -> Result<u8, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<u8>() {
        Ok(value) if value <= SLIDER_MAX => Ok(value),
        _ => Err(AppError::Validation(format!(
            "{name} must be a whole number between 0 and {SLIDER_MAX}, got '{raw}'"
        ))),
    }
}
