// Prompt templates for cold email generation.
// Creativity and personalization are natural-language hints inside the
// prompt; they are never sent as sampling parameters.

use crate::generation::request::GenerationRequest;
use crate::generation::template::{render_template, PromptError};

/// Email body prompt.
/// Placeholders: {tone}, {email_format}, {creativity}, {personalization},
///               {job_description}, {portfolio}
pub const EMAIL_BODY_TEMPLATE: &str = "You are an assistant drafting a {tone} cold email in {email_format} style.
Creativity Level: {creativity}/100.
Personalization Level: {personalization}/100.

Job Description:
{job_description}

Portfolio/Resume:
{portfolio}

Write a cold email tailored for this job.";

/// Subject line prompt. Placeholder: {job_description}
pub const SUBJECT_LINE_TEMPLATE: &str =
    "Write a catchy subject line for a cold email based on this job description:\n{job_description}";

/// Builds the email body prompt for a request.
pub fn compose_body_prompt(request: &GenerationRequest) -> Result<String, PromptError> {
    let tone = request.tone.to_string();
    let email_format = request.email_format.to_string();
    let creativity = request.creativity.to_string();
    let personalization = request.personalization.to_string();

    render_template(EMAIL_BODY_TEMPLATE, |name| match name {
        "tone" => Some(tone.as_str()),
        "email_format" => Some(email_format.as_str()),
        "creativity" => Some(creativity.as_str()),
        "personalization" => Some(personalization.as_str()),
        "job_description" => Some(request.job_description.as_str()),
        "portfolio" => Some(request.portfolio_text.as_str()),
        _ => None,
    })
}

/// Builds the subject line prompt for a request. Only the job description is used.
pub fn compose_subject_prompt(request: &GenerationRequest) -> Result<String, PromptError> {
    render_template(SUBJECT_LINE_TEMPLATE, |name| match name {
        "job_description" => Some(request.job_description.as_str()),
        _ => None,
    })
}
