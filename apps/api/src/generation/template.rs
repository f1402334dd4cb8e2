//! Single-pass `{name}` placeholder substitution.
//!
//! Substituted values are copied into the output and never rescanned, so
//! user text that happens to contain `{portfolio}` or stray braces cannot
//! alter the template. `{{` and `}}` produce literal braces.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("No value supplied for placeholder '{0}'")]
    MissingValue(String),

    #[error("Unterminated placeholder starting at byte {0}")]
    Unterminated(usize),

    #[error("Unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),
}

/// Renders `template`, resolving each placeholder through `lookup`.
pub fn render_template<'v, F>(template: &str, mut lookup: F) -> Result<String, PromptError>
where
    F: FnMut(&str) -> Option<&'v str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let consumed = if tail.starts_with("{{") {
            out.push('{');
            2
        } else if tail.starts_with("}}") {
            out.push('}');
            2
        } else if tail.starts_with('}') {
            return Err(PromptError::UnmatchedClose(offset + pos));
        } else {
            let close = tail
                .find('}')
                .ok_or(PromptError::Unterminated(offset + pos))?;
            let name = &tail[1..close];
            let value = lookup(name).ok_or_else(|| PromptError::MissingValue(name.to_string()))?;
            out.push_str(value);
            close + 1
        };

        offset += pos + consumed;
        rest = &tail[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}
