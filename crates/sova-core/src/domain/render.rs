//! Placeholder substitution.
//!
//! The only construct understood is `{{ Name }}`. There are no expressions,
//! filters, loops, or conditionals. Rendering is a single left-to-right pass:
//! text that comes out of a parameter is never scanned again, so a project
//! name such as `{{Evil}}` is written literally instead of being expanded.

use crate::domain::{entities::ParameterSet, error::DomainError};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render `body`, replacing every placeholder with its parameter value.
///
/// # Errors
///
/// - `MissingParameter` if a placeholder names a key absent from `parameters`
/// - `MalformedPlaceholder` for an unclosed `{{` or an invalid name
pub fn render(body: &str, parameters: &ParameterSet) -> Result<String, DomainError> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let (name, len) = parse_placeholder(&rest[start..], consumed + start)?;

        let value = parameters
            .get(name)
            .ok_or_else(|| DomainError::MissingParameter {
                name: name.to_string(),
            })?;
        out.push_str(&value.rendered());

        consumed += start + len;
        rest = &rest[start + len..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Names referenced by `body`, in order of first appearance.
pub fn placeholders(body: &str) -> Result<Vec<String>, DomainError> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = body;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        let (name, len) = parse_placeholder(&rest[start..], consumed + start)?;
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        consumed += start + len;
        rest = &rest[start + len..];
    }

    Ok(names)
}

/// Parse the placeholder at the start of `input` (which begins with `{{`).
///
/// Returns the trimmed name and the byte length of the whole placeholder.
fn parse_placeholder(input: &str, offset: usize) -> Result<(&str, usize), DomainError> {
    let inner_start = OPEN.len();
    let close = input[inner_start..]
        .find(CLOSE)
        .ok_or_else(|| DomainError::MalformedPlaceholder {
            offset,
            reason: "unclosed '{{'".into(),
        })?;

    let name = input[inner_start..inner_start + close].trim();
    if !is_valid_name(name) {
        return Err(DomainError::MalformedPlaceholder {
            offset,
            reason: format!("invalid parameter name '{name}'"),
        });
    }

    Ok((name, inner_start + close + CLOSE.len()))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
