//! Cleanup and shape checks for generated HTML.
//!
//! Models sometimes wrap their answer in a markdown fence even when told not
//! to. Stripping fences never makes bad output acceptable on its own: the result
//! still has to pass `ensure_html_document`.

use crate::error::AppError;

const FENCE: &str = "```";
const DOCTYPE: &str = "<!DOCTYPE html>";

/// Remove a leading fence opener (with optional language tag) and a trailing
/// fence closer, then trim surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Language tag such as `html`, then the newline ending the opener
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')).unwrap_or(rest);
        text = rest;
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim().to_string()
}

/// Succeeds iff `html` starts with the HTML5 document type declaration.
///
/// The declaration is matched ASCII case-insensitively.
pub fn ensure_html_document(html: &str) -> Result<(), AppError> {
    let starts_with_doctype = html
        .get(..DOCTYPE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DOCTYPE));

    if starts_with_doctype {
        Ok(())
    } else {
        Err(AppError::MalformedHtml)
    }
}
