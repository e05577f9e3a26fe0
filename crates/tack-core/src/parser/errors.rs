//! Error formatting for parser errors
//!
//! Converts Chumsky parser errors into user-friendly diagnostic messages

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, FixIt};
use chumsky::error::{Rich, RichReason};

/// Convert Chumsky error reason to readable message
pub fn format_error_reason(reason: &RichReason<char>) -> String {
    match reason {
        RichReason::ExpectedFound { found, .. } => match found {
            Some(c) => format!("unexpected '{}'", c.escape_debug()),
            None => "unexpected end of input".to_string(),
        },
        RichReason::Custom(msg) => msg.to_string(),
    }
}

/// Convert Chumsky parse errors to Tack diagnostics
pub fn errors_to_diagnostics(
    errors: Vec<Rich<char>>,
    filename: &str,
    source: &str,
) -> Vec<Diagnostic> {
    errors
        .into_iter()
        .map(|e| {
            let span = Span::new(e.span().start, e.span().end);
            let message = format_error_reason(e.reason());
            let mut diag = Diagnostic::error(
                DiagnosticKind::Parse,
                message.clone(),
                span,
                filename.to_string(),
            )
            .with_code(DiagnosticCode::new("P0001", "syntax-error"));

            augment_with_fixits(&mut diag, &message, span, source);

            diag
        })
        .collect()
}

/// Expand diagnostics with helpful fix-its based on the error message and source context
fn augment_with_fixits(diag: &mut Diagnostic, message: &str, span: Span, source: &str) {
    if message == "unexpected end of input" {
        let to_insert = compute_missing_closers(source);
        if !to_insert.is_empty() {
            let label = if to_insert == "}" {
                "Insert '}'".to_string()
            } else {
                "Insert missing closers".to_string()
            };
            diag.suggestions
                .push("Possible unclosed block or delimiter".to_string());
            diag.fixits.push(FixIt::replace(
                Span::new(span.end, span.end),
                to_insert,
                label,
            ));
        } else {
            diag.suggestions
                .push("Did you forget a ';' at the end of a statement?".to_string());
        }
        return;
    }

    // Parse messages like: unexpected ')'
    if let Some(inner) = message
        .strip_prefix("unexpected '")
        .and_then(|rest| rest.strip_suffix('\''))
        && let Some(ch) = inner.chars().next()
        && inner.chars().count() == 1
    {
        if ")}".contains(ch) {
            diag.fixits
                .push(FixIt::replace(span, "", format!("Remove '{ch}'")));
        } else if ch == ',' {
            diag.fixits.push(FixIt::replace(span, "", "Remove ','"));
        }
    }
}

/// Compute a best-effort sequence of missing closing delimiters.
/// Returns a string to insert at EOF to balance the source.
fn compute_missing_closers(source: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '(' => stack.push(')'),
            '{' => stack.push('}'),
            ')' | '}' => {
                if let Some(pos) = stack.iter().rposition(|c| *c == ch) {
                    stack.remove(pos);
                }
            }
            // Delimiters inside comments and character literals don't count
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            '\'' => {
                let mut escaped = false;
                for c in chars.by_ref() {
                    match c {
                        '\\' if !escaped => escaped = true,
                        '\'' if !escaped => break,
                        '\n' => break,
                        _ => escaped = false,
                    }
                }
            }
            _ => {}
        }
    }

    // Last opened is closed first
    stack.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_closers_balanced() {
        assert_eq!(compute_missing_closers("fn f() -> void { }"), "");
    }

    #[test]
    fn test_missing_closers_nested() {
        assert_eq!(
            compute_missing_closers("fn f() -> void { if (g(1 { "),
            "}))}"
        );
    }

    #[test]
    fn test_missing_closers_ignores_comments_and_chars() {
        assert_eq!(
            compute_missing_closers("fn f() -> void { // (\n write '('; /* { */"),
            "}"
        );
    }
}
