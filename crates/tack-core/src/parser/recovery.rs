//! Error recovery strategies for the Tack parser.
//!
//! When a top-level declaration fails to parse, the parser skips ahead so it can keep
//! collecting errors from the rest of the file.
//!
//! ## Recovery Strategy
//!
//! 1. Skip up to and including the next `;` or `}`
//! 2. Resume parsing the next declaration
//! 3. Continue accumulating errors for the rest of the file
//!
//! Errors inside function bodies are reported against the enclosing declaration; the
//! skipped region ends at the first `;` or `}`, so a body may produce follow-up errors.
//!
//! ## Example
//!
//! ```text
//! int @a;      // Error: unexpected '@'
//! bool b;      // Parsed after recovery
//! char #c;     // Error: unexpected '#'
//! ```

use crate::ast::{Decl, NodeId, Span, Type, VarDecl};
use chumsky::prelude::*;

/// Creates a recovery parser for top-level declarations.
///
/// Returns a placeholder `void` variable declaration covering the skipped text. The
/// placeholder never reaches later stages: a parse with errors returns only diagnostics.
pub fn declaration_recovery<'a>() -> impl Parser<'a, &'a str, Decl, extra::Err<Rich<'a, char>>> + Clone
{
    choice((
        none_of(";}")
            .repeated()
            .at_least(1) // Must consume at least something to make progress
            .then(one_of(";}").or_not())
            .ignored(),
        one_of(";}").ignored(),
    ))
    .to_slice()
    .try_map(|_skipped: &str, span| {
        let span = Span::from_chumsky(span);
        Ok(Decl::Var(VarDecl {
            r#type: Type::Void { span },
            name: String::new(),
            name_span: span,
            id: NodeId::UNASSIGNED,
            span,
        }))
    })
}
