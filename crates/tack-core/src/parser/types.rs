//! Type parsing for Tack
//!
//! Type annotations are one of the keywords `int`, `char`, `bool` and `void`.

use crate::ast::{Span, Type};
use chumsky::prelude::*;

/// Parser for type annotations
pub fn type_parser<'a>(
    ws: impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
) -> impl Parser<'a, &'a str, Type, extra::Err<Rich<'a, char>>> + Clone {
    text::ident()
        .try_map(|s: &str, span| {
            let ty_span = Span::from_chumsky(span);
            match s {
                "int" => Ok(Type::Int { span: ty_span }),
                "char" => Ok(Type::Char { span: ty_span }),
                "bool" => Ok(Type::Bool { span: ty_span }),
                "void" => Ok(Type::Void { span: ty_span }),
                _ => Err(Rich::custom(
                    span,
                    format!("expected a type (int, char, bool or void), found '{s}'"),
                )),
            }
        })
        .padded_by(ws)
}
