use crate::ast::{Ident, NodeId, Span};
use chumsky::prelude::*;

/// Parser for line comments (// to end of line)
pub fn line_comment<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    just("//").then(none_of("\n").repeated()).ignored()
}

/// Parser for block comments (/* ... */)
pub fn block_comment<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored()
}

/// Parser for all whitespace and comments
pub fn ws<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    let comment = choice((block_comment(), line_comment()));
    let ws_item = comment.or(one_of(" \t\r\n").ignored());
    ws_item.repeated()
}

/// List of reserved keywords
pub const KEYWORDS: &[&str] = &[
    "fn", "int", "char", "bool", "void", "if", "else", "while", "return", "read", "write",
    "true", "false",
];

/// A keyword that is not the prefix of a longer identifier; yields its span
pub fn keyword<'a, WS>(
    ws: WS,
    kw: &'static str,
) -> impl Parser<'a, &'a str, Span, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    just(kw)
        .then_ignore(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_')
                .not(),
        )
        .try_map(|_, span| Ok(Span::from_chumsky(span)))
        .padded_by(ws)
}

/// A punctuation token; yields its span
pub fn symbol<'a, WS>(
    ws: WS,
    sym: &'static str,
) -> impl Parser<'a, &'a str, Span, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    just(sym)
        .try_map(|_, span| Ok(Span::from_chumsky(span)))
        .padded_by(ws)
}

/// Identifier that is not a keyword
pub fn ident<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Ident, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    text::ident()
        .try_map(|s: &str, span| {
            if KEYWORDS.contains(&s) {
                Err(Rich::custom(
                    span,
                    format!("'{s}' is a keyword and cannot be used as an identifier"),
                ))
            } else {
                Ok(Ident {
                    name: s.to_string(),
                    id: NodeId::UNASSIGNED,
                    span: Span::from_chumsky(span),
                })
            }
        })
        .padded_by(ws)
}
