use crate::ast::{Expr, NodeId, Span};
use chumsky::prelude::*;

/// Creates a parser for decimal integer literals that fit in an `i32`
pub fn integer<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    // Out of range literals emit an error but still produce a node
    text::int(10)
        .validate(|s: &str, e, emitter| {
            let value = s.parse::<i32>().unwrap_or_else(|_| {
                emitter.emit(Rich::custom(e.span(), "integer literal out of range"));
                0
            });
            Expr::Int {
                value,
                id: NodeId::UNASSIGNED,
                span: Span::from_chumsky(e.span()),
            }
        })
        .padded_by(ws)
}

/// Creates a parser for character literals ('a', '\n', ...)
pub fn character<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let escape = just('\\').ignore_then(choice((
        just('n').to('\n'),
        just('t').to('\t'),
        just('0').to('\0'),
        just('\'').to('\''),
        just('\\').to('\\'),
    )));

    choice((escape, none_of("\\'\n")))
        .delimited_by(just('\''), just('\''))
        .try_map(|value, span| {
            Ok(Expr::Char {
                value,
                id: NodeId::UNASSIGNED,
                span: Span::from_chumsky(span),
            })
        })
        .padded_by(ws)
}

/// Creates a parser for boolean literals (true/false)
pub fn boolean<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    choice((just("true").to(true), just("false").to(false)))
        .then_ignore(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_')
                .not(),
        )
        .try_map(|value, span| {
            Ok(Expr::Boolean {
                value,
                id: NodeId::UNASSIGNED,
                span: Span::from_chumsky(span),
            })
        })
        .padded_by(ws)
}
