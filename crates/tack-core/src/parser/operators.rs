use crate::ast::{BinaryOp, LogicalOp, Span, UnaryOp};
use chumsky::prelude::*;

/// Creates a parser for unary operators, keeping the operator's span
pub fn unary_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, (UnaryOp, Span), extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    choice((just('!').to(UnaryOp::Not), just('-').to(UnaryOp::Neg)))
        .try_map(|op, span| Ok((op, Span::from_chumsky(span))))
        .padded_by(ws)
}

/// Creates a parser for logical OR operator
pub fn or_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, LogicalOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    just("||").padded_by(ws).to(LogicalOp::Or)
}

/// Creates a parser for logical AND operator
pub fn and_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, LogicalOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    just("&&").padded_by(ws).to(LogicalOp::And)
}

/// Creates a parser for the assignment operator (a lone `=`, never the start of `==`)
pub fn assign_op<'a, WS>(ws: WS) -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    just('=')
        .then_ignore(just('=').not())
        .ignored()
        .padded_by(ws)
}

/// Creates a parser for multiplication/division operators
pub fn mul_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, BinaryOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let op = |c| just(c).padded_by(ws.clone());
    choice((op('*').to(BinaryOp::Mul), op('/').to(BinaryOp::Div)))
}

/// Creates a parser for addition/subtraction operators
pub fn add_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, BinaryOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let op = |c| just(c).padded_by(ws.clone());
    choice((op('+').to(BinaryOp::Add), op('-').to(BinaryOp::Sub)))
}

/// Creates a parser for equality operators (== and !=)
pub fn eq_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, BinaryOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    choice((
        just("==").padded_by(ws.clone()).to(BinaryOp::Eq),
        just("!=").padded_by(ws.clone()).to(BinaryOp::Ne),
    ))
}

/// Creates a parser for comparison operators (< <= > >=)
pub fn cmp_op<'a, WS>(
    ws: WS,
) -> impl Parser<'a, &'a str, BinaryOp, extra::Err<Rich<'a, char>>> + Clone
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let op = |c| just(c).padded_by(ws.clone());
    choice((
        just("<=").padded_by(ws.clone()).to(BinaryOp::Le),
        just(">=").padded_by(ws.clone()).to(BinaryOp::Ge),
        op('<').to(BinaryOp::Lt),
        op('>').to(BinaryOp::Gt),
    ))
}
