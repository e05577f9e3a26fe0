use super::{declarations, expressions, lexer};
use crate::ast::{Expr, NodeId, Span, Stmt};
use chumsky::prelude::*;

/// Creates a parser for blocks (`{ stmt* }`), yielding the closing brace's span
pub fn block<'a, WS, S>(
    ws: WS,
    stmt: S,
) -> Boxed<'a, 'a, &'a str, (Vec<Stmt>, Span), extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::symbol(ws.clone(), "{")
        .ignore_then(stmt.repeated().collect::<Vec<Stmt>>())
        .then(lexer::symbol(ws, "}"))
        .boxed()
}

/// Creates a parser for if statements with an optional else block
pub fn if_stmt<'a, WS, E, S>(
    ws: WS,
    expr: E,
    stmt: S,
) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let else_block = lexer::keyword(ws.clone(), "else").ignore_then(block(ws.clone(), stmt.clone()));

    lexer::keyword(ws.clone(), "if")
        .then(expr.delimited_by(
            just('(').padded_by(ws.clone()),
            just(')').padded_by(ws.clone()),
        ))
        .then(block(ws, stmt))
        .then(else_block.or_not())
        .map(|(((if_span, condition), (then_block, then_close)), else_part)| {
            let (else_block, end) = match else_part {
                Some((stmts, close)) => (Some(stmts), close),
                None => (None, then_close),
            };
            Stmt::If {
                condition,
                then_block,
                else_block,
                id: NodeId::UNASSIGNED,
                span: if_span.to(end),
            }
        })
        .boxed()
}

/// Creates a parser for while loops
pub fn while_stmt<'a, WS, E, S>(
    ws: WS,
    expr: E,
    stmt: S,
) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::keyword(ws.clone(), "while")
        .then(expr.delimited_by(
            just('(').padded_by(ws.clone()),
            just(')').padded_by(ws.clone()),
        ))
        .then(block(ws, stmt))
        .map(|((while_span, condition), (body, close))| Stmt::While {
            condition,
            body,
            id: NodeId::UNASSIGNED,
            span: while_span.to(close),
        })
        .boxed()
}

/// Creates a parser for return statements, with or without a value
pub fn return_stmt<'a, WS, E>(ws: WS, expr: E) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::keyword(ws.clone(), "return")
        .then(expr.or_not())
        .then(lexer::symbol(ws, ";"))
        .map(|((return_span, value), semi)| Stmt::Return {
            value,
            id: NodeId::UNASSIGNED,
            span: return_span.to(semi),
        })
        .boxed()
}

/// Creates a parser for console input: `read x;`
pub fn read_stmt<'a, WS>(ws: WS) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::keyword(ws.clone(), "read")
        .then(lexer::ident(ws.clone()))
        .then(lexer::symbol(ws, ";"))
        .map(|((read_span, target), semi)| Stmt::Read {
            target,
            id: NodeId::UNASSIGNED,
            span: read_span.to(semi),
        })
        .boxed()
}

/// Creates a parser for console output: `write expr;`
pub fn write_stmt<'a, WS, E>(ws: WS, expr: E) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::keyword(ws.clone(), "write")
        .then(expr)
        .then(lexer::symbol(ws, ";"))
        .map(|((write_span, value), semi)| Stmt::Write {
            value,
            id: NodeId::UNASSIGNED,
            span: write_span.to(semi),
        })
        .boxed()
}

/// Creates a parser for `x++;` and `x--;`
pub fn inc_dec_stmt<'a, WS>(ws: WS) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::ident(ws.clone())
        .then(choice((
            just("++").padded_by(ws.clone()).to(true),
            just("--").padded_by(ws.clone()).to(false),
        )))
        .then(lexer::symbol(ws, ";"))
        .map(|((target, increment), semi)| {
            let span = target.span.to(semi);
            if increment {
                Stmt::PostInc {
                    target,
                    id: NodeId::UNASSIGNED,
                    span,
                }
            } else {
                Stmt::PostDec {
                    target,
                    id: NodeId::UNASSIGNED,
                    span,
                }
            }
        })
        .boxed()
}

/// Creates the statement parser
pub fn statement<'a, WS, E>(ws: WS, expr: E) -> Boxed<'a, 'a, &'a str, Stmt, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    recursive(|stmt| {
        let var_decl = declarations::var_decl(ws.clone()).map(Stmt::VarDecl);

        let assign_stmt = expressions::assignment(ws.clone(), expr.clone())
            .then(lexer::symbol(ws.clone(), ";"))
            .map(|(assign, semi)| Stmt::Assign {
                span: assign.span.to(semi),
                assign,
                id: NodeId::UNASSIGNED,
            });

        let call_stmt = expressions::call(ws.clone(), expr.clone())
            .then(lexer::symbol(ws.clone(), ";"))
            .map(|(call, semi)| Stmt::Call {
                span: call.span.to(semi),
                call,
                id: NodeId::UNASSIGNED,
            });

        choice((
            var_decl.boxed(),
            if_stmt(ws.clone(), expr.clone(), stmt.clone()),
            while_stmt(ws.clone(), expr.clone(), stmt),
            return_stmt(ws.clone(), expr.clone()),
            read_stmt(ws.clone()),
            write_stmt(ws.clone(), expr),
            inc_dec_stmt(ws),
            assign_stmt.boxed(),
            call_stmt.boxed(),
        ))
    })
    .boxed()
}
