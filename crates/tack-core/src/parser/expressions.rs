use super::{lexer, literals, operators};
use crate::ast::{AssignExpr, BinaryOp, CallExpr, Expr, LogicalOp, NodeId};
use chumsky::prelude::*;

/// Creates a parser for calls: `callee(arg, ...)`
pub fn call<'a, WS, E>(ws: WS, expr: E) -> Boxed<'a, 'a, &'a str, CallExpr, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::ident(ws.clone())
        .then_ignore(just('(').padded_by(ws.clone()))
        .then(
            expr.separated_by(just(',').padded_by(ws.clone()))
                .collect::<Vec<Expr>>(),
        )
        .then(lexer::symbol(ws, ")"))
        .map(|((callee, arguments), close)| CallExpr {
            span: callee.span.to(close),
            callee,
            arguments,
            id: NodeId::UNASSIGNED,
        })
        .boxed()
}

/// Creates a parser for assignments: `target = value`
pub fn assignment<'a, WS, E>(
    ws: WS,
    expr: E,
) -> Boxed<'a, 'a, &'a str, AssignExpr, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    E: Parser<'a, &'a str, Expr, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    lexer::ident(ws.clone())
        .then_ignore(operators::assign_op(ws))
        .then(expr)
        .map(|(target, value)| AssignExpr {
            span: target.span.to(value.span()),
            target,
            value: Box::new(value),
            id: NodeId::UNASSIGNED,
        })
        .boxed()
}

/// Creates the expression parser.
///
/// Precedence, loosest first: `=` (right associative), `||`, `&&`, `== !=`,
/// `< <= > >=`, `+ -`, `* /`, unary `- !`, primary.
pub fn expression<'a, WS>(ws: WS) -> Boxed<'a, 'a, &'a str, Expr, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    recursive(|expr| {
        // Parenthesized expressions - allows precedence override
        let paren_expr = expr
            .clone()
            .delimited_by(
                just('(').padded_by(ws.clone()),
                just(')').padded_by(ws.clone()),
            )
            .boxed();

        // Primary expressions (atoms)
        let primary = choice((
            literals::integer(ws.clone()).boxed(),
            literals::character(ws.clone()).boxed(),
            literals::boolean(ws.clone()).boxed(),
            call(ws.clone(), expr.clone()).map(Expr::Call).boxed(),
            lexer::ident(ws.clone()).map(Expr::Identifier).boxed(),
            paren_expr,
        ))
        .boxed();

        let unary_expr = operators::unary_op(ws.clone())
            .repeated()
            .collect::<Vec<_>>()
            .then(primary)
            .map(|(ops, mut operand)| {
                // Apply operators right-to-left
                for (op, op_span) in ops.into_iter().rev() {
                    operand = Expr::Unary {
                        span: op_span.to(operand.span()),
                        op,
                        operand: Box::new(operand),
                        id: NodeId::UNASSIGNED,
                    };
                }
                operand
            })
            .boxed();

        let mul_expr = unary_expr
            .clone()
            .then(
                operators::mul_op(ws.clone())
                    .then(unary_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_binary)
            .boxed();

        let add_expr = mul_expr
            .clone()
            .then(
                operators::add_op(ws.clone())
                    .then(mul_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_binary)
            .boxed();

        let cmp_expr = add_expr
            .clone()
            .then(
                operators::cmp_op(ws.clone())
                    .then(add_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_binary)
            .boxed();

        let eq_expr = cmp_expr
            .clone()
            .then(
                operators::eq_op(ws.clone())
                    .then(cmp_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_binary)
            .boxed();

        let and_expr = eq_expr
            .clone()
            .then(
                operators::and_op(ws.clone())
                    .then(eq_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_logical)
            .boxed();

        let or_expr = and_expr
            .clone()
            .then(
                operators::or_op(ws.clone())
                    .then(and_expr)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(fold_logical)
            .boxed();

        let assign_expr = assignment(ws.clone(), expr).map(Expr::Assign);

        choice((assign_expr, or_expr))
    })
    .boxed()
}

/// Left-associate a chain of binary operators
fn fold_binary((first, ops): (Expr, Vec<(BinaryOp, Expr)>)) -> Expr {
    ops.into_iter().fold(first, |left, (op, right)| Expr::Binary {
        span: left.span().to(right.span()),
        left: Box::new(left),
        op,
        right: Box::new(right),
        id: NodeId::UNASSIGNED,
    })
}

fn fold_logical((first, ops): (Expr, Vec<(LogicalOp, Expr)>)) -> Expr {
    ops.into_iter().fold(first, |left, (op, right)| Expr::Logical {
        span: left.span().to(right.span()),
        left: Box::new(left),
        op,
        right: Box::new(right),
        id: NodeId::UNASSIGNED,
    })
}
