use super::{lexer, statements, types};
use crate::ast::{FnDecl, Formal, NodeId, Stmt, VarDecl};
use chumsky::prelude::*;

/// Creates a parser for variable declarations: `int x;`
pub fn var_decl<'a, WS>(ws: WS) -> Boxed<'a, 'a, &'a str, VarDecl, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    types::type_parser(ws.clone())
        .then(lexer::ident(ws.clone()))
        .then(lexer::symbol(ws, ";"))
        .map(|((ty, name), semi)| VarDecl {
            span: ty.span().to(semi),
            r#type: ty,
            name: name.name,
            name_span: name.span,
            id: NodeId::UNASSIGNED,
        })
        .boxed()
}

/// Creates a parser for function declarations: `fn name(int a, bool b) -> int { ... }`
pub fn fn_decl<'a, WS, S>(
    ws: WS,
    stmt: S,
) -> Boxed<'a, 'a, &'a str, FnDecl, extra::Err<Rich<'a, char>>>
where
    WS: Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone + 'a,
    S: Parser<'a, &'a str, Stmt, extra::Err<Rich<'a, char>>> + Clone + 'a,
{
    let formal = types::type_parser(ws.clone())
        .then(lexer::ident(ws.clone()))
        .map(|(ty, name)| Formal {
            span: ty.span().to(name.span),
            name: name.name,
            r#type: ty,
            name_span: name.span,
            id: NodeId::UNASSIGNED,
        });

    let formals = formal
        .separated_by(just(',').padded_by(ws.clone()))
        .collect::<Vec<Formal>>()
        .delimited_by(
            just('(').padded_by(ws.clone()),
            just(')').padded_by(ws.clone()),
        );

    lexer::keyword(ws.clone(), "fn")
        .then(lexer::ident(ws.clone()))
        .then(formals)
        .then_ignore(just("->").padded_by(ws.clone()))
        .then(types::type_parser(ws.clone()))
        .then(statements::block(ws, stmt))
        .map(
            |((((fn_span, name), formals), return_type), (body, close))| FnDecl {
                name: name.name,
                name_span: name.span,
                formals,
                return_type,
                body,
                id: NodeId::UNASSIGNED,
                span: fn_span.to(close),
            },
        )
        .boxed()
}
