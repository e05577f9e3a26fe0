use crate::ast::{Decl, NodeId, Program, assign_node_ids};
use crate::diagnostics::Diagnostic;
use chumsky::prelude::*;

mod declarations;
mod errors;
mod expressions;
mod lexer;
mod literals;
mod operators;
pub mod recovery;
mod statements;
mod types;

pub use lexer::KEYWORDS;

pub fn parser<'a>() -> impl Parser<'a, &'a str, Program, extra::Err<Rich<'a, char>>> {
    // Comments and whitespace
    let ws = lexer::ws();

    let expr = expressions::expression(ws.clone());
    let stmt = statements::statement(ws.clone(), expr);

    let decl = choice((
        declarations::fn_decl(ws.clone(), stmt).map(Decl::Fn),
        declarations::var_decl(ws.clone()).map(Decl::Var),
    ))
    .boxed();

    // Skip to the next declaration boundary when a declaration fails and continue
    let decl_with_recovery = decl
        .recover_with(via_parser(recovery::declaration_recovery()))
        .then_ignore(ws.clone())
        .boxed();

    ws.clone()
        .ignore_then(decl_with_recovery.repeated().collect::<Vec<Decl>>())
        .then_ignore(end())
        .map(|decls| Program {
            decls,
            id: NodeId::UNASSIGNED,
            node_count: 0,
            node_spans: Vec::new(),
        })
}

/// Parse `source` and number its nodes.
pub fn parse(source: &str, filename: &str) -> Result<Program, Vec<Diagnostic>> {
    let (output, errs) = parser().parse(source).into_output_errors();

    match output {
        Some(mut program) if errs.is_empty() => {
            assign_node_ids(&mut program);
            Ok(program)
        }
        // Errors occurred - return all accumulated errors
        _ => Err(errors::errors_to_diagnostics(errs, filename, source)),
    }
}
