//! Debug subcommands: `ast` and `types`

use crate::utils::read_source_or_exit;
use std::process;
use tack_core::ast::{Program, Span};
use tack_core::diagnostics::LineIndex;
use tack_core::pipeline::{Pipeline, PipelineError};
use tack_core::resolve::NameAnalysis;
use tack_core::typecheck::TypeTable;

fn fail(error: PipelineError, source: &str) -> ! {
    eprintln!("{}", error.format_with_source(source));
    process::exit(1);
}

/// Print the parsed AST for debugging
pub fn handle_ast(file: &str) {
    let source = read_source_or_exit(file);
    let pipeline = Pipeline::new(source, file.to_string());

    let ast = pipeline
        .parse()
        .unwrap_or_else(|e| fail(e, pipeline.source()));

    match ast.to_ron() {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("Error serializing AST: {err}");
            process::exit(1);
        }
    }
}

/// Print the type of every node for debugging, followed by any type errors
pub fn handle_types(file: &str) {
    let source = read_source_or_exit(file);
    let pipeline = Pipeline::new(source, file.to_string());

    let ast = pipeline
        .parse()
        .unwrap_or_else(|e| fail(e, pipeline.source()));
    let names = pipeline
        .resolve(&ast)
        .unwrap_or_else(|e| fail(e, pipeline.source()));

    let analysis = pipeline.analyze(&ast, &names);
    for line in render_types(&ast, &names, &analysis.types, pipeline.source()) {
        println!("{line}");
    }

    if analysis.failed() {
        fail(
            PipelineError::Typecheck {
                filename: file.to_string(),
                errors: analysis.errors,
            },
            pipeline.source(),
        );
    }
}

/// One `line:col  #id  type  text` line per typed node, in node order
pub fn render_types(
    program: &Program,
    names: &NameAnalysis,
    types: &TypeTable,
    source: &str,
) -> Vec<String> {
    let index = LineIndex::new(source);
    types
        .iter()
        .map(|(id, ty)| {
            let span = program.node_span(id).unwrap_or(Span::new(0, 0));
            let (line, col) = index.line_col(span.start);
            let text = span.text(source);
            let first_line = text.lines().next().unwrap_or("");
            format!(
                "{line}:{col}\t#{}\t{}\t{first_line}",
                id.0,
                names.functions.describe(ty)
            )
        })
        .collect()
}
