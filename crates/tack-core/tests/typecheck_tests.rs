//! End-to-end properties of the type checker.
//!
//! This module tests that the type checker:
//! 1. Types literals without diagnostics
//! 2. Reports each root cause once and never cascades
//! 3. Locates every diagnostic at the offending node
//! 4. Is deterministic across repeated runs

use tack_core::ast::{Decl, Program, Stmt};
use tack_core::pipeline::{Pipeline, PipelineError};
use tack_core::resolve::{self, NameAnalysis};
use tack_core::typecheck::{self, TcType, TypeAnalysis, TypeErrorKind};

fn front_end(source: &str) -> (Program, NameAnalysis) {
    let ast = tack_core::parser::parse(source, "test.tack").expect("Should parse successfully");
    let names = resolve::resolve(&ast).expect("Should resolve successfully");
    (ast, names)
}

fn analyze(source: &str) -> (Program, TypeAnalysis) {
    let (ast, names) = front_end(source);
    let analysis = typecheck::analyze(&ast, &names);
    (ast, analysis)
}

/// Every diagnostic as (kind, offending source text)
fn diagnostics(source: &str) -> Vec<(TypeErrorKind, String)> {
    let (_, analysis) = analyze(source);
    analysis
        .errors
        .iter()
        .map(|e| (e.kind, e.span.text(source).to_string()))
        .collect()
}

/// Statements of the last function declared in `program`
fn last_body(program: &Program) -> &[Stmt] {
    program
        .decls
        .iter()
        .rev()
        .find_map(|decl| match decl {
            Decl::Fn(func) => Some(func.body.as_slice()),
            Decl::Var(_) => None,
        })
        .expect("Expected a function declaration")
}

#[test]
fn test_literals_type_without_diagnostics() {
    let source = "fn main() -> void { write 0; write 2147483647; write 'z'; write '\\t'; write true; write false; }";
    let (program, analysis) = analyze(source);

    assert!(analysis.passed());
    let types: Vec<TcType> = last_body(&program)
        .iter()
        .map(|stmt| match stmt {
            Stmt::Write { value, .. } => analysis.types.get(value.id()).expect("typed literal"),
            _ => panic!("Expected write"),
        })
        .collect();
    assert_eq!(
        types,
        [
            TcType::Int,
            TcType::Int,
            TcType::Char,
            TcType::Char,
            TcType::Bool,
            TcType::Bool
        ]
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let source = "int a;\nbool b;\nfn f() -> void { }\nfn main() -> void { a = b; b = f == f; write f; }";
    let (ast, names) = front_end(source);

    let first = typecheck::analyze(&ast, &names);
    let second = typecheck::analyze(&ast, &names);

    assert_eq!(first.types, second.types);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.errors.len(), 4);
}

#[test]
fn test_ill_typed_operand_does_not_cascade() {
    let source = "bool bad;\nfn main() -> void { write 1 + (bad + 2); }";
    assert_eq!(
        diagnostics(source),
        [(TypeErrorKind::BadArithmeticOperator, "bad".to_string())]
    );
}

#[test]
fn test_undeclared_operand_stops_before_typing() {
    let pipeline = Pipeline::new(
        "fn main() -> void { write 1 + (badVar + 2); }".to_string(),
        "test.tack".to_string(),
    );
    let Err(PipelineError::Name { errors, .. }) = pipeline.check_all() else {
        panic!("Expected name resolution to fail");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "badVar");
}

#[test]
fn test_assignment_mismatch_reported_at_source() {
    let source = "int a;\nbool b;\nfn main() -> void { a = b; }";
    let (program, analysis) = analyze(source);

    let errors: Vec<_> = analysis
        .errors
        .iter()
        .map(|e| (e.kind, e.span.text(source)))
        .collect();
    assert_eq!(errors, [(TypeErrorKind::BadAssignmentOperator, "b")]);

    let stmt = &last_body(&program)[0];
    assert_eq!(analysis.types.get(stmt.id()), Some(TcType::Error));
}

#[test]
fn test_function_value_assignment_rejected() {
    let source = "fn f() -> void {}\nfn main() -> void { f = f; }";
    let (program, analysis) = analyze(source);

    let kinds: Vec<_> = analysis.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            TypeErrorKind::BadAssignmentOperand,
            TypeErrorKind::BadAssignmentOperand
        ]
    );
    assert_ne!(analysis.errors[0].span, analysis.errors[1].span);

    let stmt = &last_body(&program)[0];
    assert_eq!(analysis.types.get(stmt.id()), Some(TcType::Error));
}

#[test]
fn test_return_type_enforcement() {
    assert_eq!(
        diagnostics("fn f() -> int { return; }"),
        [(TypeErrorKind::BadReturnValue, "return;".to_string())]
    );
    assert_eq!(
        diagnostics("fn f() -> int { return true; }"),
        [(TypeErrorKind::BadReturnValue, "true".to_string())]
    );
    assert!(diagnostics("fn f() -> int { return 5; }").is_empty());
}

#[test]
fn test_call_arity_and_argument_types() {
    let decl = "fn g(int x, bool y) -> void { }\n";

    assert_eq!(
        diagnostics(&format!("{decl}fn main() -> void {{ g(1, 2); }}")),
        [(TypeErrorKind::BadCallee, "2".to_string())]
    );
    assert_eq!(
        diagnostics(&format!("{decl}fn main() -> void {{ g(1, true, 3); }}")),
        [(TypeErrorKind::BadCallee, "g".to_string())]
    );
    assert!(diagnostics(&format!("{decl}fn main() -> void {{ g(1, true); }}")).is_empty());
}

#[test]
fn test_equality_operands() {
    assert_eq!(
        diagnostics("fn main() -> void { write 1 == true; }"),
        [(TypeErrorKind::BadEqualityOperator, "true".to_string())]
    );

    let function_self = diagnostics("fn f() -> void {}\nfn main() -> void { write f == f; }");
    assert!(!function_self.is_empty());
    assert!(
        function_self
            .iter()
            .all(|(kind, text)| *kind == TypeErrorKind::BadEqualityOperand && text == "f")
    );
}

#[test]
fn test_function_types_compare_by_declaration() {
    // Same signature, different declarations
    let source = "fn f(int a) -> int { return a; }\nfn g(int a) -> int { return a; }\n\
                  fn main() -> void { f = g; }";
    let kinds: Vec<_> = diagnostics(source).into_iter().map(|(kind, _)| kind).collect();
    assert_eq!(
        kinds,
        [
            TypeErrorKind::BadAssignmentOperand,
            TypeErrorKind::BadAssignmentOperand
        ]
    );
}

#[test]
fn test_every_node_is_typed_even_on_failure() {
    let source = "int a;\nfn main() -> void { if (a) { a = true; } else { write main; } while (a + 'c') { } }";
    let (program, analysis) = analyze(source);

    assert!(analysis.failed());
    assert_eq!(
        analysis.types.iter().count(),
        program.node_count as usize
    );
}

#[test]
fn test_diagnostics_render_with_codes() {
    let pipeline = Pipeline::new(
        "char c;\nfn main() -> void {\n    read c;\n    write c < 1;\n}".to_string(),
        "test.tack".to_string(),
    );
    let error = pipeline.check_all().unwrap_err();
    let rendered = error.format_with_source(pipeline.source());

    assert!(rendered.contains("error[T0004]"), "{rendered}");
    assert!(rendered.contains("test.tack:4:11"), "{rendered}");
}
