//! Type checking error types and result types.

use serde::Serialize;

use crate::ast::{Location, Span};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind};

/// Every distinct type diagnostic the checker can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeErrorKind {
    BadArithmeticOperand,
    BadArithmeticOperator,
    BadLogicOperand,
    BadRelationalOperand,
    BadEqualityOperand,
    BadEqualityOperator,
    BadAssignmentOperand,
    BadAssignmentOperator,
    BadCallee,
    BadReturnValue,
    BadIfCondition,
    BadWhileCondition,
    BadConsoleWrite,
    BadWriteOfVoid,
    BadConsoleRead,
}

impl TypeErrorKind {
    pub const ALL: [TypeErrorKind; 15] = [
        TypeErrorKind::BadArithmeticOperand,
        TypeErrorKind::BadArithmeticOperator,
        TypeErrorKind::BadLogicOperand,
        TypeErrorKind::BadRelationalOperand,
        TypeErrorKind::BadEqualityOperand,
        TypeErrorKind::BadEqualityOperator,
        TypeErrorKind::BadAssignmentOperand,
        TypeErrorKind::BadAssignmentOperator,
        TypeErrorKind::BadCallee,
        TypeErrorKind::BadReturnValue,
        TypeErrorKind::BadIfCondition,
        TypeErrorKind::BadWhileCondition,
        TypeErrorKind::BadConsoleWrite,
        TypeErrorKind::BadWriteOfVoid,
        TypeErrorKind::BadConsoleRead,
    ];

    /// Stable kebab-case name, as used in fixtures and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            TypeErrorKind::BadArithmeticOperand => "bad-arithmetic-operand",
            TypeErrorKind::BadArithmeticOperator => "bad-arithmetic-operator",
            TypeErrorKind::BadLogicOperand => "bad-logic-operand",
            TypeErrorKind::BadRelationalOperand => "bad-relational-operand",
            TypeErrorKind::BadEqualityOperand => "bad-equality-operand",
            TypeErrorKind::BadEqualityOperator => "bad-equality-operator",
            TypeErrorKind::BadAssignmentOperand => "bad-assignment-operand",
            TypeErrorKind::BadAssignmentOperator => "bad-assignment-operator",
            TypeErrorKind::BadCallee => "bad-callee",
            TypeErrorKind::BadReturnValue => "bad-return-value",
            TypeErrorKind::BadIfCondition => "bad-if-condition",
            TypeErrorKind::BadWhileCondition => "bad-while-condition",
            TypeErrorKind::BadConsoleWrite => "bad-console-write",
            TypeErrorKind::BadWriteOfVoid => "bad-write-of-void",
            TypeErrorKind::BadConsoleRead => "bad-console-read",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TypeErrorKind::BadArithmeticOperand => "T0001",
            TypeErrorKind::BadArithmeticOperator => "T0002",
            TypeErrorKind::BadLogicOperand => "T0003",
            TypeErrorKind::BadRelationalOperand => "T0004",
            TypeErrorKind::BadEqualityOperand => "T0005",
            TypeErrorKind::BadEqualityOperator => "T0006",
            TypeErrorKind::BadAssignmentOperand => "T0007",
            TypeErrorKind::BadAssignmentOperator => "T0008",
            TypeErrorKind::BadCallee => "T0009",
            TypeErrorKind::BadReturnValue => "T0010",
            TypeErrorKind::BadIfCondition => "T0011",
            TypeErrorKind::BadWhileCondition => "T0012",
            TypeErrorKind::BadConsoleWrite => "T0013",
            TypeErrorKind::BadWriteOfVoid => "T0014",
            TypeErrorKind::BadConsoleRead => "T0015",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TypeErrorKind::BadArithmeticOperand => "arithmetic operator applied to non-numeric operand",
            TypeErrorKind::BadArithmeticOperator => "arithmetic operator applied to invalid operand",
            TypeErrorKind::BadLogicOperand => "logical operator applied to non-bool operand",
            TypeErrorKind::BadRelationalOperand => "relational operator applied to non-numeric operand",
            TypeErrorKind::BadEqualityOperand => "invalid equality operand",
            TypeErrorKind::BadEqualityOperator => "invalid equality operation",
            TypeErrorKind::BadAssignmentOperand => "invalid assignment operand",
            TypeErrorKind::BadAssignmentOperator => "invalid assignment operation",
            TypeErrorKind::BadCallee => "invalid call",
            TypeErrorKind::BadReturnValue => "bad return value",
            TypeErrorKind::BadIfCondition => "non-bool expression used as an if condition",
            TypeErrorKind::BadWhileCondition => "non-bool expression used as a loop condition",
            TypeErrorKind::BadConsoleWrite => "attempt to write a function",
            TypeErrorKind::BadWriteOfVoid => "attempt to write void",
            TypeErrorKind::BadConsoleRead => "attempt to assign user input to a function",
        }
    }
}

impl std::fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A type error: what went wrong and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

impl TypeError {
    pub fn new(kind: TypeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// 1-based line and column of the offending node.
    pub fn location(&self, source: &str) -> Location {
        self.span.location(source)
    }

    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        Diagnostic::error(
            DiagnosticKind::Type,
            self.kind.message().to_string(),
            self.span,
            filename.to_string(),
        )
        .with_code(DiagnosticCode::new(self.kind.code(), self.kind.name()))
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] at {}..{}",
            self.kind.message(),
            self.kind.name(),
            self.span.start,
            self.span.end
        )
    }
}

/// Result type for type checking operations.
pub type TypecheckResult<T> = Result<T, Vec<TypeError>>;
