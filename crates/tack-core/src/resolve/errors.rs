//! Name resolution errors.

use serde::Serialize;

use crate::ast::{Location, Span};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, RelatedInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameErrorKind {
    UndeclaredIdentifier,
    MultiplyDeclaredIdentifier,
    InvalidVariableType,
}

impl NameErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            NameErrorKind::UndeclaredIdentifier => "undeclared-identifier",
            NameErrorKind::MultiplyDeclaredIdentifier => "multiply-declared-identifier",
            NameErrorKind::InvalidVariableType => "invalid-variable-type",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            NameErrorKind::UndeclaredIdentifier => "N0001",
            NameErrorKind::MultiplyDeclaredIdentifier => "N0002",
            NameErrorKind::InvalidVariableType => "N0003",
        }
    }
}

impl std::fmt::Display for NameErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameError {
    pub kind: NameErrorKind,
    /// The identifier involved
    pub name: String,
    pub span: Span,
    /// First declaration, for multiply declared identifiers
    pub previous: Option<Span>,
}

impl NameError {
    pub fn message(&self) -> String {
        match self.kind {
            NameErrorKind::UndeclaredIdentifier => {
                format!("undeclared identifier `{}`", self.name)
            }
            NameErrorKind::MultiplyDeclaredIdentifier => {
                format!("multiply declared identifier `{}`", self.name)
            }
            NameErrorKind::InvalidVariableType => {
                format!("invalid type in declaration of `{}`", self.name)
            }
        }
    }

    pub fn location(&self, source: &str) -> Location {
        self.span.location(source)
    }

    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        let mut diag = Diagnostic::error(
            DiagnosticKind::Name,
            self.message(),
            self.span,
            filename.to_string(),
        )
        .with_code(DiagnosticCode::new(self.kind.code(), self.kind.name()));

        if let Some(previous) = self.previous {
            diag = diag.with_related(RelatedInfo::new(
                "first declared here",
                previous,
                filename,
            ));
        }
        if self.kind == NameErrorKind::InvalidVariableType {
            diag = diag.with_help("variables and formals must be int, char or bool".to_string());
        }
        diag
    }
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message(),
            self.span.start,
            self.span.end
        )
    }
}

pub type ResolveResult<T> = Result<T, Vec<NameError>>;
