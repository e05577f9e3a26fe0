pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod pipeline;
pub mod resolve;
pub mod typecheck;

// Re-export commonly used types for convenience
pub use ast::{Expr, NodeId, Program, Span, Stmt};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use pipeline::{Pipeline, PipelineError, PipelineResult};
pub use resolve::{NameAnalysis, NameError, NameErrorKind};
pub use typecheck::{TcType, TypeAnalysis, TypeError, TypeErrorKind, TypeTable};
