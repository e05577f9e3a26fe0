//! Unified pipeline for checking Tack programs
//!
//! This module provides a `Pipeline` abstraction that encapsulates the complete
//! front-end workflow: parsing, name resolution and type checking. Stages run in
//! order and a failing stage stops the pipeline.
//!
//! ## Usage
//!
//! ```no_run
//! # use tack_core::pipeline::Pipeline;
//! let pipeline = Pipeline::new("int x;".to_string(), "example.tack".to_string());
//!
//! match pipeline.check_all() {
//!     Ok(_) => println!("ok"),
//!     Err(e) => eprintln!("{}", e.format_with_source(pipeline.source())),
//! }
//! ```
//!
//! ## Individual Stages
//!
//! ```no_run
//! # use tack_core::pipeline::Pipeline;
//! let pipeline = Pipeline::new("int x;".to_string(), "example.tack".to_string());
//!
//! let ast = pipeline.parse()?;
//! let names = pipeline.resolve(&ast)?;
//! let types = pipeline.typecheck(&ast, &names)?;
//! # Ok::<(), tack_core::pipeline::PipelineError>(())
//! ```

use crate::ast::Program;
use crate::diagnostics::Diagnostic;
use crate::resolve::{self, NameAnalysis, NameError};
use crate::typecheck::{self, TypeAnalysis, TypeError, TypeTable};
use std::fmt;

/// Errors that can occur during pipeline execution
#[derive(Debug)]
pub enum PipelineError {
    /// Parse error(s)
    Parse(Vec<Diagnostic>),
    /// Name resolution error(s)
    Name {
        filename: String,
        errors: Vec<NameError>,
    },
    /// Type checking error(s)
    Typecheck {
        filename: String,
        errors: Vec<TypeError>,
    },
}

impl PipelineError {
    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Parse(_) => "parse",
            PipelineError::Name { .. } => "name",
            PipelineError::Typecheck { .. } => "type",
        }
    }

    /// All errors as renderable diagnostics, in emission order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            PipelineError::Parse(diagnostics) => diagnostics.clone(),
            PipelineError::Name { filename, errors } => {
                errors.iter().map(|e| e.to_diagnostic(filename)).collect()
            }
            PipelineError::Typecheck { filename, errors } => {
                errors.iter().map(|e| e.to_diagnostic(filename)).collect()
            }
        }
    }

    /// Format error for display to user
    pub fn format_display(&self) -> String {
        self.diagnostics()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format error with source code context
    pub fn format_with_source(&self, source: &str) -> String {
        self.diagnostics()
            .iter()
            .map(|d| d.format(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_display())
    }
}

impl std::error::Error for PipelineError {}

impl From<Vec<Diagnostic>> for PipelineError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        PipelineError::Parse(diagnostics)
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Everything the front end knows about a program that passed every stage
#[derive(Debug, Clone)]
pub struct Checked {
    pub program: Program,
    pub names: NameAnalysis,
    pub types: TypeTable,
}

/// Unified pipeline for parsing, resolving and type-checking Tack code
pub struct Pipeline {
    /// Source code to check
    source: String,
    /// Filename for error reporting
    filename: String,
}

impl Pipeline {
    /// Create a new pipeline with source code and filename
    pub fn new(source: String, filename: String) -> Self {
        Pipeline { source, filename }
    }

    /// Parse the source code into an AST
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Parse` if parsing fails
    pub fn parse(&self) -> PipelineResult<Program> {
        crate::parser::parse(&self.source, &self.filename).map_err(PipelineError::Parse)
    }

    /// Bind every identifier of the AST to its declaration
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Name` if any name is undeclared, declared twice or
    /// declared with an invalid type
    pub fn resolve(&self, ast: &Program) -> PipelineResult<NameAnalysis> {
        resolve::resolve(ast).map_err(|errors| PipelineError::Name {
            filename: self.filename.clone(),
            errors,
        })
    }

    /// Type-check the AST
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Typecheck` if type checking fails
    pub fn typecheck(&self, ast: &Program, names: &NameAnalysis) -> PipelineResult<TypeTable> {
        typecheck::typecheck_program(ast, names).map_err(|errors| PipelineError::Typecheck {
            filename: self.filename.clone(),
            errors,
        })
    }

    /// Type-check the AST, keeping the type table even when checking fails
    pub fn analyze(&self, ast: &Program, names: &NameAnalysis) -> TypeAnalysis {
        typecheck::analyze(ast, names)
    }

    /// Execute the complete pipeline: parse → resolve → typecheck
    ///
    /// # Errors
    ///
    /// Returns error at the first stage that fails
    pub fn check_all(&self) -> PipelineResult<Checked> {
        let program = self.parse()?;
        let names = self.resolve(&program)?;
        let types = self.typecheck(&program, &names)?;
        Ok(Checked {
            program,
            names,
            types,
        })
    }

    /// Get the source code
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the filename
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
