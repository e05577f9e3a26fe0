//! Static type checker for Tack.
//!
//! Assigns a [`TcType`] to every typed node of a resolved program and reports every
//! violation of the typing rules as a [`TypeError`].
//!
//! ## Type System Features
//!
//! - **Basic types**: `int`, `char`, `bool` and `void`, compared by kind
//! - **Function types**: one per declaration, compared by identity through the [`FnTable`]
//! - **Error absorption**: a node that failed to type is `Error`, and anything built from
//!   it is `Error` too without a second diagnostic
//!
//! ## Type Checking Process
//!
//! 1. **Name resolution** (see [`crate::resolve`]) binds every identifier and records
//!    function signatures; checking needs its [`NameAnalysis`]
//! 2. **Walk**: every top-level declaration is checked in order; function bodies are checked
//!    against an explicit [`FnContext`] holding the declared return type
//! 3. **Error collection**: diagnostics accumulate, checking never stops early
//!
//! The pass is deterministic: running it twice over the same tree yields the same table
//! and the same diagnostics in the same order.

mod environment;
mod errors;
mod expressions;
mod statements;
mod types;

use crate::ast::Program;
use crate::resolve::NameAnalysis;

pub use environment::{TypeEnv, TypeTable};
pub use errors::{TypeError, TypeErrorKind, TypecheckResult};
pub use statements::FnContext;
pub use types::{FnId, FnSig, FnTable, TcType};

/// Outcome of a full checking pass.
#[derive(Debug, Clone)]
pub struct TypeAnalysis {
    pub types: TypeTable,
    /// Diagnostics in emission order
    pub errors: Vec<TypeError>,
}

impl TypeAnalysis {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn failed(&self) -> bool {
        !self.passed()
    }

    pub fn into_result(self) -> TypecheckResult<TypeTable> {
        if self.errors.is_empty() {
            Ok(self.types)
        } else {
            Err(self.errors)
        }
    }
}

/// Type check a resolved program, keeping the type table even when checking failed.
pub fn analyze(program: &Program, names: &NameAnalysis) -> TypeAnalysis {
    let mut env = TypeEnv::new(names, program.node_count as usize);

    for decl in &program.decls {
        env.check_decl(decl);
    }
    env.record(program.id, TcType::Void);

    debug_assert_eq!(env.failed, !env.errors.is_empty());
    TypeAnalysis {
        types: env.table,
        errors: env.errors,
    }
}

/// Type check a program and return any errors found.
pub fn typecheck_program(program: &Program, names: &NameAnalysis) -> TypecheckResult<TypeTable> {
    analyze(program, names).into_result()
}
