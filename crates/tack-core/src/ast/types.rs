//! Type annotations for the Tack AST

use serde::{Deserialize, Serialize};

use super::{NodeId, Span};

/// Type annotation in Tack
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Type {
    Int { span: Span },
    Char { span: Span },
    Bool { span: Span },
    Void { span: Span },
}

impl Type {
    pub fn span(&self) -> Span {
        match self {
            Type::Int { span } => *span,
            Type::Char { span } => *span,
            Type::Bool { span } => *span,
            Type::Void { span } => *span,
        }
    }

    /// Keyword spelling of this annotation
    pub fn keyword(&self) -> &'static str {
        match self {
            Type::Int { .. } => "int",
            Type::Char { .. } => "char",
            Type::Bool { .. } => "bool",
            Type::Void { .. } => "void",
        }
    }
}

/// Formal parameter of a function declaration: `int x`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Formal {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: Type,
    pub name_span: Span,
    pub id: NodeId,
    pub span: Span,
}
