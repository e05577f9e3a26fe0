//! Abstract Syntax Tree definitions for Tack
//!
//! This module defines the core AST nodes for expressions, statements, declarations and
//! programs. Type annotations, spans and node numbering live in separate submodules.
//!
//! Every node the type checker assigns a type to carries a [`NodeId`]. The parser leaves
//! them as [`NodeId::UNASSIGNED`]; [`assign_node_ids`] numbers them densely from zero so
//! later passes can keep side tables indexed by node.

use serde::{Deserialize, Serialize};

mod ids;
mod span;
mod types;

pub use ids::assign_node_ids;
pub use span::{Location, Span};
pub use types::{Formal, Type};

/// Stable handle of a typed AST node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const UNASSIGNED: NodeId = NodeId(u32::MAX);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An identifier reference: a use of a variable, formal or function name
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub id: NodeId,
    pub span: Span,
}

/// `target = value`, usable both as a statement and as an expression
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssignExpr {
    pub target: Ident,
    pub value: Box<Expr>,
    pub id: NodeId,
    pub span: Span,
}

/// `callee(arguments...)`, usable both as a statement and as an expression
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Ident,
    pub arguments: Vec<Expr>,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expr {
    Int {
        value: i32,
        id: NodeId,
        span: Span,
    },
    Char {
        value: char,
        id: NodeId,
        span: Span,
    },
    Boolean {
        value: bool,
        id: NodeId,
        span: Span,
    },
    Identifier(Ident),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        id: NodeId,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        id: NodeId,
        span: Span,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
        id: NodeId,
        span: Span,
    },
    Assign(AssignExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Int { span, .. } => *span,
            Expr::Char { span, .. } => *span,
            Expr::Boolean { span, .. } => *span,
            Expr::Identifier(ident) => ident.span,
            Expr::Unary { span, .. } => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Logical { span, .. } => *span,
            Expr::Assign(assign) => assign.span,
            Expr::Call(call) => call.span,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Expr::Int { id, .. } => *id,
            Expr::Char { id, .. } => *id,
            Expr::Boolean { id, .. } => *id,
            Expr::Identifier(ident) => ident.id,
            Expr::Unary { id, .. } => *id,
            Expr::Binary { id, .. } => *id,
            Expr::Logical { id, .. } => *id,
            Expr::Assign(assign) => assign.id,
            Expr::Call(call) => call.id,
        }
    }
}

/// Arithmetic, relational and equality operators
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg, // -x
    Not, // !x
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum LogicalOp {
    And, // &&
    Or,  // ||
}

/// `int x;` at global scope or inside a function body
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    #[serde(rename = "type")]
    pub r#type: Type,
    pub name: String,
    pub name_span: Span,
    pub id: NodeId,
    pub span: Span,
}

/// `fn name(formals) -> type { body }`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FnDecl {
    pub name: String,
    pub name_span: Span,
    pub formals: Vec<Formal>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

/// Top-level declaration
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
}

impl Decl {
    pub fn id(&self) -> NodeId {
        match self {
            Decl::Var(decl) => decl.id,
            Decl::Fn(decl) => decl.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Var(decl) => decl.span,
            Decl::Fn(decl) => decl.span,
        }
    }
}

/// Statement types
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign {
        assign: AssignExpr,
        id: NodeId,
        span: Span,
    },
    PostInc {
        target: Ident,
        id: NodeId,
        span: Span,
    },
    PostDec {
        target: Ident,
        id: NodeId,
        span: Span,
    },
    /// Console input: `read x;`
    Read {
        target: Ident,
        id: NodeId,
        span: Span,
    },
    /// Console output: `write expr;`
    Write {
        value: Expr,
        id: NodeId,
        span: Span,
    },
    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
        id: NodeId,
        span: Span,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        id: NodeId,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        id: NodeId,
        span: Span,
    },
    Call {
        call: CallExpr,
        id: NodeId,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl(decl) => decl.span,
            Stmt::Assign { span, .. } => *span,
            Stmt::PostInc { span, .. } => *span,
            Stmt::PostDec { span, .. } => *span,
            Stmt::Read { span, .. } => *span,
            Stmt::Write { span, .. } => *span,
            Stmt::If { span, .. } => *span,
            Stmt::While { span, .. } => *span,
            Stmt::Return { span, .. } => *span,
            Stmt::Call { span, .. } => *span,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Stmt::VarDecl(decl) => decl.id,
            Stmt::Assign { id, .. } => *id,
            Stmt::PostInc { id, .. } => *id,
            Stmt::PostDec { id, .. } => *id,
            Stmt::Read { id, .. } => *id,
            Stmt::Write { id, .. } => *id,
            Stmt::If { id, .. } => *id,
            Stmt::While { id, .. } => *id,
            Stmt::Return { id, .. } => *id,
            Stmt::Call { id, .. } => *id,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub id: NodeId,
    /// Number of node ids issued by [`assign_node_ids`]
    pub node_count: u32,
    /// Span of each numbered node, indexed by [`NodeId`]
    #[serde(skip)]
    pub node_spans: Vec<Span>,
}

impl Program {
    pub fn node_span(&self, id: NodeId) -> Option<Span> {
        self.node_spans.get(id.index()).copied()
    }

    /// Pretty RON rendering of the tree, for debugging
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
