//! Type representation for the type checker.

use serde::Serialize;

/// Index of a function declaration in the [`FnTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FnId(pub u32);

/// Internal type representation for type checking.
///
/// Basic types and `Error` compare by kind. `Function` compares by the declaration it
/// belongs to, so two functions with the same signature are still different types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TcType {
    Void,
    Int,
    Char,
    Bool,
    Function(FnId),
    /// Already diagnosed; anything built from it is `Error` too, silently.
    Error,
}

impl TcType {
    pub fn is_int(&self) -> bool {
        matches!(self, TcType::Int)
    }

    pub fn is_char(&self) -> bool {
        matches!(self, TcType::Char)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, TcType::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TcType::Void)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TcType::Error)
    }

    pub fn as_function(&self) -> Option<FnId> {
        match self {
            TcType::Function(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether a variable or formal may be declared with this type.
    pub fn is_valid_variable_type(&self) -> bool {
        matches!(self, TcType::Int | TcType::Char | TcType::Bool)
    }

    /// Whether values of this type can be compared with `==` / `!=`.
    pub fn is_comparable(&self) -> bool {
        matches!(self, TcType::Int | TcType::Char | TcType::Bool)
    }
}

impl From<crate::ast::Type> for TcType {
    fn from(ty: crate::ast::Type) -> Self {
        use crate::ast::Type;
        match ty {
            Type::Int { .. } => TcType::Int,
            Type::Char { .. } => TcType::Char,
            Type::Bool { .. } => TcType::Bool,
            Type::Void { .. } => TcType::Void,
        }
    }
}

impl std::fmt::Display for TcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcType::Void => write!(f, "void"),
            TcType::Int => write!(f, "int"),
            TcType::Char => write!(f, "char"),
            TcType::Bool => write!(f, "bool"),
            TcType::Function(FnId(n)) => write!(f, "fn#{n}"),
            TcType::Error => write!(f, "<error>"),
        }
    }
}

/// Signature of one function declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnSig {
    pub name: String,
    /// Formal parameter types in declaration order
    pub params: Vec<TcType>,
    pub ret: TcType,
}

/// Declaration table giving each function type its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FnTable {
    sigs: Vec<FnSig>,
}

impl FnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function declaration and return its type.
    pub fn declare(&mut self, sig: FnSig) -> TcType {
        let id = FnId(self.sigs.len() as u32);
        self.sigs.push(sig);
        TcType::Function(id)
    }

    pub fn sig(&self, id: FnId) -> &FnSig {
        match self.sigs.get(id.0 as usize) {
            Some(sig) => sig,
            None => panic!("function type {id:?} was never declared"),
        }
    }

    pub fn len(&self) -> usize {
        self.sigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigs.is_empty()
    }

    /// Render a type with function signatures spelled out.
    pub fn describe(&self, ty: TcType) -> String {
        match ty {
            TcType::Function(id) => {
                let sig = self.sig(id);
                let params = sig
                    .params
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({params}) -> {}", sig.ret)
            }
            other => other.to_string(),
        }
    }
}
