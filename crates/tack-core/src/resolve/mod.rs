//! Name resolution for Tack.
//!
//! Binds every identifier reference and declaration to a [`Symbol`] carrying its declared
//! type, and records each function signature in the [`FnTable`]. Type checking consumes the
//! resulting [`NameAnalysis`] and never runs when resolution failed.
//!
//! Top-level functions are declared before any body is visited, so functions may call each
//! other in any order. Global variables become visible at their declaration.

mod errors;
mod symbols;

use std::collections::HashMap;

use crate::ast::{Decl, Expr, FnDecl, Formal, Ident, NodeId, Program, Span, Stmt, Type, VarDecl};
use crate::typecheck::{FnSig, FnTable, TcType};

pub use errors::{NameError, NameErrorKind, ResolveResult};
pub use symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};

/// Output of a successful resolution.
#[derive(Debug, Clone)]
pub struct NameAnalysis {
    pub symbols: SymbolTable,
    pub functions: FnTable,
    /// Symbol bound to each node, indexed by [`NodeId`]
    pub bindings: Vec<Option<SymbolId>>,
}

impl NameAnalysis {
    pub fn binding(&self, node: NodeId) -> Option<SymbolId> {
        self.bindings.get(node.index()).copied().flatten()
    }

    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.binding(node).map(|id| self.symbols.get(id))
    }

    /// Declared type of the symbol bound to `node`.
    ///
    /// Panics if the node was never bound; a completed analysis binds every reference.
    pub fn declared_type(&self, node: NodeId) -> TcType {
        match self.symbol_of(node) {
            Some(symbol) => symbol.ty,
            None => panic!("node {node:?} has no resolved symbol"),
        }
    }
}

/// Resolve all names in `program`.
pub fn resolve(program: &Program) -> ResolveResult<NameAnalysis> {
    let mut resolver = Resolver::new(program.node_count as usize);

    // First pass: claim every global name, making functions visible everywhere
    let mut claimed: Vec<Option<SymbolId>> = Vec::with_capacity(program.decls.len());
    for decl in &program.decls {
        let symbol = match decl {
            Decl::Fn(func) => resolver.declare_function(func),
            Decl::Var(var) => resolver.declare_global(var),
        };
        claimed.push(symbol);
    }

    // Second pass: walk bodies, global variables appear in order
    for (decl, symbol) in program.decls.iter().zip(claimed) {
        match decl {
            Decl::Var(var) => {
                if let Some(symbol) = symbol {
                    resolver.global_scope().insert(var.name.clone(), symbol);
                }
            }
            Decl::Fn(func) => resolver.resolve_fn_body(func),
        }
    }

    resolver.finish()
}

struct Resolver {
    scopes: Vec<HashMap<String, SymbolId>>,
    /// Every global name with its declaring span, functions and variables alike
    globals: HashMap<String, Span>,
    symbols: SymbolTable,
    functions: FnTable,
    bindings: Vec<Option<SymbolId>>,
    errors: Vec<NameError>,
}

impl Resolver {
    fn new(node_count: usize) -> Self {
        Self {
            scopes: vec![HashMap::new()],
            globals: HashMap::new(),
            symbols: SymbolTable::new(),
            functions: FnTable::new(),
            bindings: vec![None; node_count],
            errors: Vec::new(),
        }
    }

    fn finish(self) -> ResolveResult<NameAnalysis> {
        if self.errors.is_empty() {
            Ok(NameAnalysis {
                symbols: self.symbols,
                functions: self.functions,
                bindings: self.bindings,
            })
        } else {
            Err(self.errors)
        }
    }

    fn global_scope(&mut self) -> &mut HashMap<String, SymbolId> {
        &mut self.scopes[0]
    }

    fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        match self.bindings.get_mut(node.index()) {
            Some(slot) => *slot = Some(symbol),
            None => panic!("node {node:?} outside the numbered tree; run assign_node_ids first"),
        }
    }

    fn error(&mut self, kind: NameErrorKind, name: &str, span: Span, previous: Option<Span>) {
        self.errors.push(NameError {
            kind,
            name: name.to_string(),
            span,
            previous,
        });
    }

    fn check_variable_type(&mut self, ty: &Type, name: &str) -> TcType {
        let tc = TcType::from(*ty);
        if !tc.is_valid_variable_type() {
            self.error(NameErrorKind::InvalidVariableType, name, ty.span(), None);
        }
        tc
    }

    /// Claim a global name. Returns `false` if it was already taken.
    fn claim_global(&mut self, name: &str, span: Span) -> bool {
        if let Some(first) = self.globals.get(name).copied() {
            self.error(
                NameErrorKind::MultiplyDeclaredIdentifier,
                name,
                span,
                Some(first),
            );
            false
        } else {
            self.globals.insert(name.to_string(), span);
            true
        }
    }

    fn declare_function(&mut self, func: &FnDecl) -> Option<SymbolId> {
        let params = func
            .formals
            .iter()
            .map(|formal| TcType::from(formal.r#type))
            .collect();
        let ty = self.functions.declare(FnSig {
            name: func.name.clone(),
            params,
            ret: TcType::from(func.return_type),
        });
        let symbol = self.symbols.add(Symbol {
            name: func.name.clone(),
            kind: SymbolKind::Function,
            ty,
            span: func.name_span,
        });
        self.bind(func.id, symbol);

        if self.claim_global(&func.name, func.name_span) {
            self.global_scope().insert(func.name.clone(), symbol);
            Some(symbol)
        } else {
            None
        }
    }

    fn declare_global(&mut self, var: &VarDecl) -> Option<SymbolId> {
        let ty = self.check_variable_type(&var.r#type, &var.name);
        let symbol = self.symbols.add(Symbol {
            name: var.name.clone(),
            kind: SymbolKind::Global,
            ty,
            span: var.name_span,
        });
        self.bind(var.id, symbol);

        self.claim_global(&var.name, var.name_span).then_some(symbol)
    }

    /// Declare a local or formal in the innermost scope.
    fn declare_local(
        &mut self,
        name: &str,
        ty: &Type,
        kind: SymbolKind,
        node: NodeId,
        span: Span,
    ) {
        let tc = self.check_variable_type(ty, name);
        let symbol = self.symbols.add(Symbol {
            name: name.to_string(),
            kind,
            ty: tc,
            span,
        });
        self.bind(node, symbol);

        let previous = self
            .scopes
            .last()
            .and_then(|scope| scope.get(name))
            .map(|id| self.symbols.get(*id).span);
        if let Some(previous) = previous {
            self.error(
                NameErrorKind::MultiplyDeclaredIdentifier,
                name,
                span,
                Some(previous),
            );
        } else if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), symbol);
        }
    }

    fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    fn resolve_fn_body(&mut self, func: &FnDecl) {
        self.scopes.push(HashMap::new());
        for Formal {
            name,
            r#type,
            name_span,
            id,
            ..
        } in &func.formals
        {
            self.declare_local(name, r#type, SymbolKind::Formal, *id, *name_span);
        }
        for stmt in &func.body {
            self.resolve_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn resolve_block(&mut self, stmts: &[Stmt]) {
        self.scopes.push(HashMap::new());
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(var) => self.declare_local(
                &var.name,
                &var.r#type,
                SymbolKind::Local,
                var.id,
                var.name_span,
            ),
            Stmt::Assign { assign, .. } => {
                self.resolve_ident(&assign.target);
                self.resolve_expr(&assign.value);
            }
            Stmt::PostInc { target, .. }
            | Stmt::PostDec { target, .. }
            | Stmt::Read { target, .. } => self.resolve_ident(target),
            Stmt::Write { value, .. } => self.resolve_expr(value),
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.resolve_expr(condition);
                self.resolve_block(then_block);
                if let Some(block) = else_block {
                    self.resolve_block(block);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.resolve_expr(condition);
                self.resolve_block(body);
            }
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            Stmt::Call { call, .. } => {
                self.resolve_ident(&call.callee);
                for arg in &call.arguments {
                    self.resolve_expr(arg);
                }
            }
        }
    }

    fn resolve_ident(&mut self, ident: &Ident) {
        match self.lookup(&ident.name) {
            Some(symbol) => self.bind(ident.id, symbol),
            None => self.error(
                NameErrorKind::UndeclaredIdentifier,
                &ident.name,
                ident.span,
                None,
            ),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int { .. } | Expr::Char { .. } | Expr::Boolean { .. } => {}
            Expr::Identifier(ident) => self.resolve_ident(ident),
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Assign(assign) => {
                self.resolve_ident(&assign.target);
                self.resolve_expr(&assign.value);
            }
            Expr::Call(call) => {
                self.resolve_ident(&call.callee);
                for arg in &call.arguments {
                    self.resolve_expr(arg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn parse_and_resolve(input: &str) -> (Program, ResolveResult<NameAnalysis>) {
        let program = parse(input, "test.tack").expect("Parse failed");
        let result = resolve(&program);
        (program, result)
    }

    fn error_kinds(input: &str) -> Vec<NameErrorKind> {
        let (_, result) = parse_and_resolve(input);
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_globals_and_functions_resolve() {
        let (_, result) = parse_and_resolve(
            "int counter;\nfn bump(int by) -> void { counter = counter + by; }",
        );
        let names = result.unwrap();
        assert_eq!(names.functions.len(), 1);
        assert_eq!(names.symbols.len(), 3);
    }

    #[test]
    fn test_functions_visible_before_declaration() {
        let (_, result) = parse_and_resolve(
            "fn a() -> int { return b(); }\nfn b() -> int { return a(); }",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_global_not_visible_before_declaration() {
        let kinds = error_kinds("fn f() -> void { x = 1; }\nint x;");
        assert_eq!(kinds, vec![NameErrorKind::UndeclaredIdentifier]);
    }

    #[test]
    fn test_undeclared_identifier() {
        let (_, result) = parse_and_resolve("fn f() -> void { write y; }");
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, NameErrorKind::UndeclaredIdentifier);
        assert_eq!(errors[0].name, "y");
        assert!(errors[0].message().contains("`y`"));
    }

    #[test]
    fn test_multiply_declared_global_points_to_first() {
        let source = "int x;\nbool x;";
        let (_, result) = parse_and_resolve(source);
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, NameErrorKind::MultiplyDeclaredIdentifier);
        assert_eq!(errors[0].location(source).line, 2);
        assert_eq!(errors[0].previous, Some(Span::new(4, 5)));
    }

    #[test]
    fn test_function_clashing_with_global() {
        let kinds = error_kinds("int f;\nfn f() -> void { }");
        assert_eq!(kinds, vec![NameErrorKind::MultiplyDeclaredIdentifier]);
    }

    #[test]
    fn test_local_clashing_with_formal() {
        let kinds = error_kinds("fn f(int a) -> void { bool a; }");
        assert_eq!(kinds, vec![NameErrorKind::MultiplyDeclaredIdentifier]);
    }

    #[test]
    fn test_local_may_shadow_global() {
        let (_, result) = parse_and_resolve("int a;\nfn f() -> void { bool a; a = true; }");
        assert!(result.is_ok());
    }

    #[test]
    fn test_block_scope_ends_with_block() {
        let kinds = error_kinds(
            "fn f() -> void { if (true) { int t; t = 1; } t = 2; }",
        );
        assert_eq!(kinds, vec![NameErrorKind::UndeclaredIdentifier]);
    }

    #[test]
    fn test_void_variable_and_formal() {
        let kinds = error_kinds("void v;\nfn f(void p) -> void { }");
        assert_eq!(
            kinds,
            vec![
                NameErrorKind::InvalidVariableType,
                NameErrorKind::InvalidVariableType
            ]
        );
    }

    #[test]
    fn test_reference_bound_to_declaration_type() {
        let (program, result) = parse_and_resolve("bool flag;\nfn f() -> void { write flag; }");
        let names = result.unwrap();
        let Decl::Fn(func) = &program.decls[1] else {
            panic!("expected function");
        };
        let Stmt::Write { value, .. } = &func.body[0] else {
            panic!("expected write");
        };
        assert_eq!(names.declared_type(value.id()), TcType::Bool);
        assert_eq!(names.symbol_of(value.id()).unwrap().kind, SymbolKind::Global);
    }

    #[test]
    fn test_function_signature_recorded() {
        let (program, result) = parse_and_resolve("fn g(int x, bool y) -> char { return 'a'; }");
        let names = result.unwrap();
        let ty = names.declared_type(program.decls[0].id());
        assert_eq!(names.functions.describe(ty), "fn(int, bool) -> char");
    }

    #[test]
    fn test_errors_accumulate() {
        let kinds = error_kinds("fn f() -> void { a = 1; b = 2; }");
        assert_eq!(kinds.len(), 2);
    }
}
