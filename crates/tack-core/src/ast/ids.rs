//! Dense numbering of typed AST nodes

use super::{
    AssignExpr, CallExpr, Decl, Expr, FnDecl, Ident, NodeId, Program, Span, Stmt, VarDecl,
};

struct IdAllocator {
    spans: Vec<Span>,
}

impl IdAllocator {
    fn fresh(&mut self, span: Span) -> NodeId {
        let id = NodeId(self.spans.len() as u32);
        self.spans.push(span);
        id
    }
}

/// Give every typed node of `program` a unique id, in source order.
///
/// Children are numbered after their parent. Running the pass again renumbers the tree
/// identically. The span of every numbered node is kept in [`Program::node_spans`].
pub fn assign_node_ids(program: &mut Program) {
    let mut ids = IdAllocator { spans: Vec::new() };
    let whole = match (program.decls.first(), program.decls.last()) {
        (Some(first), Some(last)) => first.span().to(last.span()),
        _ => Span::new(0, 0),
    };
    program.id = ids.fresh(whole);
    for decl in &mut program.decls {
        match decl {
            Decl::Var(var) => number_var_decl(&mut ids, var),
            Decl::Fn(func) => number_fn_decl(&mut ids, func),
        }
    }
    program.node_count = ids.spans.len() as u32;
    program.node_spans = ids.spans;
}

fn number_var_decl(ids: &mut IdAllocator, decl: &mut VarDecl) {
    decl.id = ids.fresh(decl.span);
}

fn number_fn_decl(ids: &mut IdAllocator, decl: &mut FnDecl) {
    decl.id = ids.fresh(decl.span);
    for formal in &mut decl.formals {
        formal.id = ids.fresh(formal.span);
    }
    number_block(ids, &mut decl.body);
}

fn number_block(ids: &mut IdAllocator, stmts: &mut [Stmt]) {
    for stmt in stmts {
        number_stmt(ids, stmt);
    }
}

fn number_stmt(ids: &mut IdAllocator, stmt: &mut Stmt) {
    match stmt {
        Stmt::VarDecl(decl) => number_var_decl(ids, decl),
        Stmt::Assign { assign, id, span } => {
            *id = ids.fresh(*span);
            number_assign(ids, assign);
        }
        Stmt::PostInc { target, id, span }
        | Stmt::PostDec { target, id, span }
        | Stmt::Read { target, id, span } => {
            *id = ids.fresh(*span);
            number_ident(ids, target);
        }
        Stmt::Write { value, id, span } => {
            *id = ids.fresh(*span);
            number_expr(ids, value);
        }
        Stmt::If {
            condition,
            then_block,
            else_block,
            id,
            span,
        } => {
            *id = ids.fresh(*span);
            number_expr(ids, condition);
            number_block(ids, then_block);
            if let Some(block) = else_block {
                number_block(ids, block);
            }
        }
        Stmt::While {
            condition,
            body,
            id,
            span,
        } => {
            *id = ids.fresh(*span);
            number_expr(ids, condition);
            number_block(ids, body);
        }
        Stmt::Return { value, id, span } => {
            *id = ids.fresh(*span);
            if let Some(value) = value {
                number_expr(ids, value);
            }
        }
        Stmt::Call { call, id, span } => {
            *id = ids.fresh(*span);
            number_call(ids, call);
        }
    }
}

fn number_ident(ids: &mut IdAllocator, ident: &mut Ident) {
    ident.id = ids.fresh(ident.span);
}

fn number_assign(ids: &mut IdAllocator, assign: &mut AssignExpr) {
    assign.id = ids.fresh(assign.span);
    number_ident(ids, &mut assign.target);
    number_expr(ids, &mut assign.value);
}

fn number_call(ids: &mut IdAllocator, call: &mut CallExpr) {
    call.id = ids.fresh(call.span);
    number_ident(ids, &mut call.callee);
    for arg in &mut call.arguments {
        number_expr(ids, arg);
    }
}

fn number_expr(ids: &mut IdAllocator, expr: &mut Expr) {
    match expr {
        Expr::Int { id, span, .. }
        | Expr::Char { id, span, .. }
        | Expr::Boolean { id, span, .. } => {
            *id = ids.fresh(*span);
        }
        Expr::Identifier(ident) => number_ident(ids, ident),
        Expr::Unary {
            operand, id, span, ..
        } => {
            *id = ids.fresh(*span);
            number_expr(ids, operand);
        }
        Expr::Binary {
            left,
            right,
            id,
            span,
            ..
        }
        | Expr::Logical {
            left,
            right,
            id,
            span,
            ..
        } => {
            *id = ids.fresh(*span);
            number_expr(ids, left);
            number_expr(ids, right);
        }
        Expr::Assign(assign) => number_assign(ids, assign),
        Expr::Call(call) => number_call(ids, call),
    }
}
