//! Statement and declaration type checking.

use crate::ast::*;

use super::environment::TypeEnv;
use super::errors::TypeErrorKind;
use super::types::{FnId, TcType};

/// The function whose body is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnContext {
    pub fn_id: FnId,
    /// Declared return type
    pub ret: TcType,
}

impl TypeEnv<'_> {
    /// Type check a top-level declaration.
    pub fn check_decl(&mut self, decl: &Decl) -> TcType {
        match decl {
            Decl::Var(var) => self.record(var.id, TcType::Void),
            Decl::Fn(func) => self.check_fn_decl(func),
        }
    }

    /// A function declaration has its own `Function` type; its body is checked with that
    /// function as the context.
    pub fn check_fn_decl(&mut self, func: &FnDecl) -> TcType {
        let fn_ty = self.names.declared_type(func.id);
        let Some(fn_id) = fn_ty.as_function() else {
            panic!("function `{}` resolved to non-function type {fn_ty}", func.name);
        };

        for formal in &func.formals {
            self.record(formal.id, TcType::Void);
        }

        let ctx = FnContext {
            fn_id,
            ret: self.functions().sig(fn_id).ret,
        };
        self.check_block(&func.body, &ctx);

        self.record(func.id, fn_ty)
    }

    /// Check every statement of a block; a failing statement never stops the rest.
    pub fn check_block(&mut self, stmts: &[Stmt], ctx: &FnContext) {
        for stmt in stmts {
            self.check_stmt(stmt, ctx);
        }
    }

    /// Conditions are judged after their bodies, so an ill-typed condition is reported
    /// after every diagnostic raised inside the body.
    pub fn check_stmt(&mut self, stmt: &Stmt, ctx: &FnContext) -> TcType {
        let ty = match stmt {
            Stmt::VarDecl(var) => return self.record(var.id, TcType::Void),
            Stmt::Assign { assign, .. } => self.check_assign(assign),
            Stmt::PostInc { target, .. } | Stmt::PostDec { target, .. } => {
                let ty = self.check_ident(target);
                if ty.is_int() {
                    TcType::Int
                } else {
                    if !ty.is_error() {
                        self.report(TypeErrorKind::BadArithmeticOperand, target.span);
                    }
                    TcType::Error
                }
            }
            Stmt::Read { target, .. } => {
                let ty = self.check_ident(target);
                if ty.as_function().is_some() {
                    self.report(TypeErrorKind::BadConsoleRead, target.span);
                    TcType::Error
                } else {
                    ty
                }
            }
            Stmt::Write { value, .. } => {
                let ty = self.check_expr(value);
                if ty.as_function().is_some() {
                    self.report(TypeErrorKind::BadConsoleWrite, value.span());
                    TcType::Error
                } else if ty.is_void() {
                    self.report(TypeErrorKind::BadWriteOfVoid, value.span());
                    TcType::Error
                } else {
                    ty
                }
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                let cond_ty = self.check_expr(condition);
                self.check_block(then_block, ctx);
                if let Some(block) = else_block {
                    self.check_block(block, ctx);
                }
                self.check_condition(cond_ty, condition, TypeErrorKind::BadIfCondition)
            }
            Stmt::While {
                condition, body, ..
            } => {
                let cond_ty = self.check_expr(condition);
                self.check_block(body, ctx);
                self.check_condition(cond_ty, condition, TypeErrorKind::BadWhileCondition)
            }
            Stmt::Return { value, span, .. } => self.check_return(value.as_ref(), *span, ctx),
            Stmt::Call { call, .. } => {
                self.check_call(call);
                TcType::Void
            }
        };
        self.record(stmt.id(), ty)
    }

    fn check_condition(&mut self, cond_ty: TcType, condition: &Expr, kind: TypeErrorKind) -> TcType {
        if cond_ty.is_bool() {
            TcType::Void
        } else {
            if !cond_ty.is_error() {
                self.report(kind, condition.span());
            }
            TcType::Error
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span, ctx: &FnContext) -> TcType {
        let Some(value) = value else {
            if ctx.ret.is_void() {
                return TcType::Void;
            }
            self.report(TypeErrorKind::BadReturnValue, span);
            return TcType::Error;
        };

        let ty = self.check_expr(value);
        if ty.is_error() {
            TcType::Error
        } else if ctx.ret.is_void() || ty != ctx.ret {
            self.report(TypeErrorKind::BadReturnValue, value.span());
            TcType::Error
        } else {
            ty
        }
    }
}
