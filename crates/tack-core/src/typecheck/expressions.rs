//! Expression type checking.

use crate::ast::*;

use super::environment::TypeEnv;
use super::errors::TypeErrorKind;
use super::types::TcType;

impl TypeEnv<'_> {
    /// Type check an expression, recording the type of it and every subexpression.
    pub fn check_expr(&mut self, expr: &Expr) -> TcType {
        let ty = match expr {
            Expr::Int { .. } => TcType::Int,
            Expr::Char { .. } => TcType::Char,
            Expr::Boolean { .. } => TcType::Bool,
            Expr::Identifier(ident) => return self.check_ident(ident),
            Expr::Unary { op, operand, .. } => self.check_unary(*op, operand),
            Expr::Binary {
                left, op, right, ..
            } => self.check_binary(left, *op, right),
            Expr::Logical { left, right, .. } => {
                let left_ty = self.check_expr(left);
                let right_ty = self.check_expr(right);
                self.check_operand_pair(
                    (left_ty, left.span()),
                    (right_ty, right.span()),
                    TcType::Bool,
                    TypeErrorKind::BadLogicOperand,
                )
            }
            Expr::Assign(assign) => return self.check_assign(assign),
            Expr::Call(call) => return self.check_call(call),
        };
        self.record(expr.id(), ty)
    }

    /// An identifier has the declared type of the symbol it is bound to.
    pub fn check_ident(&mut self, ident: &Ident) -> TcType {
        let ty = self.names.declared_type(ident.id);
        self.record(ident.id, ty)
    }

    fn check_unary(&mut self, op: UnaryOp, operand: &Expr) -> TcType {
        let (required, kind) = match op {
            UnaryOp::Neg => (TcType::Int, TypeErrorKind::BadArithmeticOperand),
            UnaryOp::Not => (TcType::Bool, TypeErrorKind::BadLogicOperand),
        };
        let ty = self.check_expr(operand);
        if ty == required {
            required
        } else {
            if !ty.is_error() {
                self.report(kind, operand.span());
            }
            TcType::Error
        }
    }

    fn check_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr) -> TcType {
        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);
        let left = (left_ty, left.span());
        let right = (right_ty, right.span());

        match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                self.check_arithmetic(left, right)
            }
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => self.check_operand_pair(
                left,
                right,
                TcType::Int,
                TypeErrorKind::BadRelationalOperand,
            ),
            BinaryOp::Eq | BinaryOp::Ne => self.check_equality(left, right),
        }
    }

    /// Both sides must be `int`; each offending side is reported on its own.
    fn check_arithmetic(&mut self, left: (TcType, Span), right: (TcType, Span)) -> TcType {
        let mut ok = true;
        for (ty, span) in [left, right] {
            if !ty.is_int() {
                ok = false;
                if !ty.is_error() {
                    self.report(TypeErrorKind::BadArithmeticOperator, span);
                }
            }
        }
        if ok { TcType::Int } else { TcType::Error }
    }

    /// Relational and logical operators: both sides must be `required`, result `bool`.
    /// Only the first offending side is reported.
    fn check_operand_pair(
        &mut self,
        (left_ty, left_span): (TcType, Span),
        (right_ty, right_span): (TcType, Span),
        required: TcType,
        kind: TypeErrorKind,
    ) -> TcType {
        let left_bad = left_ty != required;
        let right_bad = right_ty != required;

        if left_bad && !left_ty.is_error() {
            self.report(kind, left_span);
        } else if right_bad && !right_ty.is_error() {
            self.report(kind, right_span);
        }

        if left_bad || right_bad {
            TcType::Error
        } else {
            TcType::Bool
        }
    }

    fn check_equality(
        &mut self,
        (left_ty, left_span): (TcType, Span),
        (right_ty, right_span): (TcType, Span),
    ) -> TcType {
        if left_ty.is_error() || right_ty.is_error() {
            TcType::Error
        } else if left_ty != right_ty {
            self.report(TypeErrorKind::BadEqualityOperator, right_span);
            TcType::Error
        } else if !left_ty.is_comparable() {
            // Both sides share the non-comparable type
            self.report(TypeErrorKind::BadEqualityOperand, left_span);
            self.report(TypeErrorKind::BadEqualityOperand, right_span);
            TcType::Error
        } else {
            TcType::Bool
        }
    }

    /// Assignment rule shared by assignment statements and assignment expressions.
    pub fn check_assign(&mut self, assign: &AssignExpr) -> TcType {
        let target_ty = self.check_ident(&assign.target);
        let source_ty = self.check_expr(&assign.value);
        let target_span = assign.target.span;
        let source_span = assign.value.span();

        let ty = if target_ty.is_error() || source_ty.is_error() {
            TcType::Error
        } else if target_ty.as_function().is_some() && source_ty.as_function().is_some() {
            self.report(TypeErrorKind::BadAssignmentOperand, target_span);
            self.report(TypeErrorKind::BadAssignmentOperand, source_span);
            TcType::Error
        } else if target_ty.is_void() || source_ty.is_void() {
            if target_ty.is_void() {
                self.report(TypeErrorKind::BadAssignmentOperand, target_span);
            }
            if source_ty.is_void() {
                self.report(TypeErrorKind::BadAssignmentOperand, source_span);
            }
            TcType::Error
        } else if target_ty != source_ty {
            self.report(TypeErrorKind::BadAssignmentOperator, source_span);
            TcType::Error
        } else {
            target_ty
        };
        self.record(assign.id, ty)
    }

    /// Calls type as the callee's return type. The callee and every argument are typed
    /// even when the call itself is rejected.
    pub fn check_call(&mut self, call: &CallExpr) -> TcType {
        let callee_ty = self.check_ident(&call.callee);
        let arg_tys: Vec<TcType> = call
            .arguments
            .iter()
            .map(|arg| self.check_expr(arg))
            .collect();

        let ty = match callee_ty.as_function() {
            None => {
                if !callee_ty.is_error() {
                    self.report(TypeErrorKind::BadCallee, call.callee.span);
                }
                TcType::Error
            }
            Some(fn_id) => {
                let sig = self.functions().sig(fn_id);
                if sig.params.len() != arg_tys.len() {
                    self.report(TypeErrorKind::BadCallee, call.callee.span);
                    TcType::Error
                } else {
                    let mismatch = call
                        .arguments
                        .iter()
                        .zip(arg_tys.iter().zip(&sig.params))
                        .find(|(_, (arg_ty, param))| !arg_ty.is_error() && arg_ty != param);
                    if let Some((arg, _)) = mismatch {
                        self.report(TypeErrorKind::BadCallee, arg.span());
                        TcType::Error
                    } else if arg_tys.iter().any(TcType::is_error) {
                        TcType::Error
                    } else {
                        sig.ret
                    }
                }
            }
        };
        self.record(call.id, ty)
    }
}
