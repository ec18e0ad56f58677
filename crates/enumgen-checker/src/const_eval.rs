//! Constant expression evaluation.
//!
//! Constants are evaluated on demand in dependency order. Integer
//! arithmetic is exact within `i128`; typed results are checked against the
//! range of their type. Values that depend on imported packages cannot be
//! known and evaluate to `ConstValue::Unknown` without a diagnostic, except
//! the integer limits of `math` and `unsafe.Sizeof` of basic types.

use std::cmp::Ordering;
use std::num::IntErrorKind;

use enumgen_common::diagnostic_codes as codes;
use enumgen_common::limits::{MAX_CONST_EVAL_DEPTH, MAX_SHIFT_COUNT};
use enumgen_parser::ast::{Decl, Expr, ExprKind, Ident, LitKind, Spec};
use enumgen_scanner::SyntaxKind;

use crate::constant::{
    ConstValue, parse_float_literal, parse_int_literal, parse_rune_literal, parse_string_literal,
};
use crate::package::{ConstKey, ConstObject};
use crate::resolver::{
    BUILTIN_FUNCS, EvalState, ObjectKind, Resolver, TypeScope, UNIVERSE_TYPES,
};
use crate::types::{BasicKind, Type};

/// A constant operand: its value and type. An operand of `Type::Invalid`
/// stands for an expression that already failed or cannot be evaluated;
/// operations on it produce no further diagnostics.
#[derive(Clone, Debug)]
pub(crate) struct Operand {
    pub value: ConstValue,
    pub ty: Type,
}

impl Operand {
    fn new(value: ConstValue, ty: Type) -> Self {
        Self { value, ty }
    }

    fn invalid() -> Self {
        Self::new(ConstValue::Unknown, Type::Invalid)
    }

    fn untyped(value: ConstValue, kind: BasicKind) -> Self {
        Self::new(value, Type::Basic(kind))
    }

    fn is_invalid(&self) -> bool {
        self.ty.is_invalid()
    }
}

#[derive(Clone, Copy)]
struct EvalContext {
    file: usize,
    iota: i128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unrepresentable {
    Overflow,
    Truncated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArithError {
    DivisionByZero,
    Overflow,
}

/// Convert `value` to the representation of `kind`.
fn represent(value: &ConstValue, kind: BasicKind) -> Result<ConstValue, Unrepresentable> {
    match value {
        ConstValue::Unknown | ConstValue::Bool(_) | ConstValue::String(_) => Ok(value.clone()),
        ConstValue::Int(_) | ConstValue::Float(_) if kind.is_integer() => {
            if let ConstValue::Float(f) = value {
                if f.fract() != 0.0 {
                    return Err(Unrepresentable::Truncated);
                }
            }
            let v = value.to_exact_int().ok_or(Unrepresentable::Overflow)?;
            match kind.integer_range() {
                Some((lo, hi)) if v < lo || v > hi => Err(Unrepresentable::Overflow),
                _ => Ok(ConstValue::Int(v)),
            }
        }
        ConstValue::Int(_) | ConstValue::Float(_) => {
            let f = value.to_f64().ok_or(Unrepresentable::Overflow)?;
            if !f.is_finite() || (kind == BasicKind::Float32 && f.abs() > f64::from(f32::MAX)) {
                return Err(Unrepresentable::Overflow);
            }
            Ok(ConstValue::Float(f))
        }
    }
}

fn arith(op: SyntaxKind, kind: BasicKind, a: &ConstValue, b: &ConstValue) -> Result<ConstValue, ArithError> {
    use SyntaxKind as K;
    match (a, b) {
        (ConstValue::Int(a), ConstValue::Int(b)) if kind.is_integer() => {
            let (a, b) = (*a, *b);
            let result = match op {
                K::PlusToken => a.checked_add(b),
                K::MinusToken => a.checked_sub(b),
                K::AsteriskToken => a.checked_mul(b),
                K::SlashToken | K::PercentToken if b == 0 => {
                    return Err(ArithError::DivisionByZero);
                }
                K::SlashToken => a.checked_div(b),
                K::PercentToken => a.checked_rem(b),
                K::AmpersandToken => Some(a & b),
                K::BarToken => Some(a | b),
                K::CaretToken => Some(a ^ b),
                K::AmpersandCaretToken => Some(a & !b),
                _ => return Ok(ConstValue::Unknown),
            };
            result.map(ConstValue::Int).ok_or(ArithError::Overflow)
        }
        (ConstValue::Bool(a), ConstValue::Bool(b)) => Ok(match op {
            K::AmpersandAmpersandToken => ConstValue::Bool(*a && *b),
            K::BarBarToken => ConstValue::Bool(*a || *b),
            _ => ConstValue::Unknown,
        }),
        (ConstValue::String(a), ConstValue::String(b)) if op == K::PlusToken => {
            Ok(ConstValue::String(format!("{a}{b}")))
        }
        _ => {
            let (Some(a), Some(b)) = (a.to_f64(), b.to_f64()) else {
                return Ok(ConstValue::Unknown);
            };
            let result = match op {
                K::PlusToken => a + b,
                K::MinusToken => a - b,
                K::AsteriskToken => a * b,
                K::SlashToken if b == 0.0 => return Err(ArithError::DivisionByZero),
                K::SlashToken => a / b,
                _ => return Ok(ConstValue::Unknown),
            };
            if result.is_finite() {
                Ok(ConstValue::Float(result))
            } else {
                Err(ArithError::Overflow)
            }
        }
    }
}

fn compare(op: SyntaxKind, a: &ConstValue, b: &ConstValue) -> Option<bool> {
    use SyntaxKind as K;
    let ordering = match (a, b) {
        (ConstValue::Int(a), ConstValue::Int(b)) => a.cmp(b),
        (ConstValue::String(a), ConstValue::String(b)) => a.cmp(b),
        (ConstValue::Bool(a), ConstValue::Bool(b)) => {
            return match op {
                K::EqualsEqualsToken => Some(a == b),
                K::ExclamationEqualsToken => Some(a != b),
                _ => None,
            };
        }
        _ => a.to_f64()?.partial_cmp(&b.to_f64()?)?,
    };
    Some(match op {
        K::EqualsEqualsToken => ordering == Ordering::Equal,
        K::ExclamationEqualsToken => ordering != Ordering::Equal,
        K::LessThanToken => ordering == Ordering::Less,
        K::LessThanEqualsToken => ordering != Ordering::Greater,
        K::GreaterThanToken => ordering == Ordering::Greater,
        K::GreaterThanEqualsToken => ordering != Ordering::Less,
        _ => return None,
    })
}

const fn is_comparison(op: SyntaxKind) -> bool {
    matches!(
        op,
        SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken
    )
}

/// `math.MaxInt8` through `math.MinInt64`, `math.MaxUint` and friends.
fn math_integer_limit(name: &str) -> Option<i128> {
    let (bound, type_name) = name.split_at_checked(3)?;
    let kind = match type_name {
        "Int" => BasicKind::Int,
        "Int8" => BasicKind::Int8,
        "Int16" => BasicKind::Int16,
        "Int32" => BasicKind::Int32,
        "Int64" => BasicKind::Int64,
        "Uint" => BasicKind::Uint,
        "Uint8" => BasicKind::Uint8,
        "Uint16" => BasicKind::Uint16,
        "Uint32" => BasicKind::Uint32,
        "Uint64" => BasicKind::Uint64,
        _ => return None,
    };
    let (lo, hi) = kind.integer_range()?;
    match bound {
        "Max" => Some(hi),
        "Min" if !kind.is_unsigned() => Some(lo),
        _ => None,
    }
}

fn is_universe_name(name: &str) -> bool {
    BasicKind::from_name(name).is_some()
        || UNIVERSE_TYPES.contains(&name)
        || BUILTIN_FUNCS.contains(&name)
        || matches!(name, "iota" | "true" | "false" | "nil")
}

impl Resolver<'_> {
    /// Evaluate the constant at `key`, memoizing the result.
    pub(crate) fn evaluate_constant(&mut self, key: ConstKey) -> Operand {
        if let Some(object) = self.constants.get(&key) {
            return Operand::new(object.value.clone(), object.ty.clone());
        }
        let files = self.files;
        let Decl::Gen(gen_decl) = &files[key.file].decls[key.decl] else {
            return Operand::invalid();
        };
        let Some(Spec::Value(spec)) = gen_decl.specs.get(key.spec) else {
            return Operand::invalid();
        };
        let name = &spec.names[key.name];

        if self.eval_state.get(&key) == Some(&EvalState::InProgress) {
            self.error(key.file, name.span, codes::INITIALIZATION_CYCLE, &[&name.name]);
            return Operand::invalid();
        }
        if self.eval_depth >= MAX_CONST_EVAL_DEPTH {
            self.error(key.file, name.span, codes::CONSTANT_TOO_DEEP, &[&name.name]);
            return Operand::invalid();
        }

        self.eval_state.insert(key, EvalState::InProgress);
        self.eval_depth += 1;

        let info = self.const_specs.get(&(key.file, key.decl, key.spec)).copied();
        let ctx = EvalContext {
            file: key.file,
            iota: info.map_or(0, |info| info.iota),
        };
        let source = info.and_then(|info| info.source);
        let expr = source.and_then(|src| match &gen_decl.specs[src] {
            Spec::Value(value) => value.values.get(key.name).map(|expr| (src, expr)),
            Spec::Type(_) => None,
        });
        let operand = match expr {
            Some((src, expr)) => {
                let x = self.eval_expr(expr, ctx);
                match self
                    .const_spec_types
                    .get(&(key.file, key.decl, src))
                    .cloned()
                {
                    Some(target) => self.assign(x, &target, expr, ctx.file),
                    None => x,
                }
            }
            None => Operand::invalid(),
        };

        self.eval_depth -= 1;
        self.eval_state.insert(key, EvalState::Done);
        self.constants.insert(
            key,
            ConstObject {
                name: name.name.clone(),
                ty: operand.ty.clone(),
                value: operand.value.clone(),
            },
        );
        operand
    }

    /// Give `x` the declared type `target` of a constant spec.
    fn assign(&mut self, x: Operand, target: &Type, expr: &Expr, file: usize) -> Operand {
        if target.is_invalid() {
            return Operand::invalid();
        }
        if x.is_invalid() || self.has_unknown_kind(target) {
            return Operand::new(ConstValue::Unknown, target.clone());
        }
        if x.ty.is_untyped() {
            return self
                .convert_untyped(x, target, expr, file)
                .unwrap_or_else(|| Operand::new(ConstValue::Unknown, target.clone()));
        }
        if self.identical(&x.ty, target) {
            return Operand::new(x.value, target.clone());
        }
        let text = self.text(file, expr.span);
        self.error(
            file,
            expr.span,
            codes::CANNOT_USE_AS_VALUE,
            &[text, &target.to_string()],
        );
        Operand::new(ConstValue::Unknown, target.clone())
    }

    /// Implicitly convert an untyped operand to `target`.
    fn convert_untyped(
        &mut self,
        x: Operand,
        target: &Type,
        expr: &Expr,
        file: usize,
    ) -> Option<Operand> {
        let text = self.text(file, expr.span);
        let Some(kind) = self.basic_kind(target) else {
            if self.has_unknown_kind(target) || matches!(target, Type::TypeParam(_)) {
                return Some(Operand::new(ConstValue::Unknown, target.clone()));
            }
            self.error(
                file,
                expr.span,
                codes::CANNOT_USE_AS_VALUE,
                &[text, &target.to_string()],
            );
            return None;
        };
        let compatible = match self.basic_kind(&x.ty) {
            Some(BasicKind::UntypedBool) => kind.is_boolean(),
            Some(BasicKind::UntypedString) => kind.is_string(),
            Some(BasicKind::UntypedInt | BasicKind::UntypedRune | BasicKind::UntypedFloat) => {
                kind.is_numeric()
            }
            _ => false,
        };
        if !compatible {
            self.error(
                file,
                expr.span,
                codes::CANNOT_USE_AS_VALUE,
                &[text, &target.to_string()],
            );
            return None;
        }
        match represent(&x.value, kind) {
            Ok(value) => Some(Operand::new(value, target.clone())),
            Err(reason) => {
                self.report_unrepresentable(reason, text, target, expr, file);
                None
            }
        }
    }

    fn report_unrepresentable(
        &mut self,
        reason: Unrepresentable,
        text: &str,
        target: &Type,
        expr: &Expr,
        file: usize,
    ) {
        let code = match reason {
            Unrepresentable::Overflow => codes::CONSTANT_OVERFLOWS,
            Unrepresentable::Truncated => codes::CONSTANT_TRUNCATED,
        };
        self.error(file, expr.span, code, &[text, &target.to_string()]);
    }

    /// Check that a typed result fits its type.
    fn check_result(&mut self, result: Operand, expr: &Expr, file: usize) -> Operand {
        if result.ty.is_untyped() {
            return result;
        }
        let Some(kind) = self.basic_kind(&result.ty) else {
            return result;
        };
        match represent(&result.value, kind) {
            Ok(value) => Operand::new(value, result.ty),
            Err(reason) => {
                let text = self.text(file, expr.span);
                self.report_unrepresentable(reason, text, &result.ty, expr, file);
                Operand::invalid()
            }
        }
    }

    fn overflow(&mut self, ty: &Type, expr: &Expr, file: usize) -> Operand {
        let text = self.text(file, expr.span);
        self.error(
            file,
            expr.span,
            codes::CONSTANT_OVERFLOWS,
            &[text, &ty.to_string()],
        );
        Operand::invalid()
    }

    fn not_constant(&mut self, expr: &Expr, file: usize) -> Operand {
        let text = self.text(file, expr.span);
        self.error(file, expr.span, codes::NOT_CONSTANT, &[text]);
        Operand::invalid()
    }

    fn not_an_expression(&mut self, expr: &Expr, file: usize) -> Operand {
        let text = self.text(file, expr.span);
        self.error(file, expr.span, codes::NOT_AN_EXPRESSION, &[text]);
        Operand::invalid()
    }

    fn operator_not_defined(&mut self, op: SyntaxKind, ty: &Type, expr: &Expr, file: usize) -> Operand {
        self.error(
            file,
            expr.span,
            codes::OPERATOR_NOT_DEFINED,
            &[op.text(), &ty.to_string()],
        );
        Operand::invalid()
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn eval_expr(&mut self, expr: &Expr, ctx: EvalContext) -> Operand {
        match &expr.kind {
            ExprKind::BasicLit { kind, raw } => self.eval_literal(*kind, raw, expr, ctx.file),
            ExprKind::Ident(ident) => self.eval_ident(ident, expr, ctx),
            ExprKind::Paren(inner) => self.eval_expr(inner, ctx),
            ExprKind::Selector { base, sel } => self.eval_selector(base, sel, expr, ctx.file),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand, expr, ctx),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right, expr, ctx),
            ExprKind::Call { func, args, .. } => self.eval_call(func, args, expr, ctx),
            ExprKind::Type(_) => self.not_an_expression(expr, ctx.file),
            ExprKind::Bad => Operand::invalid(),
            ExprKind::Composite { .. }
            | ExprKind::FuncLit { .. }
            | ExprKind::Index { .. }
            | ExprKind::Slice { .. }
            | ExprKind::TypeAssert { .. } => self.not_constant(expr, ctx.file),
        }
    }

    fn eval_literal(&mut self, kind: LitKind, raw: &str, expr: &Expr, file: usize) -> Operand {
        match kind {
            LitKind::Int => match parse_int_literal(raw) {
                Ok(v) => Operand::untyped(ConstValue::Int(v), BasicKind::UntypedInt),
                Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
                    self.overflow(&Type::Basic(BasicKind::UntypedInt), expr, file)
                }
                Err(_) => {
                    self.error(file, expr.span, codes::MALFORMED_NUMBER_LITERAL, &[raw]);
                    Operand::invalid()
                }
            },
            LitKind::Float => match parse_float_literal(raw) {
                Some(v) if v.is_finite() => {
                    Operand::untyped(ConstValue::Float(v), BasicKind::UntypedFloat)
                }
                Some(_) => self.overflow(&Type::Basic(BasicKind::UntypedFloat), expr, file),
                None => {
                    self.error(file, expr.span, codes::MALFORMED_NUMBER_LITERAL, &[raw]);
                    Operand::invalid()
                }
            },
            // Complex constants are not modeled.
            LitKind::Imag => Operand::invalid(),
            LitKind::Rune => match parse_rune_literal(raw) {
                Some(v) => Operand::untyped(ConstValue::Int(v), BasicKind::UntypedRune),
                None => {
                    self.error(file, expr.span, codes::INVALID_LITERAL, &[raw]);
                    Operand::invalid()
                }
            },
            LitKind::String => match parse_string_literal(raw) {
                Some(s) => Operand::untyped(ConstValue::String(s), BasicKind::UntypedString),
                None => {
                    self.error(file, expr.span, codes::INVALID_LITERAL, &[raw]);
                    Operand::invalid()
                }
            },
        }
    }

    fn eval_ident(&mut self, ident: &Ident, expr: &Expr, ctx: EvalContext) -> Operand {
        let name = ident.name.as_str();
        if ident.is_blank() {
            return self.not_an_expression(expr, ctx.file);
        }
        match self.objects.get(name).copied() {
            Some(ObjectKind::Const(key)) => return self.evaluate_constant(key),
            Some(ObjectKind::Type) => return self.not_an_expression(expr, ctx.file),
            Some(ObjectKind::Var | ObjectKind::Func) => return self.not_constant(expr, ctx.file),
            None => {}
        }
        match name {
            "iota" => Operand::untyped(ConstValue::Int(ctx.iota), BasicKind::UntypedInt),
            "true" | "false" => {
                Operand::untyped(ConstValue::Bool(name == "true"), BasicKind::UntypedBool)
            }
            "nil" => self.not_constant(expr, ctx.file),
            _ if is_universe_name(name) || self.is_import(ctx.file, name) => {
                self.not_an_expression(expr, ctx.file)
            }
            _ if self.dot_imports[ctx.file] => Operand::invalid(),
            _ => {
                self.error(ctx.file, ident.span, codes::UNDEFINED, &[name]);
                Operand::invalid()
            }
        }
    }

    /// `pkg.Name` from an import is accepted with an unknown value.
    fn eval_selector(&mut self, base: &Expr, sel: &Ident, expr: &Expr, file: usize) -> Operand {
        let Some(ident) = base.as_ident() else {
            return self.not_constant(expr, file);
        };
        if self.objects.contains_key(&ident.name) || is_universe_name(&ident.name) {
            return self.not_constant(expr, file);
        }
        if let Some(path) = self.import_path(file, &ident.name) {
            return match (path, math_integer_limit(&sel.name)) {
                ("math", Some(v)) => Operand::untyped(ConstValue::Int(v), BasicKind::UntypedInt),
                _ => Operand::invalid(),
            };
        }
        if self.dot_imports[file] {
            return Operand::invalid();
        }
        self.error(file, ident.span, codes::UNDEFINED, &[&ident.name]);
        Operand::invalid()
    }

    fn eval_unary(&mut self, op: SyntaxKind, operand: &Expr, expr: &Expr, ctx: EvalContext) -> Operand {
        use SyntaxKind as K;
        if !matches!(
            op,
            K::PlusToken | K::MinusToken | K::CaretToken | K::ExclamationToken
        ) {
            return self.not_constant(expr, ctx.file);
        }
        let x = self.eval_expr(operand, ctx);
        if x.is_invalid() {
            return x;
        }
        if self.has_unknown_kind(&x.ty) {
            return Operand::new(ConstValue::Unknown, x.ty);
        }
        let Some(kind) = self.basic_kind(&x.ty) else {
            return self.operator_not_defined(op, &x.ty, expr, ctx.file);
        };
        let defined = match op {
            K::PlusToken | K::MinusToken => kind.is_numeric(),
            K::CaretToken => kind.is_integer(),
            _ => kind.is_boolean(),
        };
        if !defined {
            return self.operator_not_defined(op, &x.ty, expr, ctx.file);
        }
        let value = match (op, &x.value) {
            (_, ConstValue::Unknown) | (K::PlusToken, _) => x.value.clone(),
            (K::MinusToken, ConstValue::Int(v)) => match v.checked_neg() {
                Some(v) => ConstValue::Int(v),
                None => return self.overflow(&x.ty, expr, ctx.file),
            },
            (K::MinusToken, ConstValue::Float(v)) => ConstValue::Float(-v),
            (K::CaretToken, ConstValue::Int(v)) => match kind.integer_range() {
                Some((0, max)) => ConstValue::Int(max ^ v),
                _ => ConstValue::Int(!v),
            },
            (K::ExclamationToken, ConstValue::Bool(b)) => ConstValue::Bool(!b),
            _ => ConstValue::Unknown,
        };
        self.check_result(Operand::new(value, x.ty), expr, ctx.file)
    }

    fn eval_binary(
        &mut self,
        op: SyntaxKind,
        left: &Expr,
        right: &Expr,
        expr: &Expr,
        ctx: EvalContext,
    ) -> Operand {
        use SyntaxKind as K;
        let x = self.eval_expr(left, ctx);
        let y = self.eval_expr(right, ctx);
        if x.is_invalid() || y.is_invalid() {
            return Operand::invalid();
        }
        if matches!(op, K::LessThanLessThanToken | K::GreaterThanGreaterThanToken) {
            return self.eval_shift(op, x, y, right, expr, ctx.file);
        }

        let Some((x, y, ty)) = self.unify(x, y, right, expr, ctx.file) else {
            return Operand::invalid();
        };
        if self.has_unknown_kind(&ty) {
            return if is_comparison(op) {
                Operand::untyped(ConstValue::Unknown, BasicKind::UntypedBool)
            } else {
                Operand::new(ConstValue::Unknown, ty)
            };
        }
        let Some(kind) = self.basic_kind(&ty) else {
            return self.operator_not_defined(op, &ty, expr, ctx.file);
        };

        if is_comparison(op) {
            let defined = match op {
                K::EqualsEqualsToken | K::ExclamationEqualsToken => true,
                _ => (kind.is_numeric() && !kind.is_complex()) || kind.is_string(),
            };
            if !defined {
                return self.operator_not_defined(op, &ty, expr, ctx.file);
            }
            let value = compare(op, &x.value, &y.value).map_or(ConstValue::Unknown, ConstValue::Bool);
            return Operand::untyped(value, BasicKind::UntypedBool);
        }

        let defined = match op {
            K::AmpersandAmpersandToken | K::BarBarToken => kind.is_boolean(),
            K::PlusToken => kind.is_numeric() || kind.is_string(),
            K::MinusToken | K::AsteriskToken | K::SlashToken => kind.is_numeric(),
            K::PercentToken
            | K::AmpersandToken
            | K::BarToken
            | K::CaretToken
            | K::AmpersandCaretToken => kind.is_integer(),
            _ => false,
        };
        if !defined {
            return self.operator_not_defined(op, &ty, expr, ctx.file);
        }
        if x.value.is_unknown() || y.value.is_unknown() {
            return Operand::new(ConstValue::Unknown, ty);
        }
        match arith(op, kind, &x.value, &y.value) {
            Ok(value) => self.check_result(Operand::new(value, ty), expr, ctx.file),
            Err(ArithError::DivisionByZero) => {
                self.error(ctx.file, right.span, codes::DIVISION_BY_ZERO, &[]);
                Operand::invalid()
            }
            Err(ArithError::Overflow) => self.overflow(&ty, expr, ctx.file),
        }
    }

    /// Bring two operands to a common type. An untyped operand takes the
    /// type of a typed one; two untyped numeric operands take the larger
    /// kind.
    fn unify(
        &mut self,
        x: Operand,
        y: Operand,
        right: &Expr,
        expr: &Expr,
        file: usize,
    ) -> Option<(Operand, Operand, Type)> {
        match (x.ty.is_untyped(), y.ty.is_untyped()) {
            (false, false) => {
                if self.identical(&x.ty, &y.ty) {
                    let ty = x.ty.clone();
                    return Some((x, y, ty));
                }
                self.mismatched(&x.ty, &y.ty, expr, file);
                None
            }
            (false, true) => {
                let ty = x.ty.clone();
                let y = self.convert_untyped(y, &ty, right, file)?;
                Some((x, y, ty))
            }
            (true, false) => {
                let ty = y.ty.clone();
                let x = self.convert_untyped(x, &ty, expr, file)?;
                Some((x, y, ty))
            }
            (true, true) => {
                let kx = self.basic_kind(&x.ty)?;
                let ky = self.basic_kind(&y.ty)?;
                if kx.untyped_rank() > 0 && ky.untyped_rank() > 0 {
                    let kind = if kx.untyped_rank() >= ky.untyped_rank() {
                        kx
                    } else {
                        ky
                    };
                    let convert = |value: ConstValue| match (kind, value.to_f64()) {
                        (BasicKind::UntypedFloat, Some(f)) => ConstValue::Float(f),
                        _ => value,
                    };
                    let ty = Type::Basic(kind);
                    return Some((
                        Operand::new(convert(x.value), ty.clone()),
                        Operand::new(convert(y.value), ty.clone()),
                        ty,
                    ));
                }
                if kx == ky {
                    return Some((x, y, Type::Basic(kx)));
                }
                self.mismatched(&x.ty, &y.ty, expr, file);
                None
            }
        }
    }

    fn mismatched(&mut self, a: &Type, b: &Type, expr: &Expr, file: usize) {
        self.error(
            file,
            expr.span,
            codes::MISMATCHED_TYPES,
            &[&a.to_string(), &b.to_string()],
        );
    }

    fn eval_shift(
        &mut self,
        op: SyntaxKind,
        x: Operand,
        y: Operand,
        right: &Expr,
        expr: &Expr,
        file: usize,
    ) -> Operand {
        let count_ok = self
            .basic_kind(&y.ty)
            .is_some_and(|k| k.is_integer() || k == BasicKind::UntypedFloat);
        let count = if !count_ok {
            None
        } else if y.value.is_unknown() {
            Some(None)
        } else {
            y.value
                .to_exact_int()
                .filter(|c| (0..=i128::from(MAX_SHIFT_COUNT)).contains(c))
                .and_then(|c| u32::try_from(c).ok())
                .map(Some)
        };
        let Some(count) = count else {
            let text = self.text(file, right.span);
            self.error(file, right.span, codes::INVALID_SHIFT_COUNT, &[text]);
            return Operand::invalid();
        };

        // An untyped float with an integral value shifts as an untyped int.
        let x = match (self.basic_kind(&x.ty), x.value.to_exact_int()) {
            (Some(BasicKind::UntypedFloat), Some(v)) => {
                Operand::untyped(ConstValue::Int(v), BasicKind::UntypedInt)
            }
            _ => x,
        };
        if self.has_unknown_kind(&x.ty) {
            return Operand::new(ConstValue::Unknown, x.ty);
        }
        if !self.basic_kind(&x.ty).is_some_and(BasicKind::is_integer) {
            return self.operator_not_defined(op, &x.ty, expr, file);
        }
        let (Some(count), Some(v)) = (count, x.value.as_int()) else {
            return Operand::new(ConstValue::Unknown, x.ty);
        };
        let value = if op == SyntaxKind::LessThanLessThanToken {
            let shifted = v << count;
            if shifted >> count != v {
                return self.overflow(&x.ty, expr, file);
            }
            shifted
        } else {
            v >> count
        };
        self.check_result(Operand::new(ConstValue::Int(value), x.ty), expr, file)
    }

    // =========================================================================
    // Calls: conversions and builtins
    // =========================================================================

    fn eval_call(&mut self, func: &Expr, args: &[Expr], expr: &Expr, ctx: EvalContext) -> Operand {
        let callee = func.unparen();
        match &callee.kind {
            ExprKind::Ident(ident) => {
                match self.objects.get(&ident.name).copied() {
                    Some(ObjectKind::Type) => {
                        let target = Type::Named(ident.name.clone());
                        return self.eval_conversion(target, callee, args, expr, ctx);
                    }
                    Some(_) => return self.not_constant(expr, ctx.file),
                    None => {}
                }
                let name = ident.name.as_str();
                if let Some(kind) = BasicKind::from_name(name) {
                    return self.eval_conversion(Type::Basic(kind), callee, args, expr, ctx);
                }
                match name {
                    "len" => self.eval_len(callee, args, expr, ctx),
                    "min" | "max" => self.eval_min_max(name, callee, args, expr, ctx),
                    // Array capacities and complex parts are not modeled.
                    "cap" | "real" | "imag" | "complex" => Operand::invalid(),
                    _ if is_universe_name(name) => self.not_constant(expr, ctx.file),
                    _ if self.is_import(ctx.file, name) => {
                        self.not_an_expression(callee, ctx.file)
                    }
                    _ if self.dot_imports[ctx.file] => Operand::invalid(),
                    _ => {
                        self.error(ctx.file, ident.span, codes::UNDEFINED, &[name]);
                        Operand::invalid()
                    }
                }
            }
            ExprKind::Selector { base, sel } => {
                let path = base
                    .as_ident()
                    .and_then(|b| self.import_path(ctx.file, &b.name));
                match path {
                    Some("unsafe") if sel.name == "Sizeof" => {
                        self.eval_sizeof(callee, args, expr, ctx)
                    }
                    Some(_) => Operand::invalid(),
                    None => self.eval_selector(base, sel, expr, ctx.file),
                }
            }
            ExprKind::Type(ty) => {
                let scope = TypeScope {
                    file: ctx.file,
                    type_params: &[],
                };
                let target = self.resolve_type(ty, scope);
                self.eval_conversion(target, callee, args, expr, ctx)
            }
            _ => self.not_constant(expr, ctx.file),
        }
    }

    fn eval_conversion(
        &mut self,
        target: Type,
        callee: &Expr,
        args: &[Expr],
        expr: &Expr,
        ctx: EvalContext,
    ) -> Operand {
        if args.len() != 1 {
            let text = self.text(ctx.file, callee.span);
            self.error(ctx.file, expr.span, codes::WRONG_ARGUMENT_COUNT, &[text]);
            return Operand::invalid();
        }
        let arg = &args[0];
        let x = self.eval_expr(arg, ctx);
        if target.is_invalid() {
            return Operand::invalid();
        }
        let Some(kind) = self.basic_kind(&target) else {
            if self.has_unknown_kind(&target) {
                return Operand::new(ConstValue::Unknown, target);
            }
            if matches!(target, Type::TypeParam(_)) {
                return Operand::invalid();
            }
            return self.not_constant(expr, ctx.file);
        };
        if x.is_invalid() {
            return Operand::new(ConstValue::Unknown, target);
        }
        let text = self.text(ctx.file, arg.span);
        let Some(from) = self.basic_kind(&x.ty) else {
            self.error(
                ctx.file,
                arg.span,
                codes::CANNOT_CONVERT,
                &[text, &target.to_string()],
            );
            return Operand::invalid();
        };

        let value = if from.is_numeric() && kind.is_numeric() {
            match represent(&x.value, kind) {
                Ok(value) => value,
                Err(reason) => {
                    self.report_unrepresentable(reason, text, &target, arg, ctx.file);
                    return Operand::invalid();
                }
            }
        } else if from.is_integer() && kind.is_string() {
            match x.value {
                ConstValue::Int(v) => {
                    let c = u32::try_from(v)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    ConstValue::String(c.to_string())
                }
                other => other,
            }
        } else if (from.is_string() && kind.is_string())
            || (from.is_boolean() && kind.is_boolean())
        {
            x.value
        } else {
            self.error(
                ctx.file,
                arg.span,
                codes::CANNOT_CONVERT,
                &[text, &target.to_string()],
            );
            return Operand::invalid();
        };
        Operand::new(value, target)
    }

    fn eval_len(&mut self, callee: &Expr, args: &[Expr], expr: &Expr, ctx: EvalContext) -> Operand {
        if args.len() != 1 {
            let text = self.text(ctx.file, callee.span);
            self.error(ctx.file, expr.span, codes::WRONG_ARGUMENT_COUNT, &[text]);
            return Operand::invalid();
        }
        let arg = args[0].unparen();
        // Lengths of arrays are constant but arrays are not modeled.
        let is_var = arg
            .as_ident()
            .is_some_and(|id| self.objects.get(&id.name) == Some(&ObjectKind::Var));
        if is_var || matches!(arg.kind, ExprKind::Composite { .. }) {
            return Operand::invalid();
        }
        let x = self.eval_expr(arg, ctx);
        if x.is_invalid() {
            return x;
        }
        let int = Type::Basic(BasicKind::Int);
        match (self.basic_kind(&x.ty), &x.value) {
            (Some(kind), ConstValue::String(s)) if kind.is_string() => {
                Operand::new(ConstValue::Int(s.len() as i128), int)
            }
            (Some(kind), ConstValue::Unknown) if kind.is_string() => {
                Operand::new(ConstValue::Unknown, int)
            }
            _ => self.not_constant(expr, ctx.file),
        }
    }

    /// `unsafe.Sizeof` of a constant or conversion of basic type.
    fn eval_sizeof(&mut self, callee: &Expr, args: &[Expr], expr: &Expr, ctx: EvalContext) -> Operand {
        if args.len() != 1 {
            let text = self.text(ctx.file, callee.span);
            self.error(ctx.file, expr.span, codes::WRONG_ARGUMENT_COUNT, &[text]);
            return Operand::invalid();
        }
        let arg = args[0].unparen();
        // Variables and composite values have sizes too, but their types are not modeled.
        let is_var = arg
            .as_ident()
            .is_some_and(|id| self.objects.get(&id.name) == Some(&ObjectKind::Var));
        if is_var || matches!(arg.kind, ExprKind::Composite { .. }) {
            return Operand::invalid();
        }
        let x = self.eval_expr(arg, ctx);
        if x.is_invalid() {
            return x;
        }
        match self.basic_kind(&x.ty).and_then(BasicKind::size) {
            Some(size) => Operand::new(ConstValue::Int(size), Type::Basic(BasicKind::Uintptr)),
            None => Operand::invalid(),
        }
    }

    fn eval_min_max(
        &mut self,
        name: &str,
        callee: &Expr,
        args: &[Expr],
        expr: &Expr,
        ctx: EvalContext,
    ) -> Operand {
        let Some((first, rest)) = args.split_first() else {
            let text = self.text(ctx.file, callee.span);
            self.error(ctx.file, expr.span, codes::WRONG_ARGUMENT_COUNT, &[text]);
            return Operand::invalid();
        };
        let mut acc = self.eval_expr(first, ctx);
        for arg in rest {
            let y = self.eval_expr(arg, ctx);
            if acc.is_invalid() || y.is_invalid() {
                return Operand::invalid();
            }
            let Some((a, b, ty)) = self.unify(acc, y, arg, expr, ctx.file) else {
                return Operand::invalid();
            };
            let better = if name == "min" {
                SyntaxKind::LessThanToken
            } else {
                SyntaxKind::GreaterThanToken
            };
            acc = match compare(better, &b.value, &a.value) {
                Some(true) => Operand::new(b.value, ty),
                Some(false) => Operand::new(a.value, ty),
                None => Operand::new(ConstValue::Unknown, ty),
            };
        }
        if acc.is_invalid() {
            return acc;
        }
        let ordered = self
            .basic_kind(&acc.ty)
            .is_some_and(|k| (k.is_numeric() && !k.is_complex()) || k.is_string());
        if !ordered {
            self.error(
                ctx.file,
                expr.span,
                codes::OPERATOR_NOT_DEFINED,
                &[name, &acc.ty.to_string()],
            );
            return Operand::invalid();
        }
        acc
    }
}
