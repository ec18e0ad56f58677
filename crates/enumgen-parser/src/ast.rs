//! Syntax tree for Go source files.
//!
//! Nodes own their children and carry a [`Span`] into the source text of the
//! file they were parsed from. The tree is immutable after parsing and shared
//! read-only by the checker.

use enumgen_common::Span;
use enumgen_scanner::SyntaxKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// The blank identifier `_`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Iterate the package-level `const` declarations in source order.
    pub fn const_decls(&self) -> impl Iterator<Item = &GenDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Gen(gen_decl) if gen_decl.keyword == DeclKeyword::Const => Some(gen_decl),
            _ => None,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ImportSpec {
    /// Explicit local name, including `.` and `_`.
    pub name: Option<Ident>,
    /// Unquoted import path.
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// The name the import binds in file scope, if any.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        match &self.name {
            Some(name) if name.name == "." || name.name == "_" => None,
            Some(name) => Some(&name.name),
            None => Some(self.path.rsplit('/').next().unwrap_or(&self.path)),
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
    Bad(Span),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKeyword {
    Const,
    Var,
    Type,
}

impl DeclKeyword {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKeyword::Const => "const",
            DeclKeyword::Var => "var",
            DeclKeyword::Type => "type",
        }
    }
}

/// A `const`, `var` or `type` declaration, grouped with parentheses or not.
#[derive(Clone, Debug)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub specs: Vec<Spec>,
    pub grouped: bool,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `names [type] [= values]` inside a `const` or `var` declaration.
#[derive(Clone, Debug)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Vec<Field>,
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct FuncDecl {
    pub recv: Option<Field>,
    pub name: Ident,
    pub type_params: Vec<Field>,
    pub signature: Signature,
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Clone, Debug, Default)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
    pub variadic: bool,
}

/// A parameter, result, struct field or type parameter group.
/// `names` is empty for unnamed parameters and embedded fields.
#[derive(Clone, Debug)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Clone, Debug)]
pub enum TypeExprKind {
    Name(Ident),
    Qualified { package: Ident, name: Ident },
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `[N]T`, or `[...]T` when `len` is `None`.
    Array { len: Option<Box<Expr>>, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(Signature),
    Struct(Vec<Field>),
    Interface(Vec<InterfaceElem>),
    /// Constraint union such as `~int | ~string`.
    Union(Vec<TypeTerm>),
    Paren(Box<TypeExpr>),
    Bad,
}

#[derive(Clone, Debug)]
pub struct TypeTerm {
    pub tilde: bool,
    pub ty: TypeExpr,
}

#[derive(Clone, Debug)]
pub enum InterfaceElem {
    Method { name: Ident, signature: Signature },
    Embedded(TypeExpr),
}

impl TypeExpr {
    /// The identifier when this is an unqualified, non-generic type name.
    #[must_use]
    pub fn as_name(&self) -> Option<&Ident> {
        match &self.kind {
            TypeExprKind::Name(ident) => Some(ident),
            _ => None,
        }
    }

    /// Source text of the type expression.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub key: Option<Expr>,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Ident(Ident),
    BasicLit {
        kind: LitKind,
        raw: String,
    },
    Composite {
        ty: Option<Box<Expr>>,
        elements: Vec<Element>,
    },
    FuncLit {
        signature: Signature,
        body: Block,
    },
    Paren(Box<Expr>),
    Selector {
        base: Box<Expr>,
        sel: Ident,
    },
    Index {
        base: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        base: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },
    /// `x.(T)`, or `x.(type)` in a type switch when `ty` is `None`.
    TypeAssert {
        base: Box<Expr>,
        ty: Option<Box<TypeExpr>>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    Unary {
        op: SyntaxKind,
        operand: Box<Expr>,
    },
    Binary {
        op: SyntaxKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A type literal in operand position, e.g. `[]byte` in `[]byte(s)`.
    Type(Box<TypeExpr>),
    Bad,
}

impl Expr {
    #[must_use]
    pub fn as_ident(&self) -> Option<&Ident> {
        match &self.kind {
            ExprKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    #[must_use]
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct CaseClause {
    /// `None` for `default`.
    pub exprs: Option<Vec<Expr>>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct CommClause {
    /// `None` for `default`.
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Decl(GenDecl),
    Labeled {
        label: Ident,
        stmt: Box<Stmt>,
    },
    Expr(Expr),
    Send {
        chan: Expr,
        value: Expr,
    },
    IncDec {
        expr: Expr,
        inc: bool,
    },
    /// Assignment or short variable declaration; `op` is the operator token.
    Assign {
        lhs: Vec<Expr>,
        op: SyntaxKind,
        rhs: Vec<Expr>,
    },
    Go(Expr),
    Defer(Expr),
    Return(Vec<Expr>),
    Branch {
        keyword: SyntaxKind,
        label: Option<Ident>,
    },
    Block(Block),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then: Block,
        els: Option<Box<Stmt>>,
    },
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Box<Stmt>>,
        clauses: Vec<CaseClause>,
    },
    Select {
        clauses: Vec<CommClause>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        expr: Expr,
        body: Block,
    },
    Empty,
    Bad(Span),
}
