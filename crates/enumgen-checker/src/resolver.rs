//! Package-level declaration checking.
//!
//! The resolver binds every package-scope name, resolves the types named in
//! declarations and signatures, records methods, and evaluates all constants
//! (see `const_eval`). Function bodies are syntax-checked by the parser only.

use enumgen_common::diagnostic_codes as codes;
use enumgen_common::{Diagnostic, LineMap, Span};
use enumgen_parser::SourceFile;
use enumgen_parser::ast::{
    Decl, DeclKeyword, Field, FuncDecl, GenDecl, Ident, InterfaceElem, Signature, Spec, TypeExpr,
    TypeExprKind, TypeSpec,
};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::{DiagnosticReport, TypeCheckError};
use crate::package::{ConstKey, ConstObject, Package};
use crate::types::{BasicKind, MethodInfo, NamedType, Type};

/// Type names of the universe scope that are not basic types.
pub(crate) const UNIVERSE_TYPES: &[&str] = &["any", "error", "comparable"];

/// Predeclared functions of the universe scope.
pub(crate) const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Kind of a package-scope object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ObjectKind {
    Const(ConstKey),
    Var,
    Type,
    Func,
}

/// Where a constant spec takes its expressions from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ConstSpecInfo {
    /// Index of the spec holding the expressions: the spec itself, or the
    /// last preceding spec with values when the list is omitted.
    pub source: Option<usize>,
    pub iota: i128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EvalState {
    InProgress,
    Done,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Names visible while resolving a type expression.
#[derive(Clone, Copy)]
pub(crate) struct TypeScope<'s> {
    pub file: usize,
    pub type_params: &'s [String],
}

/// Check the package-level declarations of `files`.
pub fn check_package(files: Vec<SourceFile>) -> Result<Package, TypeCheckError> {
    let name = files
        .first()
        .map(|f| f.package.name.clone())
        .unwrap_or_default();

    let (types, constants, mut diagnostics) = {
        let mut resolver = Resolver::new(&files);
        resolver.check_package_names();
        resolver.collect_objects();
        resolver.collect_imports();
        resolver.resolve_type_decls();
        resolver.check_func_decls();
        resolver.check_var_decls();
        resolver.check_const_specs();
        resolver.evaluate_constants();
        resolver.finish()
    };

    if !diagnostics.is_empty() {
        let order: FxHashMap<&str, usize> = files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.file_name.as_str(), i))
            .collect();
        diagnostics.sort_by_key(|d| (order.get(d.file.as_str()).copied(), d.start));
        diagnostics.dedup_by(|a, b| a.file == b.file && a.start == b.start && a.code == b.code);
        let line_maps: Vec<(&str, LineMap)> = files
            .iter()
            .map(|f| (f.file_name.as_str(), LineMap::build(&f.text)))
            .collect();
        let report = DiagnosticReport::new(diagnostics, |file| {
            line_maps
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, line_map)| line_map)
        });
        return Err(TypeCheckError {
            package: name,
            report,
        });
    }

    debug!(
        package = %name,
        types = types.len(),
        constants = constants.len(),
        "checked package"
    );
    Ok(Package {
        name,
        files,
        constants,
        types,
    })
}

pub(crate) struct Resolver<'f> {
    pub(crate) files: &'f [SourceFile],
    pub(crate) objects: FxHashMap<String, ObjectKind>,
    /// Per file: local import name to import path.
    pub(crate) imports: Vec<FxHashMap<String, String>>,
    pub(crate) dot_imports: Vec<bool>,
    /// Type specs by name: (file, decl, spec).
    type_specs: IndexMap<String, (usize, usize, usize)>,
    /// Resolved right-hand side of each type spec.
    declared: FxHashMap<String, Type>,
    types: IndexMap<String, NamedType>,
    pub(crate) const_specs: FxHashMap<(usize, usize, usize), ConstSpecInfo>,
    pub(crate) const_spec_types: FxHashMap<(usize, usize, usize), Type>,
    pub(crate) constants: FxHashMap<ConstKey, ConstObject>,
    pub(crate) eval_state: FxHashMap<ConstKey, EvalState>,
    pub(crate) eval_depth: u32,
    diagnostics: Vec<Diagnostic>,
}

impl<'f> Resolver<'f> {
    fn new(files: &'f [SourceFile]) -> Self {
        Self {
            files,
            objects: FxHashMap::default(),
            imports: vec![FxHashMap::default(); files.len()],
            dot_imports: vec![false; files.len()],
            type_specs: IndexMap::new(),
            declared: FxHashMap::default(),
            types: IndexMap::new(),
            const_specs: FxHashMap::default(),
            const_spec_types: FxHashMap::default(),
            constants: FxHashMap::default(),
            eval_state: FxHashMap::default(),
            eval_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    fn finish(
        self,
    ) -> (
        IndexMap<String, NamedType>,
        FxHashMap<ConstKey, ConstObject>,
        Vec<Diagnostic>,
    ) {
        (self.types, self.constants, self.diagnostics)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error(&mut self, file: usize, span: Span, code: u32, args: &[&str]) {
        let files = self.files;
        let file_name = &files[file].file_name;
        self.diagnostics
            .push(Diagnostic::from_code(file_name, span.start, span.len(), code, args));
    }

    /// Source text of `span` in `file`.
    pub(crate) fn text(&self, file: usize, span: Span) -> &'f str {
        let files = self.files;
        span.text(&files[file].text)
    }

    // =========================================================================
    // Package scope
    // =========================================================================

    fn check_package_names(&mut self) {
        let files = self.files;
        let Some(first) = files.first() else {
            return;
        };
        for (i, file) in files.iter().enumerate().skip(1) {
            if file.package.name != first.package.name {
                self.error(
                    i,
                    file.package.span,
                    codes::MISMATCHED_PACKAGE_NAMES,
                    &[&first.package.name, &file.package.name],
                );
            }
        }
    }

    fn declare(&mut self, file: usize, ident: &Ident, kind: ObjectKind) -> bool {
        if ident.is_blank() {
            return false;
        }
        if self.objects.contains_key(&ident.name) {
            self.error(file, ident.span, codes::REDECLARED, &[&ident.name]);
            return false;
        }
        self.objects.insert(ident.name.clone(), kind);
        true
    }

    fn collect_objects(&mut self) {
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for (d, decl) in file.decls.iter().enumerate() {
                match decl {
                    Decl::Gen(gen_decl) => self.collect_gen_decl(f, d, gen_decl),
                    Decl::Func(func) if func.recv.is_none() => {
                        if func.name.name == "init" {
                            continue;
                        }
                        self.declare(f, &func.name, ObjectKind::Func);
                    }
                    Decl::Func(_) | Decl::Bad(_) => {}
                }
            }
        }
    }

    fn collect_gen_decl(&mut self, f: usize, d: usize, gen_decl: &GenDecl) {
        for (s, spec) in gen_decl.specs.iter().enumerate() {
            match spec {
                Spec::Value(value) => {
                    for (n, name) in value.names.iter().enumerate() {
                        let kind = match gen_decl.keyword {
                            DeclKeyword::Const => ObjectKind::Const(ConstKey {
                                file: f,
                                decl: d,
                                spec: s,
                                name: n,
                            }),
                            _ => ObjectKind::Var,
                        };
                        self.declare(f, name, kind);
                    }
                }
                Spec::Type(type_spec) => {
                    if self.declare(f, &type_spec.name, ObjectKind::Type) {
                        self.type_specs
                            .insert(type_spec.name.name.clone(), (f, d, s));
                    }
                }
            }
        }
    }

    fn collect_imports(&mut self) {
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for import in &file.imports {
                if import.name.as_ref().is_some_and(|n| n.name == ".") {
                    self.dot_imports[f] = true;
                    continue;
                }
                let Some(local) = import.local_name() else {
                    continue;
                };
                if self.objects.contains_key(local) {
                    self.error(
                        f,
                        import.span,
                        codes::ALREADY_DECLARED_THROUGH_IMPORT,
                        &[local, &import.path],
                    );
                    continue;
                }
                if self.imports[f].contains_key(local) {
                    self.error(f, import.span, codes::REDECLARED, &[local]);
                    continue;
                }
                self.imports[f].insert(local.to_string(), import.path.clone());
            }
        }
    }

    pub(crate) fn is_import(&self, file: usize, name: &str) -> bool {
        self.imports[file].contains_key(name)
    }

    /// Import path bound to a local package name in `file`.
    pub(crate) fn import_path(&self, file: usize, name: &str) -> Option<&str> {
        self.imports[file].get(name).map(String::as_str)
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    /// Resolve a type expression, reporting undefined names and non-types.
    /// Component types of composite types are checked but not modeled.
    pub(crate) fn resolve_type(&mut self, ty: &TypeExpr, scope: TypeScope<'_>) -> Type {
        match &ty.kind {
            TypeExprKind::Name(ident) => self.resolve_type_name(ident, scope),
            TypeExprKind::Qualified { package, name } => {
                if self.is_import(scope.file, &package.name) {
                    return Type::External(format!("{}.{}", package.name, name.name));
                }
                if self.objects.contains_key(&package.name) {
                    let text = self.text(scope.file, ty.span);
                    self.error(scope.file, ty.span, codes::NOT_A_TYPE, &[text]);
                    return Type::Invalid;
                }
                if self.dot_imports[scope.file] {
                    return Type::External(self.text(scope.file, ty.span).to_string());
                }
                self.error(scope.file, package.span, codes::UNDEFINED, &[&package.name]);
                Type::Invalid
            }
            TypeExprKind::Generic { base, args } => {
                let base_ty = self.resolve_type(base, scope);
                for arg in args {
                    self.resolve_type(arg, scope);
                }
                if base_ty.is_invalid() {
                    Type::Invalid
                } else {
                    Type::Composite
                }
            }
            TypeExprKind::Pointer(elem) | TypeExprKind::Slice(elem) => {
                self.resolve_type(elem, scope);
                Type::Composite
            }
            TypeExprKind::Array { elem, .. } | TypeExprKind::Chan { elem, .. } => {
                self.resolve_type(elem, scope);
                Type::Composite
            }
            TypeExprKind::Map { key, value } => {
                self.resolve_type(key, scope);
                self.resolve_type(value, scope);
                Type::Composite
            }
            TypeExprKind::Func(signature) => {
                self.resolve_signature(signature, scope);
                Type::Composite
            }
            TypeExprKind::Struct(fields) => {
                self.resolve_fields(fields, scope);
                Type::Composite
            }
            TypeExprKind::Interface(elems) => {
                for elem in elems {
                    match elem {
                        InterfaceElem::Method { signature, .. } => {
                            self.resolve_signature(signature, scope);
                        }
                        InterfaceElem::Embedded(embedded) => {
                            self.resolve_type(embedded, scope);
                        }
                    }
                }
                Type::Composite
            }
            TypeExprKind::Union(terms) => {
                for term in terms {
                    self.resolve_type(&term.ty, scope);
                }
                Type::Composite
            }
            TypeExprKind::Paren(inner) => self.resolve_type(inner, scope),
            TypeExprKind::Bad => Type::Invalid,
        }
    }

    fn resolve_type_name(&mut self, ident: &Ident, scope: TypeScope<'_>) -> Type {
        let name = ident.name.as_str();
        if scope.type_params.iter().any(|p| p == name) {
            return Type::TypeParam(name.to_string());
        }
        match self.objects.get(name).copied() {
            Some(ObjectKind::Type) => return Type::Named(name.to_string()),
            Some(_) => {
                self.error(scope.file, ident.span, codes::NOT_A_TYPE, &[name]);
                return Type::Invalid;
            }
            None => {}
        }
        if let Some(kind) = BasicKind::from_name(name) {
            return Type::Basic(kind);
        }
        if UNIVERSE_TYPES.contains(&name) {
            return Type::Composite;
        }
        if self.is_import(scope.file, name) {
            self.error(scope.file, ident.span, codes::NOT_A_TYPE, &[name]);
            return Type::Invalid;
        }
        if self.dot_imports[scope.file] {
            return Type::External(name.to_string());
        }
        self.error(scope.file, ident.span, codes::UNDEFINED, &[name]);
        Type::Invalid
    }

    fn resolve_fields(&mut self, fields: &[Field], scope: TypeScope<'_>) -> Vec<Type> {
        let mut types = Vec::new();
        for field in fields {
            let ty = self.resolve_type(&field.ty, scope);
            for _ in 0..field.names.len().max(1) {
                types.push(ty.clone());
            }
        }
        types
    }

    fn resolve_signature(&mut self, signature: &Signature, scope: TypeScope<'_>) -> Vec<Type> {
        self.resolve_fields(&signature.params, scope);
        self.resolve_fields(&signature.results, scope)
    }

    /// Check the constraints of a type parameter list and return its names.
    fn declare_type_params(&mut self, params: &[Field], file: usize) -> Vec<String> {
        let names: Vec<String> = params
            .iter()
            .flat_map(|p| p.names.iter().map(|n| n.name.clone()))
            .collect();
        let scope = TypeScope {
            file,
            type_params: &names,
        };
        for param in params {
            self.resolve_type(&param.ty, scope);
        }
        names
    }

    /// Two types are identical after resolving aliases.
    pub(crate) fn identical(&self, a: &Type, b: &Type) -> bool {
        self.canonical(a) == self.canonical(b)
    }

    fn canonical(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        for _ in 0..=self.types.len() {
            let Type::Named(name) = &ty else {
                break;
            };
            if !self.is_alias(name) {
                break;
            }
            ty = self.declared.get(name).cloned().unwrap_or(Type::Invalid);
        }
        ty
    }

    fn is_alias(&self, name: &str) -> bool {
        self.type_spec(name).is_some_and(|(_, spec)| spec.alias)
    }

    fn type_spec(&self, name: &str) -> Option<(usize, &'f TypeSpec)> {
        let files = self.files;
        let &(f, d, s) = self.type_specs.get(name)?;
        match &files[f].decls[d] {
            Decl::Gen(gen_decl) => match &gen_decl.specs[s] {
                Spec::Type(spec) => Some((f, spec)),
                Spec::Value(_) => None,
            },
            _ => None,
        }
    }

    /// Types from imported packages, and local types defined over them
    /// (`type T C.int`), have a kind the checker cannot know.
    pub(crate) fn has_unknown_kind(&self, ty: &Type) -> bool {
        match ty {
            Type::External(_) => true,
            Type::Named(name) => matches!(
                self.types.get(name).map(|t| &t.underlying),
                Some(Type::External(_))
            ),
            _ => false,
        }
    }

    /// The basic kind underlying a type, if any.
    pub(crate) fn basic_kind(&self, ty: &Type) -> Option<BasicKind> {
        match ty {
            Type::Basic(kind) => Some(*kind),
            Type::Named(name) => match self.types.get(name).map(|t| &t.underlying) {
                Some(Type::Basic(kind)) => Some(*kind),
                _ => None,
            },
            _ => None,
        }
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    fn resolve_type_decls(&mut self) {
        let names: Vec<String> = self.type_specs.keys().cloned().collect();
        for name in &names {
            let Some((file, spec)) = self.type_spec(name) else {
                continue;
            };
            let type_params = self.declare_type_params(&spec.type_params, file);
            let scope = TypeScope {
                file,
                type_params: &type_params,
            };
            let ty = self.resolve_type(&spec.ty, scope);
            self.declared.insert(name.clone(), ty);
        }

        self.check_recursive_types(&names);

        for name in &names {
            let Some((_, spec)) = self.type_spec(name) else {
                continue;
            };
            let mut visiting = FxHashSet::default();
            let underlying = self.underlying_of(name, &mut visiting);
            let alias_of = match (spec.alias, self.declared.get(name)) {
                (true, Some(Type::Named(target))) => Some(target.clone()),
                _ => None,
            };
            self.types.insert(
                name.clone(),
                NamedType {
                    name: name.clone(),
                    alias_of,
                    underlying,
                    has_type_params: !spec.type_params.is_empty(),
                    methods: Vec::new(),
                },
            );
        }
    }

    fn underlying_of(&self, name: &str, visiting: &mut FxHashSet<String>) -> Type {
        if !visiting.insert(name.to_string()) {
            return Type::Invalid;
        }
        match self.declared.get(name) {
            Some(Type::Named(next)) => self.underlying_of(next, visiting),
            Some(Type::TypeParam(_)) | None => Type::Invalid,
            Some(other) => other.clone(),
        }
    }

    /// Report type declarations that contain themselves by value: through
    /// a chain of names, array elements or struct fields.
    fn check_recursive_types(&mut self, names: &[String]) {
        let mut deps: FxHashMap<&str, Vec<String>> = FxHashMap::default();
        for name in names {
            if let Some((_, spec)) = self.type_spec(name) {
                let mut out = Vec::new();
                value_deps(&spec.ty, &mut out);
                out.retain(|dep| self.type_specs.contains_key(dep));
                deps.insert(name.as_str(), out);
            }
        }

        let mut state: FxHashMap<&str, Visit> = FxHashMap::default();
        let mut reported: Vec<String> = Vec::new();
        for name in names {
            find_cycle(name, &deps, &mut state, &mut reported);
        }
        for name in reported {
            if let Some((file, spec)) = self.type_spec(&name) {
                self.error(file, spec.name.span, codes::INVALID_RECURSIVE_TYPE, &[&name]);
                self.declared.insert(name, Type::Invalid);
            }
        }
    }

    // =========================================================================
    // Functions and methods
    // =========================================================================

    fn check_func_decls(&mut self) {
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for decl in &file.decls {
                if let Decl::Func(func) = decl {
                    match &func.recv {
                        Some(recv) => self.check_method(f, func, recv),
                        None => {
                            let type_params = self.declare_type_params(&func.type_params, f);
                            let scope = TypeScope {
                                file: f,
                                type_params: &type_params,
                            };
                            self.resolve_signature(&func.signature, scope);
                        }
                    }
                }
            }
        }
    }

    fn check_method(&mut self, f: usize, func: &FuncDecl, recv: &Field) {
        let mut pointer_receiver = false;
        let mut base = &recv.ty;
        let mut type_params = Vec::new();
        loop {
            match &base.kind {
                TypeExprKind::Pointer(inner) if !pointer_receiver => {
                    pointer_receiver = true;
                    base = inner;
                }
                TypeExprKind::Paren(inner) => base = inner,
                TypeExprKind::Generic { base: inner, args } => {
                    type_params.extend(
                        args.iter()
                            .filter_map(TypeExpr::as_name)
                            .map(|ident| ident.name.clone()),
                    );
                    base = inner;
                }
                _ => break,
            }
        }

        let scope = TypeScope {
            file: f,
            type_params: &type_params,
        };
        let results = self.resolve_signature(&func.signature, scope);

        let Some(ident) = base.as_name() else {
            let text = self.text(f, recv.ty.span);
            self.error(f, recv.ty.span, codes::INVALID_RECEIVER, &[text]);
            return;
        };
        let receiver = match self.objects.get(&ident.name).copied() {
            Some(ObjectKind::Type) => match self.canonical(&Type::Named(ident.name.clone())) {
                Type::Named(target) => target,
                _ => {
                    self.error(f, ident.span, codes::INVALID_RECEIVER, &[&ident.name]);
                    return;
                }
            },
            Some(_) => {
                self.error(f, ident.span, codes::NOT_A_TYPE, &[&ident.name]);
                return;
            }
            None => {
                let code = if BasicKind::from_name(&ident.name).is_some()
                    || UNIVERSE_TYPES.contains(&ident.name.as_str())
                {
                    codes::INVALID_RECEIVER
                } else {
                    codes::UNDEFINED
                };
                self.error(f, ident.span, code, &[&ident.name]);
                return;
            }
        };
        if matches!(
            self.types.get(&receiver).map(|t| &t.underlying),
            Some(Type::Invalid)
        ) {
            return;
        }
        if let Some((_, spec)) = self.type_spec(&receiver) {
            if matches!(
                spec.ty.kind,
                TypeExprKind::Pointer(_) | TypeExprKind::Interface(_)
            ) {
                self.error(f, ident.span, codes::INVALID_RECEIVER, &[&ident.name]);
                return;
            }
        }

        let param_count = func
            .signature
            .params
            .iter()
            .map(|p| p.names.len().max(1))
            .sum();
        let method = MethodInfo {
            name: func.name.name.clone(),
            pointer_receiver,
            param_count,
            results,
        };
        let Some(named) = self.types.get_mut(&receiver) else {
            return;
        };
        if !func.name.is_blank() && named.methods.iter().any(|m| m.name == method.name) {
            self.error(
                f,
                func.name.span,
                codes::METHOD_REDECLARED,
                &[&receiver, &func.name.name],
            );
            return;
        }
        named.methods.push(method);
    }

    // =========================================================================
    // Variables and constant specs
    // =========================================================================

    fn check_var_decls(&mut self) {
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for decl in &file.decls {
                let Decl::Gen(gen_decl) = decl else {
                    continue;
                };
                if gen_decl.keyword != DeclKeyword::Var {
                    continue;
                }
                for spec in &gen_decl.specs {
                    if let Spec::Value(value) = spec {
                        if let Some(ty) = &value.ty {
                            let scope = TypeScope {
                                file: f,
                                type_params: &[],
                            };
                            self.resolve_type(ty, scope);
                        }
                    }
                }
            }
        }
    }

    /// Match names to expressions in every constant spec and resolve the
    /// declared constant types.
    fn check_const_specs(&mut self) {
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for (d, decl) in file.decls.iter().enumerate() {
                let Decl::Gen(gen_decl) = decl else {
                    continue;
                };
                if gen_decl.keyword != DeclKeyword::Const {
                    continue;
                }
                let mut last_with_values: Option<usize> = None;
                for (s, spec) in gen_decl.specs.iter().enumerate() {
                    let Spec::Value(spec) = spec else {
                        continue;
                    };
                    let scope = TypeScope {
                        file: f,
                        type_params: &[],
                    };
                    let source = if !spec.values.is_empty() {
                        last_with_values = Some(s);
                        if let Some(ty) = &spec.ty {
                            let resolved = self.resolve_type(ty, scope);
                            let resolved = self.check_constant_type(f, ty, resolved);
                            self.const_spec_types.insert((f, d, s), resolved);
                        }
                        Some(s)
                    } else if let Some(ty) = &spec.ty {
                        self.resolve_type(ty, scope);
                        self.error(f, ty.span, codes::TYPE_WITHOUT_EXPRESSION, &[]);
                        None
                    } else {
                        if last_with_values.is_none() {
                            if let Some(first) = spec.names.first() {
                                self.error(f, first.span, codes::MISSING_INIT_EXPR, &[]);
                            }
                        }
                        last_with_values
                    };

                    if let Some(src) = source {
                        let value_count = match &gen_decl.specs[src] {
                            Spec::Value(v) => v.values.len(),
                            Spec::Type(_) => 0,
                        };
                        if spec.names.len() > value_count {
                            let name = &spec.names[value_count];
                            self.error(f, name.span, codes::MISSING_INIT_EXPR, &[]);
                        } else if spec.names.len() < value_count {
                            let span = if src == s {
                                spec.values[spec.names.len()].span
                            } else {
                                spec.span
                            };
                            self.error(f, span, codes::EXTRA_INIT_EXPR, &[]);
                        }
                    }

                    self.const_specs.insert(
                        (f, d, s),
                        ConstSpecInfo {
                            source,
                            iota: s as i128,
                        },
                    );
                }
            }
        }
    }

    fn check_constant_type(&mut self, file: usize, ty: &TypeExpr, resolved: Type) -> Type {
        if self.has_unknown_kind(&resolved) {
            return resolved;
        }
        match &resolved {
            Type::Invalid => resolved,
            _ => match self.basic_kind(&resolved) {
                Some(kind) if kind.is_constant_type() => resolved,
                _ => {
                    let text = self.text(file, ty.span);
                    self.error(file, ty.span, codes::INVALID_CONSTANT_TYPE, &[text]);
                    Type::Invalid
                }
            },
        }
    }

    fn evaluate_constants(&mut self) {
        let mut keys: Vec<ConstKey> = Vec::new();
        let files = self.files;
        for (f, file) in files.iter().enumerate() {
            for (d, decl) in file.decls.iter().enumerate() {
                let Decl::Gen(gen_decl) = decl else {
                    continue;
                };
                if gen_decl.keyword != DeclKeyword::Const {
                    continue;
                }
                for (s, spec) in gen_decl.specs.iter().enumerate() {
                    if let Spec::Value(spec) = spec {
                        keys.extend((0..spec.names.len()).map(|n| ConstKey {
                            file: f,
                            decl: d,
                            spec: s,
                            name: n,
                        }));
                    }
                }
            }
        }
        for key in keys {
            self.evaluate_constant(key);
        }
    }
}

/// Names a type expression embeds by value.
fn value_deps(ty: &TypeExpr, out: &mut Vec<String>) {
    match &ty.kind {
        TypeExprKind::Name(ident) => out.push(ident.name.clone()),
        TypeExprKind::Array { elem, .. } => value_deps(elem, out),
        TypeExprKind::Struct(fields) => {
            for field in fields {
                value_deps(&field.ty, out);
            }
        }
        TypeExprKind::Paren(inner) => value_deps(inner, out),
        _ => {}
    }
}

fn find_cycle<'a>(
    name: &'a str,
    deps: &'a FxHashMap<&'a str, Vec<String>>,
    state: &mut FxHashMap<&'a str, Visit>,
    reported: &mut Vec<String>,
) {
    match state.get(name) {
        Some(Visit::Done) => return,
        Some(Visit::InProgress) => {
            if !reported.iter().any(|r| r == name) {
                reported.push(name.to_string());
            }
            return;
        }
        None => {}
    }
    state.insert(name, Visit::InProgress);
    if let Some(next) = deps.get(name) {
        for dep in next {
            find_cycle(dep, deps, state, reported);
        }
    }
    state.insert(name, Visit::Done);
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
