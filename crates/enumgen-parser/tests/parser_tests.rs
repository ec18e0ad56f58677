//! Tests for declaration, type and expression parsing.
use crate::ast::{Decl, DeclKeyword, ExprKind, Spec, TypeExprKind};
use crate::{check_syntax, parse_file};
use enumgen_common::diagnostic_codes;

fn parse_ok(source: &str) -> crate::SourceFile {
    match check_syntax("test.go", source) {
        Ok(file) => file,
        Err(diagnostics) => panic!("unexpected diagnostics: {diagnostics:?}"),
    }
}

#[test]
fn parse_package_and_imports() {
    let file = parse_ok(
        "package shirts\n\nimport (\n\t\"encoding/json\"\n\tfmtx \"fmt\"\n\t_ \"embed\"\n)\n",
    );
    assert_eq!(file.package.name, "shirts");
    assert_eq!(file.imports.len(), 3);
    assert_eq!(file.imports[0].path, "encoding/json");
    assert_eq!(file.imports[0].local_name(), Some("json"));
    assert_eq!(file.imports[1].local_name(), Some("fmtx"));
    assert_eq!(file.imports[2].local_name(), None);
}

#[test]
fn parse_missing_package_clause_reports_diagnostic() {
    let (_, diagnostics) = parse_file("test.go", "const A = 1\n");
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPECTED_PACKAGE_CLAUSE);
}

#[test]
fn parse_const_block_with_implicit_repetition() {
    let file = parse_ok(
        "package p\n\ntype ShirtSize byte\n\nconst (\n\tNA ShirtSize = iota\n\tXS\n\tS\n\t_\n)\n",
    );
    let consts: Vec<_> = file.const_decls().collect();
    assert_eq!(consts.len(), 1);
    assert!(consts[0].grouped);
    assert_eq!(consts[0].specs.len(), 4);

    let Spec::Value(first) = &consts[0].specs[0] else {
        panic!("expected value spec");
    };
    assert_eq!(first.names[0].name, "NA");
    assert_eq!(
        first.ty.as_ref().and_then(|t| t.as_name()).map(|i| i.name.as_str()),
        Some("ShirtSize")
    );
    assert_eq!(first.values.len(), 1);

    let Spec::Value(second) = &consts[0].specs[1] else {
        panic!("expected value spec");
    };
    assert!(second.ty.is_none());
    assert!(second.values.is_empty());

    let Spec::Value(blank) = &consts[0].specs[3] else {
        panic!("expected value spec");
    };
    assert!(blank.names[0].is_blank());
}

#[test]
fn parse_const_spec_with_multiple_names() {
    let file = parse_ok("package p\nconst A, B, C = 1, 2, 3\n");
    let Decl::Gen(decl) = &file.decls[0] else {
        panic!("expected const declaration");
    };
    assert_eq!(decl.keyword, DeclKeyword::Const);
    assert!(!decl.grouped);
    let Spec::Value(spec) = &decl.specs[0] else {
        panic!("expected value spec");
    };
    assert_eq!(spec.names.len(), 3);
    assert_eq!(spec.values.len(), 3);
}

#[test]
fn parse_binary_precedence() {
    let file = parse_ok("package p\nconst X = 1 + 2*3 << 1\n");
    let Decl::Gen(decl) = &file.decls[0] else {
        panic!("expected declaration");
    };
    let Spec::Value(spec) = &decl.specs[0] else {
        panic!("expected value spec");
    };
    let ExprKind::Binary { op, right, .. } = &spec.values[0].kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, enumgen_scanner::SyntaxKind::PlusToken);
    assert!(matches!(right.kind, ExprKind::Binary { .. }));
}

#[test]
fn parse_type_declarations() {
    let file = parse_ok(
        "package p\n\
         type A [4]int\n\
         type B []string\n\
         type C map[string]*B\n\
         type D struct {\n\tx, y int\n\tName string `json:\"name\"`\n\t*B\n\tio.Reader\n}\n\
         type E interface {\n\tString() string\n\t~int | ~int8\n}\n\
         type F func(int, ...string) (n int, err error)\n\
         type G = A\n\
         type List[T any] struct { items []T }\n\
         type Number interface { ~int | ~float64 }\n\
         type Chans struct { in <-chan int; out chan<- int }\n",
    );
    let types: Vec<_> = file
        .decls
        .iter()
        .filter_map(|d| match d {
            Decl::Gen(g) if g.keyword == DeclKeyword::Type => match &g.specs[0] {
                Spec::Type(t) => Some(t),
                Spec::Value(_) => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(types.len(), 10);
    assert!(matches!(types[0].ty.kind, TypeExprKind::Array { .. }));
    assert!(matches!(types[1].ty.kind, TypeExprKind::Slice(_)));
    assert!(matches!(types[2].ty.kind, TypeExprKind::Map { .. }));
    let TypeExprKind::Struct(fields) = &types[3].ty.kind else {
        panic!("expected struct");
    };
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].names.len(), 2);
    assert!(fields[1].tag.is_some());
    assert!(fields[2].names.is_empty());
    assert!(matches!(fields[3].ty.kind, TypeExprKind::Qualified { .. }));
    assert!(matches!(types[4].ty.kind, TypeExprKind::Interface(_)));
    assert!(matches!(types[5].ty.kind, TypeExprKind::Func(_)));
    assert!(types[6].alias);
    assert_eq!(types[7].type_params.len(), 1);
    assert_eq!(types[7].type_params[0].names[0].name, "T");
}

#[test]
fn parse_array_type_with_constant_length_is_not_type_parameter() {
    let file = parse_ok("package p\nconst N = 4\ntype A [N]int\n");
    let Decl::Gen(decl) = &file.decls[1] else {
        panic!("expected type declaration");
    };
    let Spec::Type(spec) = &decl.specs[0] else {
        panic!("expected type spec");
    };
    assert!(spec.type_params.is_empty());
    assert!(matches!(spec.ty.kind, TypeExprKind::Array { .. }));
}

#[test]
fn parse_methods_and_receivers() {
    let file = parse_ok(
        "package p\n\
         type WeekDay int\n\
         func (d WeekDay) String() string {\n\treturn \"dilluns\"\n}\n\
         func (l *List[T]) Len() int { return len(l.items) }\n",
    );
    let funcs: Vec<_> = file
        .decls
        .iter()
        .filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            _ => None,
        })
        .collect();
    assert_eq!(funcs.len(), 2);
    let recv = funcs[0].recv.as_ref().map(|r| r.names[0].name.as_str());
    assert_eq!(recv, Some("d"));
    assert_eq!(funcs[0].signature.results.len(), 1);
    assert!(matches!(
        funcs[1].recv.as_ref().map(|r| &r.ty.kind),
        Some(TypeExprKind::Pointer(_))
    ));
}

#[test]
fn parse_parameter_grouping() {
    let file = parse_ok("package p\nfunc f(a, b int, c string, buf [4]byte, xs ...int) {}\n");
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected function");
    };
    let params = &func.signature.params;
    assert_eq!(params.len(), 4);
    assert_eq!(params[0].names.len(), 2);
    assert!(matches!(params[2].ty.kind, TypeExprKind::Array { .. }));
    assert!(func.signature.variadic);
}

#[test]
fn parse_unnamed_generic_parameter() {
    let file = parse_ok("package p\nfunc f(List[int], map[string]int) {}\n");
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected function");
    };
    assert_eq!(func.signature.params.len(), 2);
    assert!(func.signature.params.iter().all(|p| p.names.is_empty()));
    assert!(matches!(
        func.signature.params[0].ty.kind,
        TypeExprKind::Generic { .. }
    ));
}

#[test]
fn parse_mixed_named_and_unnamed_parameters_fails() {
    let (_, diagnostics) = parse_file("test.go", "package p\nfunc f(a int, string) {}\n");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::MIXED_NAMED_AND_UNNAMED_PARAMETERS)
    );
}

#[test]
fn parse_composite_literals() {
    parse_ok(
        "package p\n\
         var m = map[string]int{\n\t\"a\": 1,\n\t\"b\": 2,\n}\n\
         var s = []struct{ x int }{{1}, {x: 2}}\n\
         var p = Point{X: 1, Y: 2}\n",
    );
}

#[test]
fn parse_missing_comma_in_composite_literal() {
    let (_, diagnostics) = parse_file("test.go", "package p\nvar m = []int{\n\t1,\n\t2\n}\n");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::MISSING_COMMA_IN_COMPOSITE_LITERAL)
    );
}

#[test]
fn parse_conversions_and_calls() {
    parse_ok(
        "package p\n\
         const A = ShirtSize(3)\n\
         var b = []byte(\"x\")\n\
         var c = (*int)(nil)\n\
         var d = make(map[string][]int, 10)\n\
         var e = append(xs, ys...)\n\
         var f = fmt.Sprintf(\"%d\", 1)\n\
         var g = x.(fmt.Stringer)\n\
         var h = xs[1:len(xs):cap(xs)]\n",
    );
}

#[test]
fn parse_imports_after_declaration_is_error() {
    let (_, diagnostics) =
        parse_file("test.go", "package p\nconst A = 1\nimport \"fmt\"\n");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::IMPORTS_AFTER_DECLARATIONS)
    );
}

#[test]
fn parse_recovers_after_bad_declaration() {
    let (file, diagnostics) = parse_file("test.go", "package p\n+ junk\nconst A = 1\n");
    assert!(!diagnostics.is_empty());
    assert!(file.const_decls().count() == 1);
}

#[test]
fn check_syntax_reports_unterminated_string() {
    let result = check_syntax("test.go", "package p\nconst A = \"oops\n");
    assert!(result.is_err());
}

#[test]
fn parse_deeply_nested_expression_is_bounded() {
    let source = format!("package p\nconst A = {}1{}\n", "(".repeat(2000), ")".repeat(2000));
    let (_, diagnostics) = parse_file("test.go", &source);
    assert!(!diagnostics.is_empty());
}
