//! Tests for package-scope resolution, types and methods.
use super::*;
use enumgen_common::diagnostic_codes;
use crate::error::TypeCheckError;
use crate::sources::load_sources;
use crate::types::StringerFacts;

fn check_files(files: &[(&str, &str)]) -> Result<Package, TypeCheckError> {
    let files = load_sources(
        "test",
        files
            .iter()
            .map(|(name, text)| ((*name).to_string(), (*text).to_string())),
        "",
    )
    .expect("sources parse");
    check_package(files)
}

fn check(source: &str) -> Result<Package, TypeCheckError> {
    check_files(&[("a.go", source)])
}

fn error_codes(source: &str) -> Vec<u32> {
    match check(source) {
        Ok(_) => panic!("expected type errors in:\n{source}"),
        Err(err) => err.report.diagnostics.iter().map(|d| d.code).collect(),
    }
}

fn assert_ok(source: &str) -> Package {
    match check(source) {
        Ok(package) => package,
        Err(err) => panic!("unexpected type errors: {err}\n{source}"),
    }
}

#[test]
fn accepts_ordinary_package() {
    let package = assert_ok(
        r#"package shirts

import (
	"fmt"
	"time"
)

type Size int

const (
	Small Size = iota
	Medium
	Large
)

type Order struct {
	Size    Size
	Placed  time.Time
	Note    string `json:"note"`
	private []*Order
}

var DefaultSize = Medium

func (o *Order) Describe() string {
	return fmt.Sprintf("%v", o.Size)
}

func init() {}
func init() {}
"#,
    );
    assert_eq!(package.name(), "shirts");
    assert_eq!(package.files().len(), 1);
    assert!(package.named_type("Size").is_some());
    assert!(package.named_type("Order").is_some());
}

#[test]
fn mismatched_package_names() {
    let err = check_files(&[("a.go", "package a\n"), ("b.go", "package b\n")])
        .expect_err("two packages");
    assert_eq!(
        err.report.diagnostics[0].code,
        diagnostic_codes::MISMATCHED_PACKAGE_NAMES
    );
    assert!(err.to_string().starts_with("type checking package a:\n"));
    assert!(err.to_string().contains("mismatched package names: a and b"));
}

#[test]
fn redeclared_names_across_files() {
    let err = check_files(&[
        ("a.go", "package p\n\nconst X = 1\n"),
        ("b.go", "package p\n\nvar X = 2\n"),
    ])
    .expect_err("redeclared");
    let diagnostic = &err.report.diagnostics[0];
    assert_eq!(diagnostic.code, diagnostic_codes::REDECLARED);
    assert_eq!(diagnostic.file, "b.go");
    assert_eq!(err.report.lines()[0], "b.go:3:5: X redeclared in this block");
}

#[test]
fn import_name_collides_with_declaration() {
    let codes = error_codes("package p\n\nimport \"fmt\"\n\nvar fmt = 1\n");
    assert_eq!(codes, [diagnostic_codes::ALREADY_DECLARED_THROUGH_IMPORT]);
}

#[test]
fn undefined_type_reports_position() {
    let err = check("package p\n\nvar x Foo\n").expect_err("undefined");
    assert_eq!(err.report.lines(), ["a.go:3:7: undefined: Foo"]);
}

#[test]
fn qualified_types_need_an_import() {
    assert_ok("package p\n\nimport \"time\"\n\nvar d time.Duration\n");
    assert_eq!(
        error_codes("package p\n\nvar d time.Duration\n"),
        [diagnostic_codes::UNDEFINED]
    );
}

#[test]
fn dot_import_makes_unknown_names_acceptable() {
    assert_ok("package p\n\nimport . \"fmt\"\n\nvar s Stringer\n");
}

#[test]
fn value_used_as_type() {
    assert_eq!(
        error_codes("package p\n\nconst C = 1\n\nvar x C\n"),
        [diagnostic_codes::NOT_A_TYPE]
    );
}

#[test]
fn undefined_names_in_signatures_and_fields() {
    let codes = error_codes(
        "package p\n\ntype S struct {\n\tf Missing\n}\n\nfunc F(a Other) (Third, error) {\n\treturn nil, nil\n}\n",
    );
    assert_eq!(codes, [diagnostic_codes::UNDEFINED; 3]);
}

#[test]
fn recursive_types() {
    assert_eq!(
        error_codes("package p\n\ntype T struct {\n\tnext T\n}\n"),
        [diagnostic_codes::INVALID_RECURSIVE_TYPE]
    );
    assert!(error_codes("package p\n\ntype A B\ntype B A\n")
        .contains(&diagnostic_codes::INVALID_RECURSIVE_TYPE));
    assert!(error_codes("package p\n\ntype Arr [2]Arr\n")
        .contains(&diagnostic_codes::INVALID_RECURSIVE_TYPE));
    assert_ok("package p\n\ntype L struct {\n\tnext *L\n\tall  []L\n}\n");
}

#[test]
fn generic_declarations() {
    assert_ok(
        r#"package p

type Number interface {
	~int | ~int64 | ~float64
}

type List[T any] struct {
	items []T
}

func (l *List[T]) Len() int {
	return len(l.items)
}

func Sum[T Number](xs []T) T {
	var total T
	for _, x := range xs {
		total += x
	}
	return total
}
"#,
    );
}

#[test]
fn stringer_facts_from_methods() {
    let package = assert_ok(
        r#"package p

type Value int
type Pointer int
type Odd int
type Plain int

func (v Value) String() string { return "v" }
func (p *Pointer) String() string { return "p" }
func (o Odd) String(verbose bool) string { return "o" }
"#,
    );
    assert_eq!(
        package.stringer_facts("Value"),
        StringerFacts {
            is_stringer: true,
            defines_string: true,
        }
    );
    assert_eq!(
        package.stringer_facts("Pointer"),
        StringerFacts {
            is_stringer: false,
            defines_string: true,
        }
    );
    assert!(!package.stringer_facts("Odd").is_stringer);
    assert!(package.stringer_facts("Odd").defines_string);
    assert_eq!(package.stringer_facts("Plain"), StringerFacts::default());
    assert_eq!(package.stringer_facts("Missing"), StringerFacts::default());
}

#[test]
fn shadowed_string_type_is_not_a_stringer() {
    let package = assert_ok(
        "package p\n\ntype string int\ntype T int\n\nfunc (t T) String() string { return 0 }\n",
    );
    assert!(!package.stringer_facts("T").is_stringer);
}

#[test]
fn methods_on_aliases_attach_to_the_target() {
    let package = assert_ok(
        "package p\n\ntype T int\ntype U = T\n\nfunc (u U) String() string { return \"\" }\n",
    );
    assert!(package.stringer_facts("T").is_stringer);
    assert!(package.stringer_facts("U").is_stringer);
    assert_eq!(package.named_type("U").map(|t| t.name.as_str()), Some("T"));
}

#[test]
fn invalid_receivers() {
    assert_eq!(
        error_codes("package p\n\nfunc (i int) M() {}\n"),
        [diagnostic_codes::INVALID_RECEIVER]
    );
    assert_eq!(
        error_codes("package p\n\nfunc (m Missing) M() {}\n"),
        [diagnostic_codes::UNDEFINED]
    );
    assert_eq!(
        error_codes("package p\n\ntype T int\n\nfunc (T) M() {}\nfunc (*T) M() {}\n"),
        [diagnostic_codes::METHOD_REDECLARED]
    );
}

#[test]
fn diagnostics_are_capped_in_display() {
    let mut source = String::from("package p\n\n");
    for i in 0..12 {
        source.push_str(&format!("var v{i} Missing{i}\n"));
    }
    let err = check(&source).expect_err("undefined names");
    assert_eq!(err.report.len(), 12);
    assert!(err.to_string().ends_with("(and 2 more errors)"));
}
