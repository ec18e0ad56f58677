//! Tests for statement parsing inside function bodies.
use crate::ast::{Decl, ExprKind, Stmt};
use crate::{check_syntax, parse_file};

fn body_of(source: &str) -> Vec<Stmt> {
    let text = format!("package p\n\nfunc f() {{\n{source}\n}}\n");
    let file = match check_syntax("test.go", &text) {
        Ok(file) => file,
        Err(diagnostics) => panic!("unexpected diagnostics: {diagnostics:?}\n{text}"),
    };
    match file.decls.into_iter().next() {
        Some(Decl::Func(func)) => func.body.map(|b| b.stmts).unwrap_or_default(),
        _ => panic!("expected function"),
    }
}

#[test]
fn parse_assignments_and_short_declarations() {
    let stmts = body_of("x := 1\nx += 2\ny, z := x, x\nx++\n_ = y + z");
    assert_eq!(stmts.len(), 5);
    assert!(matches!(
        stmts[0],
        Stmt::Assign {
            op: enumgen_scanner::SyntaxKind::ColonEqualsToken,
            ..
        }
    ));
    assert!(matches!(stmts[3], Stmt::IncDec { inc: true, .. }));
}

#[test]
fn parse_if_else_chain_with_init() {
    let stmts = body_of("if v, ok := m[k]; ok {\n\treturn\n} else if x > 0 {\n} else {\n}");
    let Stmt::If { init, els, .. } = &stmts[0] else {
        panic!("expected if statement");
    };
    assert!(init.is_some());
    assert!(matches!(els.as_deref(), Some(Stmt::If { .. })));
}

#[test]
fn parse_composite_literal_needs_parens_in_if_header() {
    let stmts = body_of("if x == (T{}) {\n}\nif ok {\n}");
    assert_eq!(stmts.len(), 2);
}

#[test]
fn parse_literal_type_composite_in_for_range_header() {
    let stmts = body_of("for _, v := range []int{1, 2} {\n\t_ = v\n}");
    let Stmt::Range { define, key, .. } = &stmts[0] else {
        panic!("expected range statement");
    };
    assert!(*define);
    assert!(key.is_some());
}

#[test]
fn parse_for_forms() {
    let stmts = body_of(
        "for {\n\tbreak\n}\nfor i < 10 {\n\ti++\n}\nfor i := 0; i < 10; i++ {\n\tcontinue\n}\nfor range ch {\n}",
    );
    assert_eq!(stmts.len(), 4);
    assert!(matches!(stmts[0], Stmt::For { cond: None, .. }));
    assert!(matches!(stmts[1], Stmt::For { cond: Some(_), .. }));
    assert!(matches!(
        stmts[2],
        Stmt::For {
            init: Some(_),
            post: Some(_),
            ..
        }
    ));
    assert!(matches!(stmts[3], Stmt::Range { key: None, .. }));
}

#[test]
fn parse_switch_statements() {
    let stmts = body_of(
        "switch v {\ncase 0, 1:\n\treturn\ncase 2:\n\tfallthrough\ndefault:\n}\n\
         switch t := x.(type) {\ncase int, []string:\ncase nil:\n}",
    );
    let Stmt::Switch { clauses, .. } = &stmts[0] else {
        panic!("expected switch");
    };
    assert_eq!(clauses.len(), 3);
    assert!(clauses[2].exprs.is_none());

    let Stmt::Switch { tag, .. } = &stmts[1] else {
        panic!("expected type switch");
    };
    let Some(tag) = tag.as_deref() else {
        panic!("expected tag");
    };
    let Stmt::Assign { rhs, .. } = tag else {
        panic!("expected assignment in type switch guard");
    };
    assert!(matches!(rhs[0].kind, ExprKind::TypeAssert { ty: None, .. }));
}

#[test]
fn parse_select_and_channel_operations() {
    let stmts = body_of(
        "select {\ncase v := <-in:\n\tout <- v\ncase <-done:\n\treturn\ndefault:\n}\ngo func() {}()\ndefer close(out)",
    );
    assert_eq!(stmts.len(), 3);
    let Stmt::Select { clauses } = &stmts[0] else {
        panic!("expected select");
    };
    assert_eq!(clauses.len(), 3);
    assert!(matches!(clauses[0].body[0], Stmt::Send { .. }));
    assert!(matches!(stmts[1], Stmt::Go(_)));
    assert!(matches!(stmts[2], Stmt::Defer(_)));
}

#[test]
fn parse_labels_and_goto() {
    let stmts = body_of("outer:\n\tfor {\n\t\tbreak outer\n\t}\n\tgoto outer");
    assert!(matches!(stmts[0], Stmt::Labeled { .. }));
    assert!(matches!(stmts[1], Stmt::Branch { label: Some(_), .. }));
}

#[test]
fn parse_local_declarations_and_func_literals() {
    let stmts = body_of(
        "const local = 3\nvar buf [local]byte\ntype pair struct{ a, b int }\nf := func(x int) int { return x * 2 }\n_ = f",
    );
    assert_eq!(stmts.len(), 5);
    assert!(matches!(stmts[0], Stmt::Decl(_)));
}

#[test]
fn parse_generated_style_methods() {
    let source = r#"package shirts

import (
	"encoding/json"
	"fmt"
)

var (
	_ShirtSizeNameToValue = map[string]ShirtSize{
		"NA": NA,
		"XS": XS,
	}

	_ShirtSizeValueToName = map[ShirtSize]string{
		NA: "NA",
		XS: "XS",
	}
)

func init() {
	var v ShirtSize
	if _, ok := interface{}(v).(fmt.Stringer); ok {
		_ShirtSizeNameToValue = map[string]ShirtSize{
			interface{}(NA).(fmt.Stringer).String(): NA,
		}
	}
}

// MarshalJSON is generated so ShirtSize satisfies json.Marshaler.
func (r ShirtSize) MarshalJSON() ([]byte, error) {
	if s, ok := interface{}(r).(fmt.Stringer); ok {
		return json.Marshal(s.String())
	}
	s, ok := _ShirtSizeValueToName[r]
	if !ok {
		return nil, fmt.Errorf("invalid ShirtSize: %d", r)
	}
	return json.Marshal(s)
}

func (r *ShirtSize) UnmarshalJSON(data []byte) error {
	var s string
	if err := json.Unmarshal(data, &s); err != nil {
		return fmt.Errorf("ShirtSize should be a string, got %s", data)
	}
	v, ok := _ShirtSizeNameToValue[s]
	if !ok {
		return fmt.Errorf("invalid ShirtSize %q", s)
	}
	*r = v
	return nil
}
"#;
    let (_, diagnostics) = parse_file("shirtsize_jsonenums.go", source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn parse_statement_error_is_reported() {
    let (_, diagnostics) = parse_file("test.go", "package p\nfunc f() {\n\tx := \n}\n");
    assert!(!diagnostics.is_empty());
}
