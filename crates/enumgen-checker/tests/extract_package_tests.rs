//! End-to-end tests: load a package directory, check it and extract types.

use std::fs;

use enumgen_checker::{
    DEFAULT_OUTPUT_SUFFIX, ExtractionError, LoadError, check_package, load_dir,
};

const SHIRT_SIZE: &str = r#"package shirts

import "fmt"

type ShirtSize byte

const (
	NA ShirtSize = iota
	XS
	S
	M
	L
	XL
)

type WeekDay int

const (
	Monday WeekDay = iota
	Tuesday
	Wednesday
	Thursday
	Friday
	Saturday
	Sunday
)

func (d WeekDay) String() string {
	switch d {
	case Monday:
		return "Dilluns"
	case Tuesday:
		return "Dimarts"
	}
	return fmt.Sprintf("WeekDay(%d)", int(d))
}
"#;

#[test]
fn loads_checks_and_extracts_a_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("shirtsize.go"), SHIRT_SIZE).expect("write source");
    fs::write(
        dir.path().join("shirtsize_jsonenums.go"),
        "this is stale generated output and must be skipped",
    )
    .expect("write generated");

    let files = load_dir(dir.path(), DEFAULT_OUTPUT_SUFFIX).expect("load");
    let package = check_package(files).expect("type check");
    assert_eq!(package.name(), "shirts");

    let sizes = package.extract_type("ShirtSize").expect("ShirtSize");
    let names: Vec<&str> = sizes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["NA", "XS", "S", "M", "L", "XL"]);

    let days = package.extract_type("WeekDay").expect("WeekDay");
    assert_eq!(days.len(), 7);
    assert!(package.stringer_facts("WeekDay").is_stringer);
    assert!(!package.stringer_facts("ShirtSize").defines_string);

    let missing = package.extract_type("Color").expect_err("no Color values");
    assert!(matches!(missing, ExtractionError::NoValues(_)));
}

#[test]
fn type_errors_stop_the_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("bad.go"),
        "package bad\n\ntype T uint8\n\nconst Big T = 1000\n",
    )
    .expect("write source");

    let files = load_dir(dir.path(), DEFAULT_OUTPUT_SUFFIX).expect("load");
    let err = check_package(files).expect_err("overflow");
    assert_eq!(err.package, "bad");
    assert!(err.to_string().contains("bad.go:5:15: cannot use 1000 as T value (overflows)"));
}

#[test]
fn empty_directory_has_no_buildable_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_dir(dir.path(), DEFAULT_OUTPUT_SUFFIX).expect_err("empty");
    assert!(matches!(err, LoadError::NoBuildableFiles(_)));
}
