//! Tests for constant extraction by type.
use crate::{EnumExtraction, ExtractionError, Package, check_package, load_sources};

fn package_of(files: &[(&str, &str)]) -> Package {
    let files = load_sources(
        "test",
        files
            .iter()
            .map(|(name, text)| ((*name).to_string(), (*text).to_string())),
        "",
    )
    .expect("sources parse");
    match check_package(files) {
        Ok(package) => package,
        Err(err) => panic!("unexpected type errors: {err}"),
    }
}

fn package(body: &str) -> Package {
    package_of(&[("a.go", &format!("package p\n\n{body}\n"))])
}

fn names(extraction: &EnumExtraction) -> Vec<(&str, i128)> {
    extraction
        .iter()
        .map(|n| (n.name.as_str(), n.value))
        .collect()
}

#[test]
fn extracts_iota_sequence_in_order() {
    let package = package(
        "type ShirtSize byte\n\nconst (\n\tNA ShirtSize = iota\n\tXS\n\tS\n\tM\n\tL\n\tXL\n)",
    );
    let extraction = package.extract_type("ShirtSize").expect("extraction");
    assert_eq!(
        names(&extraction),
        [("NA", 0), ("XS", 1), ("S", 2), ("M", 3), ("L", 4), ("XL", 5)]
    );
    let orders: Vec<usize> = extraction.iter().map(|n| n.order).collect();
    assert_eq!(orders, [0, 1, 2, 3, 4, 5]);
    assert!(extraction.iter().all(|n| n.type_name == "ShirtSize"));
}

#[test]
fn untyped_spec_with_values_resets_the_cursor() {
    let package = package(
        "type T int\n\nconst (\n\tA T = iota\n\tB\n\tC = 5\n\tD\n\tE T = 9\n\tF\n)",
    );
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("A", 0), ("B", 1), ("E", 9), ("F", 9)]);
}

#[test]
fn other_type_updates_the_cursor() {
    let package = package(
        "type T int\ntype U int\n\nconst (\n\tA T = 1\n\tB U = 2\n\tC\n)",
    );
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("A", 1)]);
    let other = package.extract_type("U").expect("extraction");
    assert_eq!(names(&other), [("B", 2), ("C", 2)]);
}

#[test]
fn each_block_starts_untyped() {
    let package = package("type T int\n\nconst (\n\tA T = 1\n)\n\nconst (\n\tB = 2\n)");
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("A", 1)]);
}

#[test]
fn blank_names_are_skipped() {
    let package = package("type T int\n\nconst (\n\t_ T = iota\n\tOne\n\t_\n\tThree\n)");
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("One", 1), ("Three", 3)]);
}

#[test]
fn aliases_are_kept_in_the_forward_sequence() {
    let package = package("type T int\n\nconst (\n\tA T = 0\n\tB T = 0\n)");
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("A", 0), ("B", 0)]);
}

#[test]
fn ungrouped_declarations_are_found() {
    let package = package("type T uint64\n\nconst Max T = 1<<64 - 1\n\nconst Min T = 0");
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(
        names(&extraction),
        [("Max", i128::from(u64::MAX)), ("Min", 0)]
    );
}

#[test]
fn qualified_types_never_match_bare_names() {
    let package = package(
        "import \"time\"\n\ntype Duration int\n\nconst (\n\tA Duration = 1\n\tB time.Duration = 2\n\tC\n)",
    );
    let extraction = package.extract_type("Duration").expect("extraction");
    assert_eq!(names(&extraction), [("A", 1)]);
}

#[test]
fn files_are_visited_in_name_order() {
    let package = package_of(&[
        ("b.go", "package p\n\nconst (\n\tLater T = 10\n)\n"),
        ("a.go", "package p\n\ntype T int\n\nconst Early T = 1\n"),
    ]);
    let extraction = package.extract_type("T").expect("extraction");
    assert_eq!(names(&extraction), [("Early", 1), ("Later", 10)]);
}

#[test]
fn no_values_is_an_error() {
    let package = package("type T int\n\nconst X = 1");
    let err = package.extract_type("T").expect_err("no values");
    assert_eq!(err, ExtractionError::NoValues("T".to_string()));
    assert_eq!(err.to_string(), "no values defined for type T");
}

#[test]
fn non_integer_types_are_rejected() {
    let package = package(
        "type F float64\ntype S string\n\nconst (\n\tHalf F = 0.5\n)\n\nconst (\n\tName S = \"x\"\n)",
    );
    let err = package.extract_type("F").expect_err("float type");
    assert_eq!(
        err,
        ExtractionError::Inspect(vec!["can't handle non-integer constant type F".to_string()])
    );
    assert_eq!(
        err.to_string(),
        "inspecting code:\n\tcan't handle non-integer constant type F"
    );
    assert!(package.extract_type("S").is_err());
}

#[test]
fn unknown_values_are_reported() {
    let package = package(
        "import \"time\"\n\ntype Timeout int64\n\nconst (\n\tFast Timeout = 1\n\tSlow Timeout = Timeout(time.Second)\n)",
    );
    let err = package.extract_type("Timeout").expect_err("unknown value");
    assert_eq!(
        err,
        ExtractionError::Inspect(vec!["no value for constant Slow".to_string()])
    );
}

#[test]
fn cgo_types_fail_only_their_own_extraction() {
    let package = package(
        "import \"C\"\n\ntype Native C.int\ntype Color int\n\nconst (\n\tA Native = 1\n\tB Native = A + 1\n)\n\nconst (\n\tRed Color = iota\n\tGreen\n)",
    );
    let err = package.extract_type("Native").expect_err("cgo type");
    assert_eq!(
        err,
        ExtractionError::Inspect(vec![
            "can't handle non-integer constant type Native".to_string(),
            "can't handle non-integer constant type Native".to_string(),
        ])
    );
    let colors = package.extract_type("Color").expect("Color extracts");
    assert_eq!(names(&colors), [("Red", 0), ("Green", 1)]);
}
