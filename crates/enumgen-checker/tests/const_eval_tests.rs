//! Tests for constant expression evaluation.
use crate::{BasicKind, ConstValue, Package, Type, TypeCheckError, check_package, load_sources};
use enumgen_common::diagnostic_codes;

fn check(source: &str) -> Result<Package, TypeCheckError> {
    let files = load_sources("test", [("a.go".to_string(), source.to_string())], "")
        .expect("source parses");
    check_package(files)
}

fn package(body: &str) -> Package {
    let source = format!("package p\n\n{body}\n");
    match check(&source) {
        Ok(package) => package,
        Err(err) => panic!("unexpected type errors: {err}\n{source}"),
    }
}

fn int_value(package: &Package, name: &str) -> i128 {
    match package.constant_named(name).map(|c| &c.value) {
        Some(ConstValue::Int(v)) => *v,
        other => panic!("{name}: expected integer constant, got {other:?}"),
    }
}

fn error_codes(body: &str) -> Vec<u32> {
    let source = format!("package p\n\n{body}\n");
    match check(&source) {
        Ok(_) => panic!("expected type errors in:\n{source}"),
        Err(err) => err.report.diagnostics.iter().map(|d| d.code).collect(),
    }
}

#[test]
fn iota_and_implicit_repetition() {
    let package = package(
        "type Weekday int\n\nconst (\n\tSunday Weekday = iota\n\tMonday\n\tTuesday\n\t_\n\tThursday\n)",
    );
    assert_eq!(int_value(&package, "Sunday"), 0);
    assert_eq!(int_value(&package, "Monday"), 1);
    assert_eq!(int_value(&package, "Tuesday"), 2);
    assert_eq!(int_value(&package, "Thursday"), 4);
    let monday = package.constant_named("Monday").expect("Monday");
    assert_eq!(monday.ty, Type::Named("Weekday".to_string()));
}

#[test]
fn repetition_carries_expression_and_type() {
    let package = package("type T int\n\nconst (\n\tA T = 1\n\tB\n)");
    assert_eq!(int_value(&package, "B"), 1);
    assert_eq!(
        package.constant_named("B").map(|c| c.ty.clone()),
        Some(Type::Named("T".to_string()))
    );
}

#[test]
fn repetition_of_expression_lists() {
    let package = package(
        "const (\n\tKB, KiB = 1 << (10 * (iota + 1)), 1000 * (iota + 1)\n\tMB, MiB\n)",
    );
    assert_eq!(int_value(&package, "KB"), 1024);
    assert_eq!(int_value(&package, "KiB"), 1000);
    assert_eq!(int_value(&package, "MB"), 1 << 20);
    assert_eq!(int_value(&package, "MiB"), 2000);
}

#[test]
fn arithmetic_and_bitwise_operators() {
    let package = package(
        "const (\n\tA = 7 / 2\n\tB = 7 % 3\n\tC = 6 &^ 3\n\tD = -8 >> 1\n\tE = 0x0F | 0xF0\n\tF = 5 ^ 1\n\tG = (2 + 3) * 4\n)",
    );
    assert_eq!(int_value(&package, "A"), 3);
    assert_eq!(int_value(&package, "B"), 1);
    assert_eq!(int_value(&package, "C"), 4);
    assert_eq!(int_value(&package, "D"), -4);
    assert_eq!(int_value(&package, "E"), 0xFF);
    assert_eq!(int_value(&package, "F"), 4);
    assert_eq!(int_value(&package, "G"), 20);
}

#[test]
fn references_across_declarations_in_any_order() {
    let package = package("const Last = First + 10\n\nconst First = 5");
    assert_eq!(int_value(&package, "Last"), 15);
}

#[test]
fn literal_forms() {
    let package = package(
        "const (\n\tHex = 0xFF\n\tOct = 0o17\n\tLegacy = 017\n\tBin = 0b1010\n\tSep = 1_000_000\n\tRune = 'a'\n\tEscaped = '\\n'\n)",
    );
    assert_eq!(int_value(&package, "Hex"), 255);
    assert_eq!(int_value(&package, "Oct"), 15);
    assert_eq!(int_value(&package, "Legacy"), 15);
    assert_eq!(int_value(&package, "Bin"), 10);
    assert_eq!(int_value(&package, "Sep"), 1_000_000);
    assert_eq!(int_value(&package, "Rune"), 97);
    assert_eq!(int_value(&package, "Escaped"), 10);
}

#[test]
fn untyped_float_converts_exactly_to_integers() {
    let package = package("type T int\n\nconst (\n\tA T = 1e3\n\tB = 2.5 * 2\n\tC int = B\n)");
    assert_eq!(int_value(&package, "A"), 1000);
    assert_eq!(int_value(&package, "C"), 5);
}

#[test]
fn unsigned_complement_masks_to_width() {
    let package = package("const (\n\tMax uint8 = ^uint8(0)\n\tAll = ^0\n)");
    assert_eq!(int_value(&package, "Max"), 255);
    assert_eq!(int_value(&package, "All"), -1);
}

#[test]
fn strings_len_and_conversions() {
    let package = package(
        "type Kind int\n\nconst (\n\tName = \"abc\" + \"de\"\n\tN = len(Name)\n\tK = Kind(N)\n\tLetter = string(rune(65))\n\tBig = max(1, 7, 3)\n\tSmall = min(4.0, 2)\n)",
    );
    assert_eq!(
        package.constant_named("Name").map(|c| c.value.clone()),
        Some(ConstValue::String("abcde".to_string()))
    );
    assert_eq!(int_value(&package, "N"), 5);
    assert_eq!(
        package.constant_named("N").map(|c| c.ty.clone()),
        Some(Type::Basic(BasicKind::Int))
    );
    assert_eq!(int_value(&package, "K"), 5);
    assert_eq!(
        package.constant_named("Letter").map(|c| c.value.clone()),
        Some(ConstValue::String("A".to_string()))
    );
    assert_eq!(int_value(&package, "Big"), 7);
    assert_eq!(
        package.constant_named("Small").map(|c| c.value.clone()),
        Some(ConstValue::Float(2.0))
    );
}

#[test]
fn comparisons_produce_untyped_bools() {
    let package = package("const (\n\tLess = 1 < 2\n\tSame = \"a\" == \"b\"\n\tBoth = Less && !Same\n)");
    let both = package.constant_named("Both").expect("Both");
    assert_eq!(both.value, ConstValue::Bool(true));
    assert_eq!(both.ty, Type::Basic(BasicKind::UntypedBool));
}

#[test]
fn imported_values_are_unknown() {
    let package = package(
        "import \"time\"\n\ntype Timeout int64\n\nconst (\n\tShort Timeout = Timeout(time.Second)\n\tWide = time.Hour * 2\n)",
    );
    let short = package.constant_named("Short").expect("Short");
    assert!(short.value.is_unknown());
    assert_eq!(short.ty, Type::Named("Timeout".to_string()));
    assert!(package.constant_named("Wide").expect("Wide").value.is_unknown());
}

#[test]
fn math_integer_limits() {
    let package = package(
        "import \"math\"\n\ntype T int64\n\nconst (\n\tA T = math.MaxInt32\n\tB T = math.MinInt64\n\tC = math.MaxUint16 + 1\n\tD uint64 = math.MaxUint64\n\tE = math.Pi\n)",
    );
    assert_eq!(int_value(&package, "A"), i128::from(i32::MAX));
    assert_eq!(int_value(&package, "B"), i128::from(i64::MIN));
    assert_eq!(int_value(&package, "C"), 65536);
    assert_eq!(int_value(&package, "D"), i128::from(u64::MAX));
    let c = package.constant_named("C").expect("C");
    assert_eq!(c.ty, Type::Basic(BasicKind::UntypedInt));
    assert!(package.constant_named("E").expect("E").value.is_unknown());
}

#[test]
fn math_limits_are_range_checked() {
    let codes = error_codes("import \"math\"\n\nconst A int8 = math.MaxInt16");
    assert_eq!(codes, vec![diagnostic_codes::CONSTANT_OVERFLOWS]);
}

#[test]
fn math_limits_follow_the_local_import_name() {
    let package = package(
        "import m \"math\"\nimport other \"example.com/math\"\n\nconst (\n\tA = m.MaxInt8\n\tB = other.MaxInt8\n)",
    );
    assert_eq!(int_value(&package, "A"), 127);
    assert!(package.constant_named("B").expect("B").value.is_unknown());
}

#[test]
fn unsafe_sizeof_basic_types() {
    let package = package(
        "import \"unsafe\"\n\ntype Small int16\n\nconst (\n\tA = unsafe.Sizeof(int32(0))\n\tB = unsafe.Sizeof(Small(1))\n\tC = unsafe.Sizeof(\"text\")\n\tD = unsafe.Sizeof(1)\n\tE = unsafe.Sizeof(true)\n)",
    );
    assert_eq!(int_value(&package, "A"), 4);
    assert_eq!(int_value(&package, "B"), 2);
    assert_eq!(int_value(&package, "C"), 16);
    assert_eq!(int_value(&package, "D"), 8);
    assert_eq!(int_value(&package, "E"), 1);
    let a = package.constant_named("A").expect("A");
    assert_eq!(a.ty, Type::Basic(BasicKind::Uintptr));
}

#[test]
fn unsafe_sizeof_of_variables_is_unknown() {
    let package = package(
        "import \"unsafe\"\n\nvar x struct{ a, b int64 }\n\nconst A = unsafe.Sizeof(x)",
    );
    assert!(package.constant_named("A").expect("A").value.is_unknown());
}

#[test]
fn overflow_and_truncation() {
    assert_eq!(
        error_codes("const X uint8 = 256"),
        [diagnostic_codes::CONSTANT_OVERFLOWS]
    );
    assert_eq!(
        error_codes("const X int8 = -129"),
        [diagnostic_codes::CONSTANT_OVERFLOWS]
    );
    assert_eq!(
        error_codes("const X uint = 1\nconst Y = X - 2"),
        [diagnostic_codes::CONSTANT_OVERFLOWS]
    );
    assert_eq!(
        error_codes("const X int = 1.5"),
        [diagnostic_codes::CONSTANT_TRUNCATED]
    );
    assert_eq!(
        error_codes("const X = int(2.5)"),
        [diagnostic_codes::CONSTANT_TRUNCATED]
    );
    assert_eq!(
        error_codes("const X = 1 << 200"),
        [diagnostic_codes::INVALID_SHIFT_COUNT]
    );
    assert_eq!(
        error_codes("const X = 1 << 127"),
        [diagnostic_codes::CONSTANT_OVERFLOWS]
    );
}

#[test]
fn overflow_message_names_expression_and_type() {
    let err = check("package p\n\nconst X uint8 = 300\n").expect_err("overflow");
    assert_eq!(
        err.report.lines(),
        ["a.go:3:17: cannot use 300 as uint8 value (overflows)"]
    );
}

#[test]
fn operator_errors() {
    assert_eq!(
        error_codes("const X = 1 / 0"),
        [diagnostic_codes::DIVISION_BY_ZERO]
    );
    assert_eq!(
        error_codes("const X = 1.5 % 2"),
        [diagnostic_codes::OPERATOR_NOT_DEFINED]
    );
    assert_eq!(
        error_codes("const X = \"a\" - \"b\""),
        [diagnostic_codes::OPERATOR_NOT_DEFINED]
    );
    assert_eq!(
        error_codes("const X = 1 << -1"),
        [diagnostic_codes::INVALID_SHIFT_COUNT]
    );
    assert_eq!(
        error_codes("const X = \"a\" + 1"),
        [diagnostic_codes::MISMATCHED_TYPES]
    );
}

#[test]
fn mismatched_typed_operands() {
    assert_eq!(
        error_codes("type A int\ntype B int\n\nconst (\n\tX A = 1\n\tY B = 2\n\tZ = X + Y\n)"),
        [diagnostic_codes::MISMATCHED_TYPES]
    );
    assert_eq!(
        error_codes("type A int\n\nconst X A = 1\nconst Y int = X"),
        [diagnostic_codes::CANNOT_USE_AS_VALUE]
    );
}

#[test]
fn alias_types_are_identical_to_their_target() {
    let package = package("type Code = int\n\nconst (\n\tA Code = 1\n\tB int = A + 1\n)");
    assert_eq!(int_value(&package, "B"), 2);
}

#[test]
fn non_constant_operands() {
    assert_eq!(
        error_codes("var v = 1\n\nconst X = v"),
        [diagnostic_codes::NOT_CONSTANT]
    );
    assert_eq!(
        error_codes("func f() int { return 1 }\n\nconst X = f()"),
        [diagnostic_codes::NOT_CONSTANT]
    );
    assert_eq!(
        error_codes("type T int\n\nconst X = T"),
        [diagnostic_codes::NOT_AN_EXPRESSION]
    );
    assert_eq!(
        error_codes("const X = Missing + 1"),
        [diagnostic_codes::UNDEFINED]
    );
    assert_eq!(
        error_codes("const X = int(1, 2)"),
        [diagnostic_codes::WRONG_ARGUMENT_COUNT]
    );
}

#[test]
fn initialization_cycles() {
    assert_eq!(
        error_codes("const A = B\nconst B = A"),
        [diagnostic_codes::INITIALIZATION_CYCLE]
    );
    assert_eq!(
        error_codes("const X = X + 1"),
        [diagnostic_codes::INITIALIZATION_CYCLE]
    );
}

#[test]
fn spec_shape_errors() {
    assert_eq!(
        error_codes("const (\n\tA, B = 1\n)"),
        [diagnostic_codes::MISSING_INIT_EXPR]
    );
    assert_eq!(
        error_codes("const (\n\tA = 1, 2\n)"),
        [diagnostic_codes::EXTRA_INIT_EXPR]
    );
    assert_eq!(
        error_codes("const (\n\tA\n)"),
        [diagnostic_codes::MISSING_INIT_EXPR]
    );
    assert_eq!(
        error_codes("const (\n\tA = 1\n\tB int\n)"),
        [diagnostic_codes::TYPE_WITHOUT_EXPRESSION]
    );
}

#[test]
fn invalid_constant_types() {
    assert_eq!(
        error_codes("type S struct{}\n\nconst X S = 1"),
        [diagnostic_codes::INVALID_CONSTANT_TYPE]
    );
    assert_eq!(
        error_codes("const X []int = 1"),
        [diagnostic_codes::INVALID_CONSTANT_TYPE]
    );
}

#[test]
fn local_constants_are_not_package_constants() {
    let package = package("func f() {\n\tconst Local = 1\n\t_ = Local\n}");
    assert!(package.constant_named("Local").is_none());
}

#[test]
fn types_over_imported_types_have_unknown_values() {
    let package = package(
        "import \"time\"\n\ntype Wait time.Duration\n\nconst (\n\tA Wait = 5\n\tB = A * 2\n\tC = -A\n\tD = A < B\n\tE = Wait(3)\n\tF = A << 2\n)",
    );
    for name in ["A", "B", "C", "E", "F"] {
        let object = package.constant_named(name).expect(name);
        assert!(object.value.is_unknown(), "{name}");
        assert_eq!(object.ty, Type::Named("Wait".to_string()), "{name}");
    }
    assert!(package.constant_named("D").expect("D").value.is_unknown());
}
