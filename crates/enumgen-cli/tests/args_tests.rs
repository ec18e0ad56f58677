use crate::args::{CLI_LONG_FLAGS, CliArgs, SERVER_LONG_FLAGS, ServerArgs, preprocess_args};
use clap::Parser;
use enumgen_emitter::{Format, KeyCase};
use std::ffi::OsString;
use std::path::PathBuf;

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(preprocess_args(os_args(args), CLI_LONG_FLAGS)).expect("valid args")
}

#[test]
fn go_style_flags_are_accepted() {
    let args = parse(&["enumgen", "-type=ShirtSize,WeekDay", "-suffix", "_enums", "pkg"]);
    assert_eq!(args.types, ["ShirtSize", "WeekDay"]);
    assert_eq!(args.suffix.as_deref(), Some("_enums"));
    assert_eq!(args.dirs, [PathBuf::from("pkg")]);
}

#[test]
fn double_dash_flags_and_value_enums() {
    let args = parse(&[
        "enumgen",
        "--type",
        "T",
        "--format=json,bson,text",
        "--case=lower",
        "--ignore-stringer",
    ]);
    assert_eq!(args.formats, Some(vec![Format::Json, Format::Bson, Format::Text]));
    assert_eq!(args.key_case, Some(KeyCase::Lower));
    assert!(args.ignore_stringer);
    assert!(args.dirs.is_empty());
}

#[test]
fn preprocessing_leaves_other_arguments_alone() {
    let processed = preprocess_args(
        os_args(&["enumgen", "-t", "T", "-type", "--case=upper", "-unknown", "dir"]),
        CLI_LONG_FLAGS,
    );
    assert_eq!(
        processed,
        os_args(&["enumgen", "-t", "T", "--type", "--case=upper", "-unknown", "dir"])
    );
}

#[test]
fn type_is_required() {
    assert!(CliArgs::try_parse_from(os_args(&["enumgen", "dir"])).is_err());
}

#[test]
fn directory_defaults_to_current_and_is_single() {
    assert_eq!(parse(&["enumgen", "-type=T"]).directory().expect("dir"), PathBuf::from("."));
    let err = parse(&["enumgen", "-type=T", "a", "b"])
        .directory()
        .expect_err("two dirs");
    assert_eq!(err.to_string(), "only one directory at a time");
}

#[test]
fn type_names_are_deduplicated_in_order() {
    let args = parse(&["enumgen", "-type=B,A,B"]);
    assert_eq!(args.type_names().expect("names"), ["B", "A"]);
    let args = parse(&["enumgen", "-type=A,,B"]);
    assert!(args.type_names().is_err());
}

#[test]
fn server_address_defaults_and_go_style_flag() {
    let args = ServerArgs::try_parse_from(os_args(&["enumgen-server"])).expect("defaults");
    assert_eq!(args.http.to_string(), "127.0.0.1:8080");
    let args = ServerArgs::try_parse_from(preprocess_args(
        os_args(&["enumgen-server", "-http=0.0.0.0:9000"]),
        SERVER_LONG_FLAGS,
    ))
    .expect("go style");
    assert_eq!(args.http.port(), 9000);
}
