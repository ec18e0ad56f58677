//! Tests for rendering Go source from extractions.
use crate::{
    Format, GeneratedUnit, KeyCase, RenderConfig, RenderError, RenderTarget, Renderer, Template,
    key_value_padding, tidy,
};
use enumgen_checker::{Package, check_package, load_sources};

const SHIRTS: &str = r#"package shirts

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
)

func (d WeekDay) String() string {
	switch d {
	case Monday:
		return "lun"
	}
	return "mar"
}

type Level int

const (
	Low Level = 1
	Minimum Level = 1
	High Level = 2
)

func (l *Level) String() string { return "" }
"#;

fn package() -> Package {
    let files = load_sources("shirts", [("shirts.go".to_string(), SHIRTS.to_string())], "")
        .expect("sources parse");
    match check_package(files) {
        Ok(package) => package,
        Err(err) => panic!("unexpected type errors: {err}"),
    }
}

fn renderer() -> Renderer {
    Renderer::new(Template::builtin().expect("built-in template"))
}

fn render(type_name: &str, config: &RenderConfig) -> GeneratedUnit {
    let package = package();
    let extraction = package.extract_type(type_name).expect("extraction");
    renderer()
        .render(RenderTarget::new(&package, &extraction), config)
        .expect("render")
}

fn config(formats: &[Format]) -> RenderConfig {
    RenderConfig {
        formats: formats.to_vec(),
        command: "-type=ShirtSize".to_string(),
        ..RenderConfig::default()
    }
}

fn has_line(unit: &GeneratedUnit, line: &str) -> bool {
    unit.text.lines().any(|l| l == line)
}

#[test]
fn renders_json_methods_for_plain_type() {
    let unit = render("ShirtSize", &config(&[Format::Json]));
    assert!(unit.is_valid(), "{:?}\n{}", unit.syntax_diagnostics, unit.text);
    assert_eq!(unit.file_name, "shirtsize_jsonenums.go");
    assert_eq!(unit.type_name, "ShirtSize");
    assert!(unit.text.starts_with(
        "// Code generated by enumgen -type=ShirtSize; DO NOT EDIT.\n\npackage shirts\n"
    ));
    assert!(has_line(&unit, "\t\"encoding/json\""));
    assert!(has_line(&unit, "\t\"fmt\""));
    assert!(!unit.text.contains("\"strings\""));
    assert!(has_line(&unit, "\t\t\"XL\": XL,"));
    assert!(has_line(&unit, "\t\tNA: \"NA\","));
    assert!(has_line(&unit, "func (r ShirtSize) MarshalJSON() ([]byte, error) {"));
    assert!(has_line(&unit, "func (r *ShirtSize) UnmarshalJSON(data []byte) error {"));
    assert!(unit.text.contains("fmt.Errorf(\"invalid ShirtSize: %d\", r)"));
    assert!(unit.text.contains("fmt.Errorf(\"ShirtSize should be a string, got %s\", data)"));
    assert!(unit.text.contains("fmt.Errorf(\"invalid ShirtSize %q\", s)"));
    assert!(!unit.text.contains("func init()"));
    assert!(!unit.text.contains("String() string"));
    assert!(!unit.text.contains("GetBSON"));
    assert!(unit.text.ends_with("}\n"));
}

#[test]
fn renders_bson_and_text() {
    let unit = render("ShirtSize", &config(&[Format::Text, Format::Bson]));
    assert!(unit.is_valid(), "{:?}\n{}", unit.syntax_diagnostics, unit.text);
    assert!(has_line(&unit, "func (r ShirtSize) GetBSON() (interface{}, error) {"));
    assert!(has_line(&unit, "func (r *ShirtSize) SetBSON(raw bson.Raw) error {"));
    assert!(has_line(&unit, "\t\"gopkg.in/mgo.v2/bson\""));
    assert!(has_line(&unit, "func (r ShirtSize) String() string {"));
    assert!(unit.text.contains("return fmt.Sprintf(\"ShirtSize(%d)\", r)"));
    assert!(!unit.text.contains("MarshalJSON"));
    assert!(!unit.text.contains("encoding/json"));
}

#[test]
fn existing_stringer_drives_encoding() {
    let unit = render("WeekDay", &config(&[Format::Json, Format::Text]));
    assert!(unit.is_valid(), "{:?}\n{}", unit.syntax_diagnostics, unit.text);
    assert!(has_line(&unit, "func init() {"));
    assert!(has_line(&unit, "\t\t_WeekDayNameToValue[v.String()] = v"));
    assert!(
        unit.text.contains(
            "\tfor _, v := range []WeekDay{\n\t\tMonday,\n\t\tTuesday,\n\t} {\n"
        ),
        "{}",
        unit.text
    );
    assert!(has_line(&unit, "\treturn r.String(), nil"));
    assert!(!unit.text.contains("func (r WeekDay) String()"));
}

#[test]
fn ignore_stringer_uses_the_tables() {
    let config = RenderConfig {
        ignore_stringer: true,
        ..config(&[Format::Json])
    };
    let unit = render("WeekDay", &config);
    assert!(unit.is_valid());
    assert!(!unit.text.contains("func init()"));
    assert!(unit.text.contains("_WeekDayValueToName[r]"));
}

#[test]
fn pointer_string_method_is_not_a_stringer_but_blocks_generation() {
    let unit = render("Level", &config(&[Format::Json, Format::Text]));
    assert!(unit.is_valid(), "{:?}\n{}", unit.syntax_diagnostics, unit.text);
    assert!(!unit.text.contains("func init()"));
    assert!(!unit.text.contains("func (r Level) String()"));
    assert!(has_line(&unit, "\t\t\"Minimum\": Minimum,"));
    assert!(has_line(&unit, "\t\tLow:  \"Low\","));
    assert!(!has_line(&unit, "\t\tMinimum: \"Minimum\","));
}

#[test]
fn key_case_imports_strings() {
    let config = RenderConfig {
        key_case: KeyCase::Lower,
        ..config(&[Format::Json])
    };
    let unit = render("ShirtSize", &config);
    assert!(unit.is_valid());
    assert!(has_line(&unit, "\t\"strings\""));
    assert!(has_line(&unit, "\t\t\"xl\": XL,"));
    assert!(unit.text.contains("_ShirtSizeNameToValue[strings.ToLower(s)]"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render("ShirtSize", &config(&[Format::Json, Format::Bson]));
    let second = render("ShirtSize", &config(&[Format::Json, Format::Bson]));
    assert_eq!(first.text, second.text);
    assert_eq!(tidy(&first.text), first.text);
}

#[test]
fn empty_format_list_is_rejected() {
    let package = package();
    let extraction = package.extract_type("ShirtSize").expect("extraction");
    let err = renderer()
        .render(RenderTarget::new(&package, &extraction), &config(&[]))
        .expect_err("no formats");
    assert!(matches!(err, RenderError::NoFormats { .. }));
}

#[test]
fn custom_templates_see_the_same_context() {
    let template = Template::parse(
        "package {{package_name}}\n\n// {{lower type_name}}: {{#each values}}{{this}} {{/each}}\n",
    )
    .expect("template");
    let package = package();
    let extraction = package.extract_type("Level").expect("extraction");
    let unit = Renderer::new(template)
        .render(RenderTarget::new(&package, &extraction), &config(&[Format::Json]))
        .expect("render");
    assert_eq!(unit.text, "package shirts\n\n// level: Low Minimum High\n");
    assert!(unit.is_valid());
}

#[test]
fn invalid_output_is_reported_not_fatal() {
    let template = Template::parse("package {{package_name}}\n\nfunc {\n").expect("template");
    let package = package();
    let extraction = package.extract_type("Level").expect("extraction");
    let unit = Renderer::new(template)
        .render(RenderTarget::new(&package, &extraction), &config(&[Format::Json]))
        .expect("render");
    assert!(!unit.is_valid());
    assert!(unit.syntax_diagnostics[0].starts_with("level_jsonenums.go:3:"));
}

#[test]
fn template_errors() {
    assert!(matches!(
        Template::parse("{{#each values}}unclosed"),
        Err(RenderError::TemplateParse(_))
    ));
    let template = Template::parse("{{missing_helper type_name}}").expect("template");
    let package = package();
    let extraction = package.extract_type("Level").expect("extraction");
    let err = Renderer::new(template)
        .render(RenderTarget::new(&package, &extraction), &config(&[Format::Json]))
        .expect_err("unknown helper");
    assert!(matches!(err, RenderError::TemplateRender { .. }));
}

#[test]
fn stringer_init_walks_values_in_declaration_order() {
    const ALIASED: &str = r#"package cards

type Suit int

const (
	Spades Suit = iota
	Hearts
	Clubs
	Coeur = Hearts
)

func (s Suit) String() string { return "suit" }
"#;
    let files = load_sources("cards", [("cards.go".to_string(), ALIASED.to_string())], "")
        .expect("sources parse");
    let package = check_package(files).expect("type checks");
    let extraction = package.extract_type("Suit").expect("extraction");
    let config = RenderConfig {
        key_case: KeyCase::Lower,
        ..config(&[Format::Json])
    };
    let unit = renderer()
        .render(RenderTarget::new(&package, &extraction), &config)
        .expect("render");
    assert!(unit.is_valid(), "{:?}\n{}", unit.syntax_diagnostics, unit.text);
    // Every String() collides; the last value in declaration order wins,
    // as in the codec model.
    assert!(unit.text.contains(
        "\tfor _, v := range []Suit{\n\t\tSpades,\n\t\tCoeur,\n\t\tClubs,\n\t} {\n\t\t_SuitNameToValue[strings.ToLower(v.String())] = v\n\t}\n"
    ), "{}", unit.text);
    assert!(!unit.text.contains("range _SuitValueToName"));
}

#[test]
fn lookup_tables_are_column_aligned() {
    let unit = render("ShirtSize", &config(&[Format::Json]));
    let expected = "var (
\t_ShirtSizeNameToValue = map[string]ShirtSize{
\t\t\"NA\": NA,
\t\t\"XS\": XS,
\t\t\"S\":  S,
\t\t\"M\":  M,
\t\t\"L\":  L,
\t\t\"XL\": XL,
\t}

\t_ShirtSizeValueToName = map[ShirtSize]string{
\t\tNA: \"NA\",
\t\tXS: \"XS\",
\t\tS:  \"S\",
\t\tM:  \"M\",
\t\tL:  \"L\",
\t\tXL: \"XL\",
\t}
)
";
    assert!(unit.text.contains(expected), "{}", unit.text);
}

#[test]
fn key_value_padding_follows_gofmt_sections() {
    assert_eq!(key_value_padding(&["\"A\""]), [" "]);
    assert_eq!(key_value_padding(&["a", "bcd", "ef"]), ["   ", " ", "  "]);
    // Keys over 40 bytes that differ a lot from the running mean start
    // a new alignment section.
    let long = "L".repeat(60);
    assert_eq!(
        key_value_padding(&["ab", "cd", long.as_str(), "ef"]),
        [" ", " ", " ", " "]
    );
    let similar = ["K".repeat(45), "K".repeat(50)];
    assert_eq!(key_value_padding(&similar), ["      ", " "]);
}

#[test]
fn tidy_keeps_raw_strings_intact() {
    let source = "package p\n\nconst doc = `line one   \n\n\n\nline two`  \n\n\n\nvar x = 1\n";
    assert_eq!(
        tidy(source),
        "package p\n\nconst doc = `line one   \n\n\n\nline two`\n\nvar x = 1\n"
    );
    let nested = "var (\n\thelp = `\n\n  usage:   \n`\n)\n";
    assert_eq!(tidy(nested), nested);
}

#[test]
fn tidy_normalizes_blank_lines() {
    assert_eq!(tidy("\n\na  \n\n\n\nb\n\n"), "a\n\nb\n");
    assert_eq!(tidy("x {\n\n\ty\n\n}\n"), "x {\n\ty\n}\n");
    assert_eq!(tidy("var (\n\n\ta = 1\n\n\tb = 2\n)"), "var (\n\ta = 1\n\n\tb = 2\n)\n");
}

#[test]
fn config_serializes_in_camel_case() {
    let config = RenderConfig {
        type_names: vec!["T".to_string()],
        formats: vec![Format::Json, Format::Bson],
        key_case: KeyCase::Upper,
        ..RenderConfig::default()
    };
    let json = serde_json::to_value(&config).expect("serialize");
    assert_eq!(json["typeNames"][0], "T");
    assert_eq!(json["formats"][1], "bson");
    assert_eq!(json["keyCase"], "upper");
    assert_eq!(json["outputSuffix"], "_jsonenums");
    assert_eq!(json["ignoreStringer"], false);
}
