//! Requests against the `/generate` router.

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use enumgen_cli::server::{GO_CONTENT_TYPE, GenerateParams, ServiceError, generate_source, router};
use tower::ServiceExt;

const CODE: &str = include_str!("fixtures/shirtsize.go");

const TEMPLATE: &str =
    "package {{package_name}}\n\nvar _{{type_name}}Names = []string{ {{#each values}}\"{{this}}\", {{/each}} }\n";

/// Percent-encode a query parameter value.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn uri(params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={}", encode(value)))
        .collect();
    format!("/generate?{}", query.join("&"))
}

async fn send(method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router().oneshot(request).await.expect("response");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, content_type, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn generates_with_the_caller_template() {
    let (status, content_type, body) = send(
        Method::GET,
        &uri(&[("code", CODE), ("type", "ShirtSize"), ("template", TEMPLATE)]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(content_type.as_deref(), Some(GO_CONTENT_TYPE));
    assert_eq!(
        body,
        "package main\n\nvar _ShirtSizeNames = []string{ \"NA\", \"XS\", \"S\", \"M\", \"L\", \"XL\",  }\n"
    );
}

#[tokio::test]
async fn only_get_is_accepted() {
    let (status, _, body) = send(Method::POST, "/generate").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "only GET accepted");
}

#[tokio::test]
async fn missing_parameters_are_bad_requests() {
    let (status, _, body) = send(Method::GET, "/generate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "no code to be parsed");

    let (status, _, body) = send(Method::GET, &uri(&[("code", CODE)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "no type to be analyzed");

    let (status, _, body) = send(Method::GET, &uri(&[("code", CODE), ("type", "ShirtSize")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "no template to be executed");
}

#[tokio::test]
async fn template_failures_are_bad_requests() {
    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", CODE), ("type", "ShirtSize"), ("template", "{{#each values}}")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("parse template:"), "{body}");

    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", CODE), ("type", "ShirtSize"), ("template", "{{nope type_name}}")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("execute template for ShirtSize:"), "{body}");
}

#[tokio::test]
async fn invalid_generated_code_is_a_bad_request() {
    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", CODE), ("type", "ShirtSize"), ("template", "package {{package_name}}\nfunc {")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("code generated is not valid: "), "{body}");
    assert!(body.ends_with("package main\nfunc {\n"), "{body}");
}

#[tokio::test]
async fn analysis_failures_are_internal_errors() {
    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", "package main\n\nconst X = Y\n"), ("type", "T"), ("template", TEMPLATE)]),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("parse package: "), "{body}");
    assert!(body.contains("main.go:3:11: undefined: Y"), "{body}");

    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", CODE), ("type", "Color"), ("template", TEMPLATE)]),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "find values: no values defined for type Color");

    let (status, _, body) = send(
        Method::GET,
        &uri(&[("code", "package main\nfunc {"), ("type", "T"), ("template", TEMPLATE)]),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("parse package: couldn't load package:"), "{body}");
}

#[test]
fn pipeline_runs_without_the_router() {
    let params = GenerateParams {
        code: CODE.to_string(),
        type_name: "WeekDay".to_string(),
        template: "package {{package_name}}\n\n// {{lower type_name}} {{upper package_name}}\n".to_string(),
    };
    assert_eq!(
        generate_source(&params).expect("generated"),
        "package main\n\n// weekday MAIN\n"
    );

    let err = generate_source(&GenerateParams::default()).expect_err("empty");
    assert!(matches!(err, ServiceError::MissingCode));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
