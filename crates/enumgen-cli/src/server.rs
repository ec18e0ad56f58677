//! HTTP service generating code from submitted Go source.
//!
//! `GET /generate?code=..&type=..&template=..` writes `code` to a scratch
//! package, analyzes it like the batch tool does and renders `type` with
//! the caller's handlebars template.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::Query;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use enumgen_checker::{
    DEFAULT_OUTPUT_SUFFIX, ExtractionError, LoadError, TypeCheckError, check_package, load_dir,
};
use enumgen_emitter::{RenderConfig, RenderError, RenderTarget, Renderer, Template};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Content type of generated source.
pub const GO_CONTENT_TYPE: &str = "text/x-go; charset=utf-8";

/// Name of the file the submitted code is written to.
const SCRATCH_FILE_NAME: &str = "main.go";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub template: String,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("only GET accepted")]
    MethodNotAllowed,

    #[error("no code to be parsed")]
    MissingCode,

    #[error("no type to be analyzed")]
    MissingType,

    #[error("no template to be executed")]
    MissingTemplate,

    #[error("create tmp dir: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("parse package: {0}")]
    Load(#[from] LoadError),

    #[error("parse package: {0}")]
    TypeCheck(#[from] TypeCheckError),

    #[error("find values: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("code generated is not valid: {errors}\n{text}")]
    InvalidOutput { errors: String, text: String },

    #[error("generation task failed: {0}")]
    Task(String),
}

impl ServiceError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::MissingCode
            | ServiceError::MissingType
            | ServiceError::MissingTemplate
            | ServiceError::InvalidOutput { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Render(RenderError::TemplateParse(_))
            | ServiceError::Render(RenderError::TemplateRender { .. }) => StatusCode::BAD_REQUEST,
            ServiceError::Scratch(_)
            | ServiceError::Load(_)
            | ServiceError::TypeCheck(_)
            | ServiceError::Extraction(_)
            | ServiceError::Render(_)
            | ServiceError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "generate failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "rejected request");
        }
        (status, self.to_string()).into_response()
    }
}

/// The service routes.
pub fn router() -> Router {
    Router::new().route("/generate", get(generate_handler).fallback(method_not_allowed))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, router())
        .await
        .context("server stopped")?;
    Ok(())
}

async fn generate_handler(Query(params): Query<GenerateParams>) -> Response {
    let result = tokio::task::spawn_blocking(move || generate_source(&params))
        .await
        .unwrap_or_else(|err| Err(ServiceError::Task(err.to_string())));
    match result {
        Ok(text) => ([(header::CONTENT_TYPE, GO_CONTENT_TYPE)], text).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn method_not_allowed() -> ServiceError {
    ServiceError::MethodNotAllowed
}

/// Run the whole pipeline for one request. The scratch directory is
/// removed when this returns, whatever the outcome.
pub fn generate_source(params: &GenerateParams) -> Result<String, ServiceError> {
    if params.code.is_empty() {
        return Err(ServiceError::MissingCode);
    }
    if params.type_name.is_empty() {
        return Err(ServiceError::MissingType);
    }
    if params.template.is_empty() {
        return Err(ServiceError::MissingTemplate);
    }

    let scratch = tempfile::Builder::new()
        .prefix("enumgen")
        .tempdir()
        .map_err(ServiceError::Scratch)?;
    std::fs::write(scratch.path().join(SCRATCH_FILE_NAME), &params.code)
        .map_err(ServiceError::Scratch)?;

    let files = load_dir(scratch.path(), DEFAULT_OUTPUT_SUFFIX)?;
    let package = check_package(files)?;
    let extraction = package.extract_type(&params.type_name)?;

    let template = Template::parse(&params.template)?;
    let config = RenderConfig {
        type_names: vec![params.type_name.clone()],
        command: format!("-type={}", params.type_name),
        ..RenderConfig::default()
    };
    let unit = Renderer::new(template).render(RenderTarget::new(&package, &extraction), &config)?;
    if !unit.is_valid() {
        return Err(ServiceError::InvalidOutput {
            errors: unit.syntax_diagnostics.join("\n"),
            text: unit.text,
        });
    }
    debug!(type_name = %params.type_name, bytes = unit.text.len(), "generated");
    Ok(unit.text)
}
