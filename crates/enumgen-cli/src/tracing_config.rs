//! Tracing configuration for the enumgen binaries.
//!
//! Supports three output formats controlled by `ENUMGEN_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Human-readable tree
//! ENUMGEN_LOG=debug ENUMGEN_LOG_FORMAT=tree enumgen -type=ShirtSize
//!
//! # JSON (for tooling or sharing full traces)
//! ENUMGEN_LOG=debug ENUMGEN_LOG_FORMAT=json enumgen -type=ShirtSize
//!
//! # Fine-grained filtering
//! ENUMGEN_LOG="enumgen_checker=trace,enumgen_emitter=debug" enumgen -type=ShirtSize
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the `ENUMGEN_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("ENUMGEN_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `ENUMGEN_LOG`, falling back to `RUST_LOG`
/// and then to `default_filter`.
fn build_filter(default_filter: Option<&str>) -> Option<EnvFilter> {
    if let Ok(val) = std::env::var("ENUMGEN_LOG") {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    if std::env::var("RUST_LOG").is_ok() {
        return Some(EnvFilter::from_default_env());
    }
    default_filter.map(|filter| EnvFilter::builder().parse_lossy(filter))
}

/// Initialise the global tracing subscriber.
///
/// Without `ENUMGEN_LOG` or `RUST_LOG` only `default_filter` applies; with
/// no default either, nothing is installed. Output goes to stderr.
pub fn init_tracing(default_filter: Option<&str>) {
    let Some(filter) = build_filter(default_filter) else {
        return;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
