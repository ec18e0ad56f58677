//! Batch tool and HTTP service for enumgen.
//!
//! - `args` - clap arguments of both binaries
//! - `config` - `enumgen.json` defaults merged with the flags
//! - `driver` - load, check, generate in parallel, then write
//! - `server` - the axum `/generate` service
//! - `reporter` - stderr formatting
//! - `tracing_config` - subscriber setup from `ENUMGEN_LOG`

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod server;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
