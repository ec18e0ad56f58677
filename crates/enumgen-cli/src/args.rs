use anyhow::{Result, bail};
use clap::Parser;
use enumgen_emitter::{Format, KeyCase};
use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Long flags of `enumgen` that may also be spelled with a single dash.
pub const CLI_LONG_FLAGS: &[&str] = &["type", "suffix", "format", "case", "ignore-stringer", "no-color"];

/// Long flags of `enumgen-server` that may also be spelled with a single dash.
pub const SERVER_LONG_FLAGS: &[&str] = &["http"];

/// CLI arguments for the enumgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "enumgen",
    version,
    about = "Generate JSON, BSON and String conversions for Go integer enums"
)]
pub struct CliArgs {
    /// Comma-separated list of type names.
    #[arg(short = 't', long = "type", value_delimiter = ',', required = true)]
    pub types: Vec<String>,

    /// Suffix appended to the lowercased type name to form the output file name.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Comma-separated list of generated conversions.
    #[arg(long = "format", value_enum, value_delimiter = ',')]
    pub formats: Option<Vec<Format>>,

    /// Case transform applied to serialized names.
    #[arg(long = "case", value_enum)]
    pub key_case: Option<KeyCase>,

    /// Do not defer to an existing String method.
    #[arg(long = "ignore-stringer", alias = "ignoreStringer")]
    pub ignore_stringer: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Package directory; defaults to the current directory.
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,
}

impl CliArgs {
    /// The single package directory to process.
    pub fn directory(&self) -> Result<PathBuf> {
        match self.dirs.as_slice() {
            [] => Ok(PathBuf::from(".")),
            [dir] => Ok(dir.clone()),
            _ => bail!("only one directory at a time"),
        }
    }

    /// Requested type names in order, without repeats.
    pub fn type_names(&self) -> Result<Vec<String>> {
        let mut names = indexmap::IndexSet::new();
        for name in &self.types {
            let name = name.trim();
            if name.is_empty() {
                bail!("type names must not be empty");
            }
            names.insert(name.to_string());
        }
        Ok(names.into_iter().collect())
    }
}

/// CLI arguments for the enumgen-server binary.
#[derive(Parser, Debug)]
#[command(
    name = "enumgen-server",
    version,
    about = "HTTP service generating enum conversions from posted Go code"
)]
pub struct ServerArgs {
    /// IP and port to listen to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub http: SocketAddr,
}

/// Accept Go-style single-dash long flags: `-type=A` becomes `--type=A`
/// when `type` is one of `long_names`. Short flags and positional
/// arguments are left alone.
pub fn preprocess_args(args: Vec<OsString>, long_names: &[&str]) -> Vec<OsString> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if long_names.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
