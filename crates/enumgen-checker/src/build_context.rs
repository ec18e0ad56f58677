//! Target platform selection of package files.
//!
//! A file belongs to the package for a target when its name suffix
//! (`_linux.go`, `_windows_amd64.go`) and its build constraint lines
//! (`//go:build`, or the legacy `// +build` when there is no `//go:build`)
//! match the target's GOOS, GOARCH and tags.

use enumgen_common::comments::{get_build_constraint, get_plus_build_lines};
use thiserror::Error;

/// Operating systems the Go tool recognizes in file names and tags.
const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Operating systems matched by the `unix` tag.
const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Architectures the Go tool recognizes in file names and tags.
const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Highest `go1.N` release tag that is satisfied.
const GO_RELEASE_MINOR: u32 = 22;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid build constraint {expr:?}: {message}")]
pub struct ConstraintError {
    pub expr: String,
    pub message: String,
}

/// The platform files are selected for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo_enabled: bool,
}

impl BuildContext {
    #[must_use]
    pub fn new(goos: &str, goarch: &str, cgo_enabled: bool) -> Self {
        Self {
            goos: goos.to_string(),
            goarch: goarch.to_string(),
            cgo_enabled,
        }
    }

    /// The running platform, overridden by `GOOS`, `GOARCH` and
    /// `CGO_ENABLED` like the Go tool's default context.
    #[must_use]
    pub fn host() -> Self {
        let goos = std::env::var("GOOS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_goos().to_string());
        let goarch = std::env::var("GOARCH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_goarch().to_string());
        let cgo_enabled = match std::env::var("CGO_ENABLED").as_deref() {
            Ok("0") => false,
            Ok("1") => true,
            _ => goos != "js" && goos != "wasip1" && goos != "plan9",
        };
        Self {
            goos,
            goarch,
            cgo_enabled,
        }
    }

    /// Whether a single build tag is satisfied.
    #[must_use]
    pub fn matches_tag(&self, tag: &str) -> bool {
        match tag {
            "" => false,
            "cgo" => self.cgo_enabled,
            "gc" => true,
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" if self.goos == "android" => true,
            "solaris" if self.goos == "illumos" => true,
            "darwin" if self.goos == "ios" => true,
            _ if tag == self.goos || tag == self.goarch => true,
            _ => tag
                .strip_prefix("go1.")
                .and_then(|minor| minor.parse::<u32>().ok())
                .is_some_and(|minor| (1..=GO_RELEASE_MINOR).contains(&minor)),
        }
    }

    /// Whether the `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix of a file
    /// name matches. Names without a known suffix always match.
    #[must_use]
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        let Some(underscore) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[underscore..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        match parts.as_slice() {
            [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => {
                self.matches_tag(os) && self.matches_tag(arch)
            }
            [.., last] if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.matches_tag(last)
            }
            _ => true,
        }
    }

    /// Whether the build constraints at the top of `source` are satisfied.
    pub fn matches_constraints(&self, source: &str) -> Result<bool, ConstraintError> {
        let matches = |tag: &str| self.matches_tag(tag);
        if let Some(expr) = get_build_constraint(source) {
            return Ok(Constraint::parse(expr)?.eval(&matches));
        }
        for line in get_plus_build_lines(source) {
            if !Constraint::parse_plus_build(line).eval(&matches) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        arch => arch,
    }
}

/// A parsed build constraint expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    Tag(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    /// Parse a `//go:build` expression: tags combined with `!`, `&&`,
    /// `||` and parentheses.
    pub fn parse(expr: &str) -> Result<Constraint, ConstraintError> {
        let mut parser = ExprParser {
            expr,
            tokens: lex(expr).map_err(|message| ConstraintError {
                expr: expr.to_string(),
                message,
            })?,
            pos: 0,
        };
        let constraint = parser.parse_or()?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.error("unexpected token"));
        }
        Ok(constraint)
    }

    /// Parse the options of one `// +build` line: space separated
    /// alternatives, each a comma separated conjunction of possibly
    /// negated tags.
    #[must_use]
    pub fn parse_plus_build(line: &str) -> Constraint {
        let term = |option: &str| {
            option
                .split(',')
                .map(|tag| match tag.strip_prefix('!') {
                    Some(tag) => Constraint::Not(Box::new(Constraint::Tag(tag.to_string()))),
                    None => Constraint::Tag(tag.to_string()),
                })
                .reduce(|a, b| Constraint::And(Box::new(a), Box::new(b)))
        };
        line.split_whitespace()
            .filter_map(term)
            .reduce(|a, b| Constraint::Or(Box::new(a), Box::new(b)))
            .unwrap_or_else(|| Constraint::Tag(String::new()))
    }

    pub fn eval(&self, matches: &impl Fn(&str) -> bool) -> bool {
        match self {
            Constraint::Tag(tag) => matches(tag),
            Constraint::Not(inner) => !inner.eval(matches),
            Constraint::And(a, b) => a.eval(matches) && b.eval(matches),
            Constraint::Or(a, b) => a.eval(matches) || b.eval(matches),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExprToken {
    Tag(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn lex(expr: &str) -> Result<Vec<ExprToken>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            ' ' | '\t' => {}
            '!' => tokens.push(ExprToken::Not),
            '(' => tokens.push(ExprToken::LParen),
            ')' => tokens.push(ExprToken::RParen),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(format!("expected {c}{c}"));
                }
                tokens.push(if c == '&' {
                    ExprToken::And
                } else {
                    ExprToken::Or
                });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut end = start + c.len_utf8();
                while let Some((i, next)) =
                    chars.next_if(|&(_, next)| next.is_alphanumeric() || next == '_' || next == '.')
                {
                    end = i + next.len_utf8();
                }
                tokens.push(ExprToken::Tag(expr[start..end].to_string()));
            }
            _ => return Err(format!("invalid character {c:?}")),
        }
    }
    Ok(tokens)
}

struct ExprParser<'a> {
    expr: &'a str,
    tokens: Vec<ExprToken>,
    pos: usize,
}

impl ExprParser<'_> {
    fn error(&self, message: &str) -> ConstraintError {
        ConstraintError {
            expr: self.expr.to_string(),
            message: message.to_string(),
        }
    }

    fn eat(&mut self, token: &ExprToken) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Constraint, ConstraintError> {
        let mut left = self.parse_and()?;
        while self.eat(&ExprToken::Or) {
            let right = self.parse_and()?;
            left = Constraint::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Constraint, ConstraintError> {
        let mut left = self.parse_not()?;
        while self.eat(&ExprToken::And) {
            let right = self.parse_not()?;
            left = Constraint::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Constraint, ConstraintError> {
        if self.eat(&ExprToken::Not) {
            return Ok(Constraint::Not(Box::new(self.parse_not()?)));
        }
        if self.eat(&ExprToken::LParen) {
            let inner = self.parse_or()?;
            if !self.eat(&ExprToken::RParen) {
                return Err(self.error("missing )"));
            }
            return Ok(inner);
        }
        match self.tokens.get(self.pos) {
            Some(ExprToken::Tag(tag)) => {
                let tag = tag.clone();
                self.pos += 1;
                Ok(Constraint::Tag(tag))
            }
            Some(_) => Err(self.error("unexpected token")),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

#[cfg(test)]
#[path = "../tests/build_context_tests.rs"]
mod tests;
