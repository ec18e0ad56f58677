//! Comment scanning.
//!
//! Comments are not part of the AST. The loader needs the comments that
//! precede the package clause to honor `//go:build` constraints, so they are
//! extracted directly from the source text.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a `/* */` comment
    pub is_multi_line: bool,
}

impl CommentRange {
    /// Get the comment text from source, including the delimiters.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

/// Extract the comments that appear before the first token of `source`.
pub fn get_leading_comment_ranges(source: &str) -> Vec<CommentRange> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    // A UTF-8 byte order mark is allowed at the start of a Go file.
    if source.starts_with('\u{FEFF}') {
        pos = 3;
    }

    while pos < len {
        match bytes[pos] {
            b' ' | b'\t' | b'\r' | b'\n' => pos += 1,
            b'/' if pos + 1 < len && bytes[pos + 1] == b'/' => {
                let start = pos;
                while pos < len && bytes[pos] != b'\n' {
                    pos += 1;
                }
                comments.push(CommentRange {
                    pos: start as u32,
                    end: pos as u32,
                    is_multi_line: false,
                });
            }
            b'/' if pos + 1 < len && bytes[pos + 1] == b'*' => {
                let start = pos;
                pos += 2;
                while pos + 1 < len && !(bytes[pos] == b'*' && bytes[pos + 1] == b'/') {
                    pos += 1;
                }
                pos = (pos + 2).min(len);
                comments.push(CommentRange {
                    pos: start as u32,
                    end: pos as u32,
                    is_multi_line: true,
                });
            }
            _ => break,
        }
    }

    comments
}

/// Return the expression of a `//go:build` line among the leading comments.
pub fn get_build_constraint(source: &str) -> Option<&str> {
    get_leading_comment_ranges(source)
        .iter()
        .filter(|c| !c.is_multi_line)
        .find_map(|c| {
            c.get_text(source)
                .strip_prefix("//go:build")
                .filter(|rest| rest.starts_with([' ', '\t']))
        })
        .map(str::trim)
}

/// Return the option lists of the legacy `// +build` lines among the
/// leading comments, in source order.
pub fn get_plus_build_lines(source: &str) -> Vec<&str> {
    get_leading_comment_ranges(source)
        .iter()
        .filter(|c| !c.is_multi_line)
        .filter_map(|c| {
            let text = c.get_text(source).strip_prefix("//")?.trim_start();
            text.strip_prefix("+build")
                .filter(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
        })
        .map(str::trim)
        .collect()
}
