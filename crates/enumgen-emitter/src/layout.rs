//! Source layout of generated files: blank line normalization and the
//! key/value column alignment gofmt applies to composite literals.

use enumgen_scanner::{SyntaxKind, TokenFlags, tokenize};

/// Keys up to this many bytes always share a column.
const SMALL_KEY_SIZE: usize = 40;

/// A key whose size differs from the running geometric mean by this factor
/// or more starts a new alignment section.
const SECTION_RATIO: f64 = 2.5;

/// Spaces to put after `key:` for each element of a literal written one
/// `key: value` element per line, so that values line up as gofmt lines
/// them up.
#[must_use]
pub fn key_value_padding<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut pads = Vec::with_capacity(keys.len());
    let mut start = 0;
    let mut ln_sum = 0.0;
    let mut count = 0usize;
    for (i, key) in keys.iter().enumerate() {
        let size = key.as_ref().len();
        if i > 0 && starts_section(keys[i - 1].as_ref().len(), size, ln_sum, count) {
            pad_section(&keys[start..i], &mut pads);
            start = i;
        }
        if size > 0 {
            ln_sum += (size as f64).ln();
            count += 1;
        }
    }
    pad_section(&keys[start..], &mut pads);
    pads
}

fn starts_section(prev_size: usize, size: usize, ln_sum: f64, count: usize) -> bool {
    if count == 0 || (prev_size <= SMALL_KEY_SIZE && size <= SMALL_KEY_SIZE) {
        return false;
    }
    let geomean = (ln_sum / count as f64).exp();
    let ratio = size as f64 / geomean;
    SECTION_RATIO * ratio <= 1.0 || SECTION_RATIO <= ratio
}

fn pad_section<S: AsRef<str>>(keys: &[S], pads: &mut Vec<String>) {
    let widths: Vec<usize> = keys.iter().map(|k| k.as_ref().chars().count()).collect();
    let column = widths.iter().copied().max().unwrap_or(0);
    for width in widths {
        pads.push(" ".repeat(column - width + 1));
    }
}

/// Normalize layout: strip trailing whitespace, drop leading blank lines
/// and blank lines right inside brackets, collapse runs of blank lines and
/// end with exactly one newline. Lines inside raw string literals are kept
/// as written.
#[must_use]
pub fn tidy(text: &str) -> String {
    let raw_strings = raw_string_spans(text);
    let inside_raw = |offset: usize| {
        raw_strings
            .iter()
            .any(|&(start, end)| start < offset && offset < end)
    };

    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;
    let mut after_open = true;
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let offset = line_start;
        line_start += line.len();
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content_end = offset + content.len();

        let ends_in_raw = inside_raw(content_end);
        let line = if ends_in_raw {
            content
        } else {
            content.trim_end()
        };
        if inside_raw(offset) {
            // Continuation of a multi-line raw string.
            out.push_str(line);
            out.push('\n');
            pending_blank = false;
            after_open = !ends_in_raw && line.ends_with(['{', '(']);
            continue;
        }
        if line.is_empty() {
            pending_blank = !after_open;
            continue;
        }
        let closes = line.trim_start().starts_with(['}', ')']);
        if pending_blank && !closes {
            out.push('\n');
        }
        pending_blank = false;
        out.push_str(line);
        out.push('\n');
        after_open = line.ends_with(['{', '(']);
    }
    out
}

/// Byte ranges of the raw string literals in `text`.
fn raw_string_spans(text: &str) -> Vec<(usize, usize)> {
    let (tokens, _) = tokenize("", text);
    tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::StringLiteral && t.flags.contains(TokenFlags::RAW))
        .map(|t| (t.span.start as usize, t.span.end as usize))
        .collect()
}
