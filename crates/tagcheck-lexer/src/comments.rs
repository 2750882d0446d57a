//! Markup comment removal.
//!
//! Embedded markup comments look like `{/* ... */}` and may span several
//! lines. They are blanked out of the whole source before it is split into
//! lines, so tag-like text inside them never reaches the scanner.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Non-greedy, newline-spanning match of one comment span.
static COMMENT_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{/\*.*?\*/\}").unwrap());

/// Blank every comment span in `source`.
///
/// Line breaks inside a span are kept and every other character becomes a
/// space, so line and column numbers of the surrounding text are unchanged.
pub fn strip_comments(source: &str) -> Cow<'_, str> {
    COMMENT_SPAN.replace_all(source, |caps: &Captures<'_>| blank(&caps[0]))
}

fn blank(span: &str) -> String {
    span.chars()
        .map(|c| if c == '\n' || c == '\r' { c } else { ' ' })
        .collect()
}
