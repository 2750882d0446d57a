//! Line-oriented text output.
//!
//! ```text
//! return starts at line 31
//! line 40: mismatched closing tag </div>, expected </span> (opened at line 39)
//!   note: assuming </span> is missing
//! return ends at line 62
//! tags balanced (1 mismatch reported)
//! ```

use tagcheck_checker::{Diagnostic, Mismatch, OpenTag, Report};

/// Render a report as text, one finding per line.
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    let first = report.region.first_line();
    if report.region.until_return_close {
        out.push_str(&format!("return starts at line {first}\n"));
    } else {
        out.push_str(&format!("scanning from line {first}\n"));
    }

    for mismatch in &report.mismatches {
        out.push_str(&format!("{}\n", describe(mismatch)));
        out.push_str(&format!("  note: {}\n", note(mismatch)));
    }

    if let Some(end) = report.return_end {
        out.push_str(&format!("return ends at line {end}\n"));
    }

    match &report.outcome {
        Diagnostic::Balanced if report.mismatches.is_empty() => {
            out.push_str("tags balanced\n");
        }
        Diagnostic::Balanced => {
            let count = plural(report.mismatches.len(), "mismatch", "mismatches");
            out.push_str(&format!("tags balanced ({count} reported)\n"));
        }
        Diagnostic::Mismatch(mismatch) => {
            out.push_str(&format!("error: {}\n", describe(mismatch)));
            out.push_str("  note: scan stopped at the first unrecovered mismatch\n");
        }
        Diagnostic::UnclosedTags(tags) => {
            let count = plural(tags.len(), "unclosed tag", "unclosed tags");
            out.push_str(&format!("error: {count} at end of region\n"));
            for tag in tags {
                out.push_str(&format!("  {}\n", opened(tag)));
            }
        }
    }

    out
}

fn describe(mismatch: &Mismatch) -> String {
    match &mismatch.expected {
        None => format!(
            "line {}: unexpected closing tag </{}>, no tag is open",
            mismatch.line, mismatch.found
        ),
        Some(expected) => format!(
            "line {}: mismatched closing tag </{}>, expected </{}> (opened at line {})",
            mismatch.line, mismatch.found, expected.name, expected.line
        ),
    }
}

fn note(mismatch: &Mismatch) -> String {
    match &mismatch.expected {
        Some(expected) if mismatch.recovered => {
            format!("assuming </{}> is missing", expected.name)
        }
        _ => format!("ignoring </{}>", mismatch.found),
    }
}

fn opened(tag: &OpenTag) -> String {
    format!("<{}> opened at line {}", tag.name, tag.line)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
