//! Scan results.
//!
//! A [`Report`] holds the located region, every mismatch seen along the way,
//! and the terminal [`Diagnostic`].

use crate::region::ScanRegion;
use serde::Serialize;

/// A tag waiting for its closing counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenTag {
    pub name: String,
    pub line: usize,
}

impl OpenTag {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A closing tag that did not match the innermost open tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub line: usize,
    pub column: usize,
    /// Innermost open tag at the time, or `None` if nothing was open.
    pub expected: Option<OpenTag>,
    pub found: String,
    /// Whether the closing tag was explained as an omitted inner close.
    pub recovered: bool,
}

/// Terminal state of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Diagnostic {
    Balanced,
    /// Tags still open at the end of the region, innermost last.
    UnclosedTags(Vec<OpenTag>),
    /// An unrecovered mismatch that stopped a strict scan.
    Mismatch(Mismatch),
}

impl Diagnostic {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Diagnostic::Balanced)
    }
}

/// Everything one scan produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub region: ScanRegion,
    /// Line of the `);` that closed the returned markup, when the scan
    /// stopped there.
    pub return_end: Option<usize>,
    /// Non-fatal mismatches in the order they were found. A mismatch that
    /// halted the scan is the outcome instead.
    pub mismatches: Vec<Mismatch>,
    pub outcome: Diagnostic,
}

impl Report {
    /// True only for a balanced region with no mismatch along the way,
    /// recovered or not.
    pub fn passed(&self) -> bool {
        self.outcome.is_balanced() && self.mismatches.is_empty()
    }
}
