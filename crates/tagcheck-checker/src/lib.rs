//! Tagcheck Checker
//!
//! Verifies that every markup tag inside one component of a source file is
//! opened, closed or self-closed correctly. This is a diagnostic heuristic,
//! not a parser: only the component's returned markup is scanned, and the
//! host language around it is never understood.
//!
//! ```text
//! source → strip_comments → region::locate → Balancer (line by line) → Report
//! ```

pub mod automaton;
pub mod diagnostic;
pub mod region;

use log::debug;
use std::path::{Path, PathBuf};
use tagcheck_lexer::strip_comments;

pub use automaton::{Balancer, Mode, RecoveryPolicy, Step};
pub use diagnostic::{Diagnostic, Mismatch, OpenTag, Report};
pub use region::{RegionError, RegionStrategy, ScanRegion};

/// Error that prevents a scan from producing a report.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("region not found: {0}")]
    RegionNotFound(#[from] RegionError),
}

/// Settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Name of the component whose markup is checked.
    pub component: String,
    pub strategy: RegionStrategy,
    pub mode: Mode,
    pub recovery: RecoveryPolicy,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            component: "App".into(),
            strategy: RegionStrategy::default(),
            mode: Mode::default(),
            recovery: RecoveryPolicy::default(),
        }
    }
}

/// Read the file at `path` and check it.
pub fn validate(path: impl AsRef<Path>, options: &CheckOptions) -> Result<Report, CheckError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    check_source(&source, options)
}

/// Check source text already in memory.
pub fn check_source(source: &str, options: &CheckOptions) -> Result<Report, CheckError> {
    let stripped = strip_comments(source);
    let lines: Vec<&str> = stripped.lines().collect();
    let region = region::locate(&lines, &options.component, options.strategy)?;

    let mut balancer = Balancer::new(options.mode, options.recovery);
    let mut return_end = None;

    for (index, text) in lines.iter().enumerate().take(region.end).skip(region.start) {
        let line = index + 1;
        if region.until_return_close && balancer.is_empty() && text.trim() == ");" {
            debug!("returned markup ends at line {line}");
            return_end = Some(line);
            break;
        }
        if balancer.feed_line(text, line) == Step::Halt {
            break;
        }
    }

    let (mismatches, outcome) = balancer.finish();
    Ok(Report {
        region,
        return_end,
        mismatches,
        outcome,
    })
}
