//! Region locator.
//!
//! Finds the slice of a source file that holds the component's returned
//! markup without parsing the host language. Two strategies:
//!
//! ```text
//! Forward:  first `function App` line .................... end of file
//! Anchored: `return (` nearest above `export default App` .. first `);`
//!           seen while no tag is open
//! ```
//!
//! The anchored end is not known up front; the region only records that the
//! scan should stop at the closing `);`.

use log::debug;
use serde::Serialize;

/// How the scan region is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionStrategy {
    /// From the component marker to end of file. Picks up any code that
    /// follows the component.
    Forward,
    /// From the component's main `return (` to its closing `);`.
    #[default]
    Anchored,
}

/// Lines `[start, end)` to scan, as 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanRegion {
    pub start: usize,
    pub end: usize,
    /// Stop at a line that is exactly `);` while no tag is open.
    pub until_return_close: bool,
}

impl ScanRegion {
    /// 1-based number of the first scanned line.
    pub fn first_line(&self) -> usize {
        self.start + 1
    }
}

/// The component boundary heuristics failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("could not find `function {component}` or `const {component} =`")]
    MissingComponent { component: String },
    #[error("could not find the main `return (` of `{component}`")]
    MissingReturn { component: String },
}

/// Locate the region of `lines` to scan for `component`.
pub fn locate(
    lines: &[&str],
    component: &str,
    strategy: RegionStrategy,
) -> Result<ScanRegion, RegionError> {
    let marker = lines
        .iter()
        .position(|line| introduces_component(line, component))
        .ok_or_else(|| RegionError::MissingComponent {
            component: component.to_string(),
        })?;
    debug!("component `{component}` introduced at line {}", marker + 1);

    let region = match strategy {
        RegionStrategy::Forward => ScanRegion {
            start: marker,
            end: lines.len(),
            until_return_close: false,
        },
        RegionStrategy::Anchored => {
            let start = find_main_return(lines, component, marker).ok_or_else(|| {
                RegionError::MissingReturn {
                    component: component.to_string(),
                }
            })?;
            ScanRegion {
                start,
                end: lines.len(),
                until_return_close: true,
            }
        }
    };

    debug!(
        "{strategy:?} region starts at line {} ({} lines available)",
        region.first_line(),
        region.end - region.start
    );
    Ok(region)
}

/// The nearest `return (` above the last export of `component`, not earlier
/// than the component marker. Without an export, or with nothing between
/// marker and export, the last `return (` after the marker is used.
fn find_main_return(lines: &[&str], component: &str, marker: usize) -> Option<usize> {
    let export = format!("export default {component}");
    let anchor = lines.iter().rposition(|line| contains_word(line, &export));

    let is_return = |i: &usize| lines[*i].contains("return (");
    let anchored = anchor.and_then(|anchor| {
        debug!("export anchor at line {}", anchor + 1);
        (marker..=anchor).rev().find(is_return)
    });

    anchored.or_else(|| (marker..lines.len()).rev().find(is_return))
}

/// A line declaring `component` as a function or a bound arrow/expression.
fn introduces_component(line: &str, component: &str) -> bool {
    contains_word(line, &format!("function {component}"))
        || contains_word(line, &format!("const {component} ="))
}

/// `needle` occurs in `line` and is not immediately followed by more
/// identifier characters (`App` does not match `AppShell`).
fn contains_word(line: &str, needle: &str) -> bool {
    line.match_indices(needle).any(|(i, _)| {
        !line[i + needle.len()..].starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
    })
}
