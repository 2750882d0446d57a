//! Balance automaton.
//!
//! Consumes tag events in source order and keeps the stack of tags still
//! waiting to be closed. Self-closing tags and void elements never touch the
//! stack. A closing tag that does not match the top of the stack becomes a
//! [`Mismatch`]; the [`RecoveryPolicy`] may explain it as one omitted close,
//! and the [`Mode`] decides whether an unexplained one ends the scan.

use crate::diagnostic::{Diagnostic, Mismatch, OpenTag};
use log::{debug, trace};
use tagcheck_lexer::{is_void_element, Scanner, Tag, TagEvent};

/// What happens after a mismatch that recovery could not explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Stop at the first unrecovered mismatch. That mismatch is the outcome.
    Strict,
    /// Log it, leave the stack alone and keep going.
    #[default]
    Lenient,
}

/// How a mismatched closing tag may be reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPolicy {
    /// Never reinterpret.
    Off,
    /// If the closing tag matches the entry just below the top, assume the
    /// top's close was left out and pop both.
    #[default]
    SecondFromTop,
}

impl RecoveryPolicy {
    /// Number of stack entries to pop when `found` closes a tag other than
    /// the top one, or `None` if the mismatch cannot be explained.
    fn entries_to_pop(self, stack: &[OpenTag], found: &str) -> Option<usize> {
        match self {
            RecoveryPolicy::Off => None,
            RecoveryPolicy::SecondFromTop => match stack {
                [.., outer, _] if outer.name == found => Some(2),
                _ => None,
            },
        }
    }
}

/// Whether scanning should go on after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halt,
}

/// Open-tag stack plus the mismatches seen so far.
#[derive(Debug)]
pub struct Balancer {
    stack: Vec<OpenTag>,
    mode: Mode,
    recovery: RecoveryPolicy,
    mismatches: Vec<Mismatch>,
    halted: Option<Mismatch>,
}

impl Balancer {
    pub fn new(mode: Mode, recovery: RecoveryPolicy) -> Self {
        Self {
            stack: Vec::new(),
            mode,
            recovery,
            mismatches: Vec::new(),
            halted: None,
        }
    }

    /// Currently open tags, outermost first.
    pub fn stack(&self) -> &[OpenTag] {
        &self.stack
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Scan one line and feed every tag on it.
    pub fn feed_line(&mut self, text: &str, line: usize) -> Step {
        for event in Scanner::new(text, line) {
            if self.feed(&event) == Step::Halt {
                return Step::Halt;
            }
        }
        Step::Continue
    }

    /// Apply one event to the stack.
    pub fn feed(&mut self, event: &TagEvent) -> Step {
        if self.halted.is_some() {
            return Step::Halt;
        }
        trace!("{event:?}");

        match event {
            TagEvent::SelfClose(_) => Step::Continue,
            TagEvent::Open(tag) => {
                if !is_void_element(&tag.name) {
                    self.stack.push(OpenTag::new(tag.name.clone(), tag.line));
                }
                Step::Continue
            }
            TagEvent::Close(tag) => self.close(tag),
        }
    }

    fn close(&mut self, tag: &Tag) -> Step {
        let Some(top) = self.stack.last() else {
            return self.reject(Mismatch {
                line: tag.line,
                column: tag.column,
                expected: None,
                found: tag.name.clone(),
                recovered: false,
            });
        };

        if top.name == tag.name {
            self.stack.pop();
            return Step::Continue;
        }

        let expected = Some(top.clone());
        match self.recovery.entries_to_pop(&self.stack, &tag.name) {
            Some(count) => {
                debug!(
                    "line {}: </{}> closes an outer tag, assuming </{}> is missing",
                    tag.line, tag.name, top.name
                );
                self.stack.truncate(self.stack.len() - count);
                self.mismatches.push(Mismatch {
                    line: tag.line,
                    column: tag.column,
                    expected,
                    found: tag.name.clone(),
                    recovered: true,
                });
                Step::Continue
            }
            None => self.reject(Mismatch {
                line: tag.line,
                column: tag.column,
                expected,
                found: tag.name.clone(),
                recovered: false,
            }),
        }
    }

    /// Record an unexplained mismatch. The stack is left untouched.
    fn reject(&mut self, mismatch: Mismatch) -> Step {
        match self.mode {
            Mode::Strict => {
                debug!("line {}: halting on </{}>", mismatch.line, mismatch.found);
                self.halted = Some(mismatch);
                Step::Halt
            }
            Mode::Lenient => {
                debug!("line {}: ignoring </{}>", mismatch.line, mismatch.found);
                self.mismatches.push(mismatch);
                Step::Continue
            }
        }
    }

    /// Logged mismatches and the terminal diagnostic.
    pub fn finish(self) -> (Vec<Mismatch>, Diagnostic) {
        let outcome = match self.halted {
            Some(mismatch) => Diagnostic::Mismatch(mismatch),
            None if self.stack.is_empty() => Diagnostic::Balanced,
            None => Diagnostic::UnclosedTags(self.stack),
        };
        (self.mismatches, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(
        lines: &[&str],
        mode: Mode,
        recovery: RecoveryPolicy,
    ) -> (Vec<Mismatch>, Diagnostic) {
        let mut balancer = Balancer::new(mode, recovery);
        for (i, text) in lines.iter().enumerate() {
            if balancer.feed_line(text, i + 1) == Step::Halt {
                break;
            }
        }
        balancer.finish()
    }

    fn lenient(lines: &[&str]) -> (Vec<Mismatch>, Diagnostic) {
        run(lines, Mode::Lenient, RecoveryPolicy::SecondFromTop)
    }

    fn strict(lines: &[&str]) -> (Vec<Mismatch>, Diagnostic) {
        run(lines, Mode::Strict, RecoveryPolicy::SecondFromTop)
    }

    // =========================================================================
    // Balanced input
    // =========================================================================

    #[test]
    fn test_nested_tags_balance() {
        let (mismatches, outcome) = lenient(&[
            "<main>",
            "  <section><h1>Title</h1>",
            "    <ul><li>a</li><li>b</li></ul>",
            "  </section>",
            "</main>",
        ]);
        assert!(mismatches.is_empty());
        assert_eq!(outcome, Diagnostic::Balanced);
    }

    #[test]
    fn test_void_element_is_never_pushed() {
        let mut balancer = Balancer::new(Mode::Strict, RecoveryPolicy::Off);
        balancer.feed_line("<div><img src={logo}>", 1);
        assert_eq!(balancer.stack(), &[OpenTag::new("div", 1)]);
        balancer.feed_line("<span>hi</span></div>", 2);
        assert_eq!(balancer.finish(), (vec![], Diagnostic::Balanced));
    }

    #[test]
    fn test_void_element_any_case() {
        let (_, outcome) = strict(&["<div><BR><Input value={v}></div>"]);
        assert_eq!(outcome, Diagnostic::Balanced);
    }

    #[test]
    fn test_self_closing_never_pushed() {
        let mut balancer = Balancer::new(Mode::Strict, RecoveryPolicy::Off);
        balancer.feed_line("<Sidebar open />", 1);
        assert!(balancer.is_empty());
        assert_eq!(balancer.finish().1, Diagnostic::Balanced);
    }

    #[test]
    fn test_empty_input_balances() {
        assert_eq!(strict(&[]), (vec![], Diagnostic::Balanced));
    }

    // =========================================================================
    // Unclosed tags
    // =========================================================================

    #[test]
    fn test_single_unclosed_tag() {
        let (mismatches, outcome) = lenient(&["<div>", "  <span>hi</span>"]);
        assert!(mismatches.is_empty());
        let expected = vec![OpenTag::new("div", 1)];
        assert_eq!(outcome, Diagnostic::UnclosedTags(expected));
    }

    #[test]
    fn test_unclosed_tags_innermost_last() {
        let (_, outcome) = lenient(&["<Layout>", "<Panel>", "<p>"]);
        assert_eq!(
            outcome,
            Diagnostic::UnclosedTags(vec![
                OpenTag::new("Layout", 1),
                OpenTag::new("Panel", 2),
                OpenTag::new("p", 3),
            ])
        );
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    #[test]
    fn test_missing_inner_close_recovers() {
        let (mismatches, outcome) = lenient(&["<div><span>text</div>"]);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                line: 1,
                column: 16,
                expected: Some(OpenTag::new("span", 1)),
                found: "div".into(),
                recovered: true,
            }]
        );
        assert_eq!(outcome, Diagnostic::Balanced);
    }

    #[test]
    fn test_recovery_pops_both_entries() {
        let mut balancer = Balancer::new(Mode::Strict, RecoveryPolicy::SecondFromTop);
        balancer.feed_line("<Root><A><B>", 1);
        assert_eq!(balancer.feed_line("</A>", 2), Step::Continue);
        assert_eq!(balancer.stack(), &[OpenTag::new("Root", 1)]);
    }

    #[test]
    fn test_strict_continues_after_recovery() {
        let (mismatches, outcome) = strict(&["<div><span>text</div>", "<p></p>"]);
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].recovered);
        assert_eq!(outcome, Diagnostic::Balanced);
    }

    #[test]
    fn test_recovery_only_looks_one_level_down() {
        let (mismatches, outcome) = lenient(&["<a><b><c></a>"]);
        assert_eq!(mismatches.len(), 1);
        assert!(!mismatches[0].recovered);
        assert_eq!(
            outcome,
            Diagnostic::UnclosedTags(vec![
                OpenTag::new("a", 1),
                OpenTag::new("b", 1),
                OpenTag::new("c", 1),
            ])
        );
    }

    #[test]
    fn test_recovery_off() {
        let lines = ["<div><span>text</div>"];
        let (mismatches, outcome) = run(&lines, Mode::Lenient, RecoveryPolicy::Off);
        assert_eq!(mismatches.len(), 1);
        assert!(!mismatches[0].recovered);
        let expected = vec![OpenTag::new("div", 1), OpenTag::new("span", 1)];
        assert_eq!(outcome, Diagnostic::UnclosedTags(expected));
    }

    // =========================================================================
    // Unrecovered mismatches
    // =========================================================================

    #[test]
    fn test_strict_halts_on_mismatch() {
        let (mismatches, outcome) = strict(&["<div>", "</span>", "</div>", "</oops>"]);
        assert!(mismatches.is_empty());
        assert_eq!(
            outcome,
            Diagnostic::Mismatch(Mismatch {
                line: 2,
                column: 1,
                expected: Some(OpenTag::new("div", 1)),
                found: "span".into(),
                recovered: false,
            })
        );
    }

    #[test]
    fn test_lenient_skips_mismatch_and_continues() {
        let (mismatches, outcome) = lenient(&["<div>", "</span>", "</div>"]);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].found, "span");
        assert_eq!(outcome, Diagnostic::Balanced);
    }

    #[test]
    fn test_strict_halts_on_close_with_empty_stack() {
        let (_, outcome) = strict(&["</div>", "<p>"]);
        assert_eq!(
            outcome,
            Diagnostic::Mismatch(Mismatch {
                line: 1,
                column: 1,
                expected: None,
                found: "div".into(),
                recovered: false,
            })
        );
    }

    #[test]
    fn test_lenient_logs_close_with_empty_stack() {
        let (mismatches, outcome) = lenient(&["</div>", "<p>"]);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].expected, None);
        let expected = vec![OpenTag::new("p", 2)];
        assert_eq!(outcome, Diagnostic::UnclosedTags(expected));
    }

    #[test]
    fn test_names_match_case_sensitively() {
        let (mismatches, _) = lenient(&["<Div></div>"]);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].expected, Some(OpenTag::new("Div", 1)));
    }

    #[test]
    fn test_feed_after_halt_is_ignored() {
        let mut balancer = Balancer::new(Mode::Strict, RecoveryPolicy::Off);
        assert_eq!(balancer.feed_line("</x>", 1), Step::Halt);
        assert_eq!(balancer.feed_line("<y>", 2), Step::Halt);
        assert!(balancer.is_empty());
    }
}
