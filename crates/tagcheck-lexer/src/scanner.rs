use crate::token::{Tag, TagEvent};

/// Per-line tag scanner.
///
/// Walks one line of text and yields every tag-like construct in order:
/// `<` or `</`, an identifier of letters, digits and dots, anything up to the
/// next `>`, and finally `>` or `/>`. Attribute text is skipped without being
/// looked at. A `<` that does not start a complete tag is treated as plain
/// text and scanning resumes at the following character.
///
/// Comments are not handled here; strip them from the whole source first
/// with [`crate::strip_comments`].
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    /// Create a scanner over `text`, which sits at 1-based `line`.
    pub fn new(text: &str, line: usize) -> Self {
        Self::with_cursor(text, line, 0)
    }

    /// Create a scanner that starts at character offset `cursor`.
    pub fn with_cursor(text: &str, line: usize, cursor: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: cursor,
            line,
        }
    }

    /// Scan a whole line into events.
    pub fn scan_line(text: &str, line: usize) -> Vec<TagEvent> {
        Scanner::new(text, line).collect()
    }

    /// Character offset where the next search starts.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Produce the next tag event at or after the cursor.
    pub fn next_event(&mut self) -> Option<TagEvent> {
        while !self.is_at_end() {
            if self.peek() != '<' {
                self.advance();
                continue;
            }

            let start = self.pos;
            match self.scan_tag(start) {
                Some((event, end)) => {
                    self.pos = end;
                    return Some(event);
                }
                None => self.pos = start + 1,
            }
        }
        None
    }

    // --- Tag recognition ---

    /// Try to read a tag whose `<` sits at `start`. Returns the event and the
    /// offset just past its `>`.
    fn scan_tag(&self, start: usize) -> Option<(TagEvent, usize)> {
        let mut i = start + 1;
        let closing = self.char_at(i) == Some('/');
        if closing {
            i += 1;
        }

        let name_start = i;
        while self.char_at(i).is_some_and(is_name_char) {
            i += 1;
        }
        if i == name_start {
            return None;
        }
        let name: String = self.chars[name_start..i].iter().collect();

        // Attributes run up to the first `>`; a `/` right before it marks a
        // self-closing tag.
        let gt = (i..self.chars.len()).find(|&k| self.chars[k] == '>')?;
        let self_closing = gt > i && self.chars[gt - 1] == '/';

        let tag = Tag::new(name, self.line, start + 1);
        let event = if closing {
            TagEvent::Close(tag)
        } else if self_closing {
            TagEvent::SelfClose(tag)
        } else {
            TagEvent::Open(tag)
        };
        Some((event, gt + 1))
    }

    // --- Helpers ---

    fn peek(&self) -> char {
        self.char_at(self.pos).unwrap_or('\0')
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

impl Iterator for Scanner {
    type Item = TagEvent;

    fn next(&mut self) -> Option<TagEvent> {
        self.next_event()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}
