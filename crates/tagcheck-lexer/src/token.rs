/// A tag name together with the position of its opening `<`.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

impl Tag {
    pub fn new(name: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            name: name.into(),
            line,
            column,
        }
    }
}

/// A structural tag event extracted from one line of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// `<name ...>`
    Open(Tag),
    /// `</name>`
    Close(Tag),
    /// `<name ... />`
    SelfClose(Tag),
}

impl TagEvent {
    pub fn tag(&self) -> &Tag {
        match self {
            TagEvent::Open(tag) | TagEvent::Close(tag) | TagEvent::SelfClose(tag) => tag,
        }
    }

    pub fn name(&self) -> &str {
        &self.tag().name
    }

    pub fn line(&self) -> usize {
        self.tag().line
    }
}

/// HTML void elements (never closed, never pushed).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Check if a tag name is a void element. Case-insensitive, so `<IMG>` and
/// `<Input>` count too.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}
