//! Tagcheck Lexer
//!
//! Extracts tag events (open, close, self-close) from component source
//! files that embed markup in a host language. Works one line at a time and
//! never inspects attributes. Also holds the fixed void-element policy and
//! the whole-file markup comment stripper.
//!
//! # Example
//!
//! ```
//! use tagcheck_lexer::{Scanner, TagEvent};
//!
//! let events = Scanner::scan_line("<div><img src={logo}></div>", 1);
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[2], TagEvent::Close(_)));
//! ```

pub mod comments;
pub mod scanner;
pub mod token;

pub use comments::strip_comments;
pub use scanner::Scanner;
pub use token::{is_void_element, Tag, TagEvent, VOID_ELEMENTS};
