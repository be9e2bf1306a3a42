//! External lexical scanner for a mixed HTML + Django template grammar.
//!
//! An incremental, GLR-style parser calls into this crate at the points
//! where its context-free grammar cannot decide on its own: HTML's implicit
//! end tags, raw-text and RCDATA content, comments, Django block comments,
//! verbatim blocks with runtime-captured end suffixes, and the zero-width
//! lookahead that tells generic `{% ... %}` block tags from simple ones.
//!
//! ## Architecture
//!
//! The scanner holds the only mutable state visible to incremental parsing:
//!
//! 1. **Element stack**: the currently-open tags, driving implicit-close
//!    decisions and foreign-content (SVG/MathML) case handling
//! 2. **Verbatim suffix**: the label captured from `{% verbatim ... %}`,
//!    needed to recognize the matching `{% endverbatim... %}`
//!
//! Each [`Scanner::scan`] call dispatches on the parser's validity vector
//! and the next character, runs exactly one sub-scanner, and either accepts
//! one token or leaves the decision to the grammar's own lexer. Between
//! edits the parser snapshots state with [`Scanner::serialize`] and restores
//! it with [`Scanner::deserialize`].
//!
//! ## Key Components
//!
//! - [`Scanner`]: state plus the five operations of the external interface
//! - [`TokenKind`] / [`ValidTokens`]: the token vocabulary and validity set
//! - [`Tag`] / [`TagKind`]: tag classification and HTML containment rules
//! - [`Cursor`] / [`StrCursor`]: the byte-at-a-time input seam
//!
//! ## Example
//!
//! ```
//! use htmldjango_scanner::{Scanner, StrCursor, TokenKind, ValidTokens};
//!
//! let mut scanner = Scanner::new();
//! let mut cursor = StrCursor::at("<p>hello</p>", 1);
//! let valid = ValidTokens::of(&[TokenKind::HtmlStartTagName]);
//!
//! assert_eq!(scanner.scan(&mut cursor, valid), Some(TokenKind::HtmlStartTagName));
//! assert_eq!(cursor.token(), "p");
//! assert_eq!(scanner.stack().len(), 1);
//! ```

mod builtins;
mod cursor;
mod django;
mod html;
mod scanner;
mod serialize;
mod stack;
mod tags;
mod tokens;

pub use builtins::is_builtin_tag;
pub use cursor::Cursor;
pub use cursor::StrCursor;
pub use scanner::Scanner;
pub use serialize::SERIALIZATION_BUFFER_SIZE;
pub use stack::ElementStack;
pub use tags::Tag;
pub use tags::TagKind;
pub use tokens::TokenKind;
pub use tokens::ValidTokens;
