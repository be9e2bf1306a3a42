/// The byte-at-a-time view of the input the parser hands to the scanner.
///
/// All scanning is cursor-relative; there are no positional reads. The
/// contract follows the incremental-parsing runtime the scanner plugs into:
///
/// - [`lookahead`](Cursor::lookahead) returns the current code point without
///   consuming it, or `'\0'` at end of input;
/// - [`advance`](Cursor::advance) consumes it, with `skip = true` excluding
///   it from the token (used only for leading whitespace);
/// - [`mark_end`](Cursor::mark_end) pins the token's end at the current
///   position, letting a scanner read ahead of what it accepts. Calling it
///   again later moves the mark; a token accepted with the mark at its start
///   is zero-width.
pub trait Cursor {
    fn lookahead(&self) -> char;
    fn advance(&mut self, skip: bool);
    fn mark_end(&mut self);
    fn eof(&self) -> bool;
}

/// In-memory [`Cursor`] over a string slice.
///
/// The reference implementation used by this crate's tests and benchmarks;
/// also suitable for embedders that hold the whole source. Tracks the token
/// start (moved by leading skips) and the marked end so the accepted lexeme
/// is observable via [`token`](StrCursor::token).
#[derive(Debug)]
pub struct StrCursor<'a> {
    source: &'a str,
    pos: usize,
    token_start: usize,
    end_mark: Option<usize>,
}

impl<'a> StrCursor<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Start a token at byte offset `pos`, which must lie on a char boundary.
    #[must_use]
    pub fn at(source: &'a str, pos: usize) -> Self {
        Self {
            source,
            pos,
            token_start: pos,
            end_mark: None,
        }
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Where the token ends: the last `mark_end`, or the current position if
    /// the scanner never marked.
    #[must_use]
    pub fn token_end(&self) -> usize {
        self.end_mark.unwrap_or(self.pos)
    }

    /// The accepted lexeme, empty for zero-width tokens.
    #[must_use]
    pub fn token(&self) -> &'a str {
        &self.source[self.token_start..self.token_end()]
    }
}

impl Cursor for StrCursor<'_> {
    fn lookahead(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    fn advance(&mut self, skip: bool) {
        let at_start = self.pos == self.token_start;
        if let Some(ch) = self.source[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
            if skip && at_start {
                self.token_start = self.pos;
            }
        }
    }

    fn mark_end(&mut self) {
        self.end_mark = Some(self.pos);
    }

    fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}
