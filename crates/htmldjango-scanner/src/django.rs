//! The Django side of the scanner: block-comment bodies, verbatim blocks
//! with their runtime-captured suffix, the generic-tag validator, and the
//! filter-argument colon.

use crate::builtins::is_builtin_tag;
use crate::cursor::Cursor;
use crate::scanner::Scanner;
use crate::serialize::VERBATIM_SUFFIX_MAX;
use crate::tokens::TokenKind;
use crate::tokens::ValidTokens;

/// Identifiers read by the generic-tag validator are bounded so the
/// `end<name>` sentinel stays a small owned string.
const GENERIC_TAG_NAME_MAX: usize = 255;

fn skip_whitespace(cursor: &mut impl Cursor) {
    while cursor.lookahead().is_whitespace() {
        cursor.advance(false);
    }
}

/// `' '`, `'\t'`, `'\r'` only. Verbatim tags must stay on one line.
fn skip_horizontal_whitespace(cursor: &mut impl Cursor) {
    while matches!(cursor.lookahead(), ' ' | '\t' | '\r') {
        cursor.advance(false);
    }
}

/// Consume `literal` char by char. On mismatch the cursor is left at the
/// offending character; anything already matched stays consumed, which is
/// fine for the forward-only rescan loops below.
fn consume_literal(cursor: &mut impl Cursor, literal: &str) -> bool {
    for expected in literal.chars() {
        if cursor.lookahead() != expected {
            return false;
        }
        cursor.advance(false);
    }
    true
}

impl Scanner {
    /// Body of `{% comment %}`: everything up to, but not including, the
    /// `{% endcomment %}` tag, which is left for the grammar.
    pub(crate) fn scan_django_comment_body(cursor: &mut impl Cursor) -> Option<TokenKind> {
        loop {
            if cursor.eof() {
                return None;
            }
            if cursor.lookahead() != '{' {
                cursor.advance(false);
                continue;
            }
            cursor.mark_end();
            cursor.advance(false);
            if cursor.lookahead() != '%' {
                continue;
            }
            cursor.advance(false);
            skip_whitespace(cursor);
            if !consume_literal(cursor, "endcomment") {
                continue;
            }
            skip_whitespace(cursor);
            if cursor.lookahead() != '%' {
                continue;
            }
            cursor.advance(false);
            if cursor.lookahead() != '}' {
                continue;
            }
            return Some(TokenKind::DjangoCommentContent);
        }
    }

    /// Suffix capture, entered right after the `verbatim` keyword. Reads up
    /// to `%}`, recording the bytes in between with trailing horizontal
    /// whitespace stripped. Newlines and end of input abort; a suffix that
    /// cannot be serialized (over 255 bytes) is refused here.
    pub(crate) fn scan_verbatim_start(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        let mut suffix = String::new();
        let mut kept = 0;

        loop {
            match cursor.lookahead() {
                '\0' | '\n' => return None,
                '%' => {
                    cursor.advance(false);
                    if cursor.lookahead() == '}' {
                        cursor.advance(false);
                        cursor.mark_end();
                        suffix.truncate(kept);
                        if suffix.len() > VERBATIM_SUFFIX_MAX {
                            return None;
                        }
                        self.verbatim_suffix = suffix;
                        return Some(TokenKind::VerbatimStart);
                    }
                    suffix.push('%');
                    kept = suffix.len();
                }
                c => {
                    cursor.advance(false);
                    suffix.push(c);
                    if !matches!(c, ' ' | '\t' | '\r') {
                        kept = suffix.len();
                    }
                }
            }
        }
    }

    /// Verbatim body plus its closing tag: scans until `{%`, horizontal
    /// whitespace, `endverbatim`, the exact captured suffix, horizontal
    /// whitespace, `%}`. Consumes the whole block and clears the suffix.
    pub(crate) fn scan_verbatim_content(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        loop {
            if cursor.eof() {
                return None;
            }
            if cursor.lookahead() != '{' {
                cursor.advance(false);
                continue;
            }
            cursor.advance(false);
            if cursor.lookahead() != '%' {
                continue;
            }
            cursor.advance(false);
            skip_horizontal_whitespace(cursor);
            if !consume_literal(cursor, "endverbatim") {
                continue;
            }
            if !consume_literal(cursor, &self.verbatim_suffix) {
                continue;
            }
            skip_horizontal_whitespace(cursor);
            if cursor.lookahead() != '%' {
                continue;
            }
            cursor.advance(false);
            if cursor.lookahead() != '}' {
                continue;
            }
            cursor.advance(false);
            cursor.mark_end();
            self.verbatim_suffix.clear();
            return Some(TokenKind::VerbatimBlockContent);
        }
    }

    /// Zero-width check of an unknown tag name in `{% ... %}` position.
    ///
    /// A generic *block* needs a matching `{% end<name> %}` somewhere ahead;
    /// without one the name can still be a generic *simple* tag. Built-in
    /// keywords and `end`-prefixed names never validate, so the grammar's
    /// own productions keep them.
    pub(crate) fn scan_generic_tag_validator(
        cursor: &mut impl Cursor,
        valid: ValidTokens,
    ) -> Option<TokenKind> {
        while cursor.lookahead().is_whitespace() {
            cursor.advance(true);
        }
        cursor.mark_end();

        let first = cursor.lookahead();
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let mut name = String::new();
        name.push(first);
        cursor.advance(false);
        loop {
            let c = cursor.lookahead();
            if c.is_ascii_alphanumeric() || c == '_' {
                if name.len() == GENERIC_TAG_NAME_MAX {
                    return None;
                }
                name.push(c);
                cursor.advance(false);
            } else {
                break;
            }
        }

        if is_builtin_tag(&name) || name.starts_with("end") {
            return None;
        }

        if valid.contains(TokenKind::ValidateGenericBlock) {
            let closer = format!("end{name}");
            if find_block_closer(cursor, &closer) {
                return Some(TokenKind::ValidateGenericBlock);
            }
        }
        if valid.contains(TokenKind::ValidateGenericSimple) {
            return Some(TokenKind::ValidateGenericSimple);
        }
        None
    }

    /// `:` introducing a filter argument. Accepted only when what follows
    /// can start an argument; other colons fall to the grammar.
    pub(crate) fn scan_filter_colon(cursor: &mut impl Cursor) -> Option<TokenKind> {
        if cursor.lookahead() != ':' {
            return None;
        }
        cursor.advance(false);
        cursor.mark_end();
        let c = cursor.lookahead();
        let starts_argument =
            c.is_ascii_alphanumeric() || matches!(c, '"' | '\'' | '+' | '-' | '.' | '_');
        starts_argument.then_some(TokenKind::FilterColon)
    }
}

/// Look ahead (consuming freely; the token is already zero-width) for
/// `{%`, whitespace, `closer`, then whitespace or `%`.
fn find_block_closer(cursor: &mut impl Cursor, closer: &str) -> bool {
    loop {
        if cursor.eof() {
            return false;
        }
        if cursor.lookahead() != '{' {
            cursor.advance(false);
            continue;
        }
        cursor.advance(false);
        if cursor.lookahead() != '%' {
            continue;
        }
        cursor.advance(false);
        skip_whitespace(cursor);
        if !consume_literal(cursor, closer) {
            continue;
        }
        let c = cursor.lookahead();
        if c.is_whitespace() || c == '%' {
            return true;
        }
        // A longer identifier like `end<name>extra`; keep looking.
    }
}
