use crate::cursor::Cursor;
use crate::stack::ElementStack;
use crate::tokens::TokenKind;
use crate::tokens::ValidTokens;

/// All scanner-held parse state: the open-element stack and the captured
/// verbatim suffix.
///
/// One scanner belongs to one parser instance. Mutations happen only inside
/// a [`scan`](Scanner::scan) call that accepts a token; between edits the
/// parser snapshots the state with [`serialize`](Scanner::serialize) and
/// restores it with [`deserialize`](Scanner::deserialize).
#[derive(Debug, Default)]
pub struct Scanner {
    pub(crate) stack: ElementStack,
    pub(crate) verbatim_suffix: String,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stack(&self) -> &ElementStack {
        &self.stack
    }

    /// The suffix captured by the last `{% verbatim ... %}`, empty outside a
    /// verbatim block.
    #[must_use]
    pub fn verbatim_suffix(&self) -> &str {
        &self.verbatim_suffix
    }

    /// Try to match one token at the cursor.
    ///
    /// Dispatches to exactly one sub-scanner based on the validity vector
    /// and the next character. Returns the accepted token kind with the end
    /// mark placed on the cursor, or `None` when nothing matched and the
    /// parser should fall back to the grammar's own lexer. Failure never
    /// mutates the stack or the suffix.
    pub fn scan(&mut self, cursor: &mut impl Cursor, valid: ValidTokens) -> Option<TokenKind> {
        if valid.contains(TokenKind::DjangoCommentContent) {
            return Self::scan_django_comment_body(cursor);
        }
        if valid.contains(TokenKind::VerbatimStart) {
            return self.scan_verbatim_start(cursor);
        }
        if valid.contains(TokenKind::VerbatimBlockContent) {
            return self.scan_verbatim_content(cursor);
        }
        if valid.contains(TokenKind::ValidateGenericBlock)
            || valid.contains(TokenKind::ValidateGenericSimple)
        {
            return Self::scan_generic_tag_validator(cursor, valid);
        }
        if valid.contains(TokenKind::FilterColon) && cursor.lookahead() == ':' {
            return Self::scan_filter_colon(cursor);
        }
        if valid.contains(TokenKind::RawText)
            && !valid.has_start_tag_name()
            && !valid.has_end_tag_name()
        {
            return self.scan_raw_text(cursor);
        }
        if valid.contains(TokenKind::RcdataText) {
            return self.scan_rcdata_text(cursor);
        }
        if valid.contains(TokenKind::PlaintextText) {
            return self.scan_plaintext_text(cursor);
        }

        while cursor.lookahead().is_whitespace() {
            cursor.advance(true);
        }

        match cursor.lookahead() {
            '<' => {
                cursor.mark_end();
                cursor.advance(false);
                if cursor.lookahead() == '!' {
                    if !valid.contains(TokenKind::Comment) {
                        return None;
                    }
                    cursor.advance(false);
                    return Self::scan_comment(cursor);
                }
                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(cursor);
                }
                None
            }
            '\0' => {
                if valid.contains(TokenKind::ImplicitEndTag) {
                    cursor.mark_end();
                    return self.scan_implicit_end_tag(cursor);
                }
                None
            }
            '/' if valid.contains(TokenKind::SelfClosingTagDelimiter) => {
                self.scan_self_closing_tag_delimiter(cursor)
            }
            c if c.is_ascii_alphabetic() => {
                if valid.has_start_tag_name() {
                    self.scan_start_tag_name(cursor)
                } else if valid.has_end_tag_name() {
                    self.scan_end_tag_name(cursor)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
