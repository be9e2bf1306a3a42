//! The HTML side of the scanner: comments, tag names, implicit end tags,
//! and the raw-text content modes.

use crate::cursor::Cursor;
use crate::scanner::Scanner;
use crate::tags::Tag;
use crate::tags::TagKind;
use crate::tokens::TokenKind;

const RAW_SCRIPT: &[u8] = b"</SCRIPT";
const RAW_STYLE: &[u8] = b"</STYLE";
const RCDATA_TITLE: &[u8] = b"</TITLE";
const RCDATA_TEXTAREA: &[u8] = b"</TEXTAREA";

/// Tag names are `[A-Za-z0-9:_-]+`. Case is preserved; callers fold where
/// HTML rules call for it.
pub(crate) fn read_tag_name(cursor: &mut impl Cursor) -> String {
    let mut name = String::new();
    loop {
        let c = cursor.lookahead();
        if c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_') {
            name.push(c);
            cursor.advance(false);
        } else {
            break;
        }
    }
    name
}

/// States of the HTML5 comment tokenizer, entered after `<!--`.
enum CommentState {
    Start,
    StartDash,
    Body,
    LessThan,
    LessThanBang,
    LessThanBangDash,
    LessThanBangDashDash,
    EndDash,
    End,
    EndBang,
}

impl Scanner {
    /// Comment scanner, entered with `<!` already consumed. Accepts `-->`,
    /// `--!>`, an immediate `>`, and the abrupt `<!-->` / `<!--->` forms.
    /// End of input closes the comment at the cursor.
    pub(crate) fn scan_comment(cursor: &mut impl Cursor) -> Option<TokenKind> {
        match cursor.lookahead() {
            '>' => {
                cursor.advance(false);
                cursor.mark_end();
                return Some(TokenKind::Comment);
            }
            '-' => cursor.advance(false),
            _ => return None,
        }
        if cursor.lookahead() != '-' {
            return None;
        }
        cursor.advance(false);

        let mut state = CommentState::Start;
        loop {
            if cursor.eof() {
                cursor.mark_end();
                return Some(TokenKind::Comment);
            }
            let c = cursor.lookahead();
            state = match state {
                CommentState::Start => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::StartDash
                    }
                    '>' => {
                        cursor.advance(false);
                        cursor.mark_end();
                        return Some(TokenKind::Comment);
                    }
                    _ => CommentState::Body,
                },
                CommentState::StartDash => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::End
                    }
                    '>' => {
                        cursor.advance(false);
                        cursor.mark_end();
                        return Some(TokenKind::Comment);
                    }
                    _ => CommentState::Body,
                },
                CommentState::Body => {
                    cursor.advance(false);
                    match c {
                        '<' => CommentState::LessThan,
                        '-' => CommentState::EndDash,
                        _ => CommentState::Body,
                    }
                }
                CommentState::LessThan => match c {
                    '!' => {
                        cursor.advance(false);
                        CommentState::LessThanBang
                    }
                    '<' => {
                        cursor.advance(false);
                        CommentState::LessThan
                    }
                    _ => CommentState::Body,
                },
                CommentState::LessThanBang => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::LessThanBangDash
                    }
                    _ => CommentState::Body,
                },
                CommentState::LessThanBangDash => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::LessThanBangDashDash
                    }
                    _ => CommentState::EndDash,
                },
                CommentState::LessThanBangDashDash => CommentState::End,
                CommentState::EndDash => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::End
                    }
                    _ => CommentState::Body,
                },
                CommentState::End => match c {
                    '>' => {
                        cursor.advance(false);
                        cursor.mark_end();
                        return Some(TokenKind::Comment);
                    }
                    '!' => {
                        cursor.advance(false);
                        CommentState::EndBang
                    }
                    '-' => {
                        cursor.advance(false);
                        CommentState::End
                    }
                    _ => CommentState::Body,
                },
                CommentState::EndBang => match c {
                    '-' => {
                        cursor.advance(false);
                        CommentState::EndDash
                    }
                    '>' => {
                        cursor.advance(false);
                        cursor.mark_end();
                        return Some(TokenKind::Comment);
                    }
                    _ => CommentState::Body,
                },
            };
        }
    }

    pub(crate) fn scan_start_tag_name(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        let name = read_tag_name(cursor);
        if name.is_empty() {
            return None;
        }
        cursor.mark_end();

        if self.stack.in_foreign_content() {
            self.stack.push(Tag::custom(name));
            return Some(TokenKind::ForeignStartTagName);
        }

        let tag = Tag::for_name(&name);
        if tag.is_void() {
            return Some(TokenKind::VoidStartTagName);
        }
        let token = match tag.kind() {
            TagKind::Script => TokenKind::ScriptStartTagName,
            TagKind::Style => TokenKind::StyleStartTagName,
            TagKind::Title => TokenKind::TitleStartTagName,
            TagKind::Textarea => TokenKind::TextareaStartTagName,
            TagKind::Plaintext => TokenKind::PlaintextStartTagName,
            TagKind::Svg | TagKind::Math => TokenKind::ForeignStartTagName,
            _ => TokenKind::HtmlStartTagName,
        };
        self.stack.push(tag);
        Some(token)
    }

    pub(crate) fn scan_end_tag_name(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        let keep_case = self.stack.in_foreign_content()
            && self
                .stack
                .top()
                .is_some_and(|top| top.kind() == TagKind::Custom);

        let name = read_tag_name(cursor);
        if name.is_empty() {
            return None;
        }
        cursor.mark_end();

        let tag = if keep_case {
            Tag::custom(name)
        } else {
            Tag::for_name(&name)
        };

        if self.stack.top() == Some(&tag) {
            self.stack.pop();
            return Some(TokenKind::EndTagName);
        }
        // A match deeper in the stack is consumable without popping, so a
        // close in one Django branch does not steal the close of an element
        // opened in another.
        if self.stack.find_topdown(&tag).is_some() {
            return Some(TokenKind::EndTagName);
        }
        Some(TokenKind::ErroneousEndTagName)
    }

    /// Zero-width close of the current element. The dispatcher has already
    /// placed the end mark at the token start and, unless at end of input,
    /// consumed the `<` under inspection.
    pub(crate) fn scan_implicit_end_tag(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        if self.stack.is_empty() {
            return None;
        }

        if cursor.eof() {
            if !self.stack.has_open_non_foreign() {
                return None;
            }
            self.stack.pop();
            return Some(TokenKind::ImplicitEndTag);
        }

        // Closing tags are handled by the end-tag scanner's deep-match rule.
        if cursor.lookahead() == '/' {
            return None;
        }

        if self.stack.top().is_some_and(Tag::is_void) {
            self.stack.pop();
            return Some(TokenKind::ImplicitEndTag);
        }

        let name = read_tag_name(cursor);
        if name.is_empty() {
            return None;
        }
        let child = Tag::for_name(&name);
        let forces_close = self
            .stack
            .top()
            .is_some_and(|parent| !parent.can_contain(&child));
        if forces_close {
            self.stack.pop();
            return Some(TokenKind::ImplicitEndTag);
        }
        None
    }

    pub(crate) fn scan_self_closing_tag_delimiter(
        &mut self,
        cursor: &mut impl Cursor,
    ) -> Option<TokenKind> {
        if cursor.lookahead() != '/' {
            return None;
        }
        cursor.advance(false);
        if cursor.lookahead() != '>' {
            return None;
        }
        cursor.advance(false);
        cursor.mark_end();
        if self.stack.in_foreign_content() {
            self.stack.pop();
        }
        Some(TokenKind::SelfClosingTagDelimiter)
    }

    pub(crate) fn scan_raw_text(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        let sentinel = match self.stack.top().map(Tag::kind) {
            Some(TagKind::Script) => RAW_SCRIPT,
            Some(TagKind::Style) => RAW_STYLE,
            _ => return None,
        };
        Self::scan_text_until(cursor, sentinel, TokenKind::RawText)
    }

    pub(crate) fn scan_rcdata_text(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        let sentinel = match self.stack.top().map(Tag::kind) {
            Some(TagKind::Title) => RCDATA_TITLE,
            Some(TagKind::Textarea) => RCDATA_TEXTAREA,
            _ => return None,
        };
        Self::scan_text_until(cursor, sentinel, TokenKind::RcdataText)
    }

    /// Text until the element's end-tag sentinel (case-insensitive), a
    /// Django opener, or end of input. The sentinel and the opening `{` stay
    /// outside the token; an empty token is refused so the grammar sees the
    /// close directly.
    fn scan_text_until(
        cursor: &mut impl Cursor,
        sentinel: &[u8],
        token: TokenKind,
    ) -> Option<TokenKind> {
        let mut matched = 0;
        let mut has_content = false;
        cursor.mark_end();

        loop {
            let c = cursor.lookahead();
            if c == '\0' {
                break;
            }

            if matched > 0 {
                if c.is_ascii() && c.to_ascii_uppercase() == char::from(sentinel[matched]) {
                    matched += 1;
                    if matched == sentinel.len() {
                        break;
                    }
                    cursor.advance(false);
                } else {
                    // The partial sentinel becomes content; re-examine this
                    // character from scratch.
                    matched = 0;
                    has_content = true;
                }
                continue;
            }

            match c {
                '<' => {
                    cursor.mark_end();
                    cursor.advance(false);
                    matched = 1;
                }
                '{' => {
                    cursor.mark_end();
                    cursor.advance(false);
                    if matches!(cursor.lookahead(), '{' | '%' | '#') {
                        break;
                    }
                    has_content = true;
                    cursor.mark_end();
                }
                _ => {
                    cursor.advance(false);
                    has_content = true;
                    cursor.mark_end();
                }
            }
        }

        has_content.then_some(token)
    }

    pub(crate) fn scan_plaintext_text(&mut self, cursor: &mut impl Cursor) -> Option<TokenKind> {
        if self.stack.top().map(Tag::kind) != Some(TagKind::Plaintext) {
            return None;
        }
        while !cursor.eof() {
            cursor.advance(false);
        }
        cursor.mark_end();
        self.stack.pop();
        Some(TokenKind::PlaintextText)
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::StrCursor;
    use crate::tokens::ValidTokens;

    use super::*;

    fn comment(source: &str) -> Option<(TokenKind, usize)> {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new(source);
        let token = scanner.scan(&mut cursor, ValidTokens::of(&[TokenKind::Comment]))?;
        Some((token, cursor.token_end()))
    }

    #[test]
    fn comment_accept_forms() {
        assert_eq!(comment("<!-- a -->"), Some((TokenKind::Comment, 10)));
        assert_eq!(comment("<!--a--!>"), Some((TokenKind::Comment, 9)));
        assert_eq!(comment("<!>"), Some((TokenKind::Comment, 3)));
        assert_eq!(comment("<!-->"), Some((TokenKind::Comment, 5)));
        assert_eq!(comment("<!--->"), Some((TokenKind::Comment, 6)));
    }

    #[test]
    fn comment_body_tolerates_markup() {
        // `<!--` inside the body is a nested-comment parse error in HTML5
        // but still part of this comment.
        assert_eq!(
            comment("<!-- a <!-- b -->"),
            Some((TokenKind::Comment, 17))
        );
        assert_eq!(comment("<!-- < ! - -->"), Some((TokenKind::Comment, 14)));
        assert_eq!(comment("<!-- a - b -- c -->"), Some((TokenKind::Comment, 19)));
    }

    #[test]
    fn comment_lenient_at_eof() {
        assert_eq!(comment("<!-- never closed"), Some((TokenKind::Comment, 17)));
        assert_eq!(comment("<!--"), Some((TokenKind::Comment, 4)));
        assert_eq!(comment("<!-- a --"), Some((TokenKind::Comment, 9)));
    }

    #[test]
    fn not_a_comment() {
        assert_eq!(comment("<!doctype html>"), None);
        assert_eq!(comment("<!- x ->"), None);
    }

    #[test]
    fn start_tag_classification() {
        let cases = [
            ("div", TokenKind::HtmlStartTagName, 1),
            ("br", TokenKind::VoidStartTagName, 0),
            ("script", TokenKind::ScriptStartTagName, 1),
            ("style", TokenKind::StyleStartTagName, 1),
            ("title", TokenKind::TitleStartTagName, 1),
            ("textarea", TokenKind::TextareaStartTagName, 1),
            ("plaintext", TokenKind::PlaintextStartTagName, 1),
            ("svg", TokenKind::ForeignStartTagName, 1),
            ("math", TokenKind::ForeignStartTagName, 1),
            ("x-widget", TokenKind::HtmlStartTagName, 1),
        ];
        for (name, expected, depth) in cases {
            let mut scanner = Scanner::new();
            let mut cursor = StrCursor::new(name);
            assert_eq!(scanner.scan_start_tag_name(&mut cursor), Some(expected), "{name}");
            assert_eq!(scanner.stack.len(), depth, "{name}");
        }
    }

    #[test]
    fn unknown_start_tag_stores_folded_name() {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new("My-Widget>");
        scanner.scan_start_tag_name(&mut cursor);
        assert_eq!(scanner.stack.top(), Some(&Tag::for_name("my-widget")));
        assert_eq!(cursor.token(), "My-Widget");
    }

    #[test]
    fn end_tag_pops_only_on_top_match() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("ul"));
        scanner.stack.push(Tag::for_name("li"));

        let mut cursor = StrCursor::new("ul>");
        assert_eq!(
            scanner.scan_end_tag_name(&mut cursor),
            Some(TokenKind::EndTagName)
        );
        assert_eq!(scanner.stack.len(), 2);

        let mut cursor = StrCursor::new("li>");
        assert_eq!(
            scanner.scan_end_tag_name(&mut cursor),
            Some(TokenKind::EndTagName)
        );
        assert_eq!(scanner.stack.len(), 1);
    }

    #[test]
    fn end_tag_without_any_match_is_erroneous() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("div"));
        let mut cursor = StrCursor::new("span>");
        assert_eq!(
            scanner.scan_end_tag_name(&mut cursor),
            Some(TokenKind::ErroneousEndTagName)
        );
        assert_eq!(scanner.stack.len(), 1);
    }

    #[test]
    fn end_tag_case_sensitivity_in_foreign_content() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("svg"));
        scanner.stack.push(Tag::custom("feBlend"));

        let mut cursor = StrCursor::new("feblend>");
        assert_eq!(
            scanner.scan_end_tag_name(&mut cursor),
            Some(TokenKind::ErroneousEndTagName),
            "case must match inside foreign content"
        );

        let mut cursor = StrCursor::new("feBlend>");
        assert_eq!(
            scanner.scan_end_tag_name(&mut cursor),
            Some(TokenKind::EndTagName)
        );
        assert_eq!(scanner.stack.len(), 1);
    }

    #[test]
    fn implicit_end_pops_void_parent() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("input"));
        // Dispatcher has consumed `<`; the scanner sees the would-be child.
        let mut cursor = StrCursor::new("span>");
        assert_eq!(
            scanner.scan_implicit_end_tag(&mut cursor),
            Some(TokenKind::ImplicitEndTag)
        );
        assert!(scanner.stack.is_empty());
    }

    #[test]
    fn implicit_end_ignores_closing_tags() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("ul"));
        scanner.stack.push(Tag::for_name("li"));
        let mut cursor = StrCursor::new("/ul>");
        assert_eq!(scanner.scan_implicit_end_tag(&mut cursor), None);
        assert_eq!(scanner.stack.len(), 2);
    }

    #[test]
    fn implicit_end_respects_containment() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("div"));
        let mut cursor = StrCursor::new("p>");
        assert_eq!(scanner.scan_implicit_end_tag(&mut cursor), None);

        scanner.stack.push(Tag::for_name("p"));
        let mut cursor = StrCursor::new("div>");
        assert_eq!(
            scanner.scan_implicit_end_tag(&mut cursor),
            Some(TokenKind::ImplicitEndTag)
        );
        assert_eq!(scanner.stack.top(), Some(&Tag::for_name("div")));
    }

    #[test]
    fn implicit_end_at_eof_skips_pure_foreign_stack() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("svg"));
        let mut cursor = StrCursor::new("");
        assert_eq!(scanner.scan_implicit_end_tag(&mut cursor), None);
        assert_eq!(scanner.stack.len(), 1);
    }

    fn raw_text_over(source: &str, top: &str) -> (Option<TokenKind>, String) {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name(top));
        let mut cursor = StrCursor::new(source);
        let token = scanner.scan_raw_text(&mut cursor);
        (token, cursor.token().to_string())
    }

    #[test]
    fn raw_text_stops_before_end_tag_sentinel() {
        let (token, text) = raw_text_over("var x = 1;</script>", "script");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "var x = 1;");
    }

    #[test]
    fn raw_text_sentinel_is_case_insensitive() {
        let (token, text) = raw_text_over("a</ScRiPt>", "script");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "a");
    }

    #[test]
    fn raw_text_stops_before_django_openers() {
        for opener in ["{{ x }}", "{% if %}", "{# c #}"] {
            let source = format!("body {opener}");
            let (token, text) = raw_text_over(&source, "style");
            assert_eq!(token, Some(TokenKind::RawText));
            assert_eq!(text, "body ", "{opener}");
        }
    }

    #[test]
    fn raw_text_lone_brace_is_content() {
        let (token, text) = raw_text_over("a { b }</style>", "style");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "a { b }");
    }

    #[test]
    fn raw_text_angle_brackets_are_content() {
        let (token, text) = raw_text_over("1 < 2 && 3 > 2</script>", "script");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "1 < 2 && 3 > 2");
    }

    #[test]
    fn raw_text_overlapping_sentinel_prefix() {
        let (token, text) = raw_text_over("<</script>", "script");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "<");
    }

    #[test]
    fn empty_raw_text_is_refused() {
        let (token, _) = raw_text_over("</script>", "script");
        assert_eq!(token, None);
        let (token, _) = raw_text_over("{{ x }}", "script");
        assert_eq!(token, None);
    }

    #[test]
    fn raw_text_runs_to_eof_without_close() {
        let (token, text) = raw_text_over("unterminated", "script");
        assert_eq!(token, Some(TokenKind::RawText));
        assert_eq!(text, "unterminated");
    }

    #[test]
    fn rcdata_sentinel_follows_stack_top() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("title"));
        let mut cursor = StrCursor::new("My page</title>");
        assert_eq!(
            scanner.scan_rcdata_text(&mut cursor),
            Some(TokenKind::RcdataText)
        );
        assert_eq!(cursor.token(), "My page");

        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("textarea"));
        let mut cursor = StrCursor::new("a</title>b</textarea>");
        assert_eq!(
            scanner.scan_rcdata_text(&mut cursor),
            Some(TokenKind::RcdataText)
        );
        assert_eq!(cursor.token(), "a</title>b");
    }

    #[test]
    fn rcdata_requires_rcdata_element_on_top() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("script"));
        let mut cursor = StrCursor::new("x</script>");
        assert_eq!(scanner.scan_rcdata_text(&mut cursor), None);
    }

    #[test]
    fn plaintext_consumes_everything_and_pops() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("plaintext"));
        let mut cursor = StrCursor::new("</plaintext> is not special {{ here }}");
        assert_eq!(
            scanner.scan_plaintext_text(&mut cursor),
            Some(TokenKind::PlaintextText)
        );
        assert_eq!(cursor.token(), "</plaintext> is not special {{ here }}");
        assert!(scanner.stack.is_empty());
    }

    #[test]
    fn self_closing_requires_full_delimiter() {
        let mut scanner = Scanner::new();
        scanner.stack.push(Tag::for_name("div"));
        let mut cursor = StrCursor::new("/ >");
        assert_eq!(scanner.scan_self_closing_tag_delimiter(&mut cursor), None);
        assert_eq!(scanner.stack.len(), 1);
    }
}
