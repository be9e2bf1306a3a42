use serde::Serialize;

/// Tokens the scanner can hand back to the parser.
///
/// The discriminant order is part of the external contract: the parser's
/// validity vector and the scanner's results are matched up positionally,
/// so variants must never be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    HtmlStartTagName,
    VoidStartTagName,
    ForeignStartTagName,
    ScriptStartTagName,
    StyleStartTagName,
    TitleStartTagName,
    TextareaStartTagName,
    PlaintextStartTagName,
    EndTagName,
    ErroneousEndTagName,
    SelfClosingTagDelimiter,
    ImplicitEndTag,
    RawText,
    RcdataText,
    PlaintextText,
    Comment,
    DjangoCommentContent,
    VerbatimStart,
    VerbatimBlockContent,
    ValidateGenericBlock,
    ValidateGenericSimple,
    FilterColon,
}

impl TokenKind {
    pub const COUNT: usize = 22;
}

/// The set of tokens the parser will accept at the current parse state.
///
/// The parser passes one flag per token kind; a compact bitset keeps the
/// dispatcher's many membership checks branch-cheap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidTokens(u32);

const START_TAG_NAMES: ValidTokens = ValidTokens::of(&[
    TokenKind::HtmlStartTagName,
    TokenKind::VoidStartTagName,
    TokenKind::ForeignStartTagName,
    TokenKind::ScriptStartTagName,
    TokenKind::StyleStartTagName,
    TokenKind::TitleStartTagName,
    TokenKind::TextareaStartTagName,
    TokenKind::PlaintextStartTagName,
]);

const END_TAG_NAMES: ValidTokens =
    ValidTokens::of(&[TokenKind::EndTagName, TokenKind::ErroneousEndTagName]);

impl ValidTokens {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << TokenKind::COUNT) - 1);

    #[must_use]
    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u32;
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1 << kind as u32))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Any of the eight start-tag-name tokens.
    #[must_use]
    pub const fn has_start_tag_name(self) -> bool {
        self.0 & START_TAG_NAMES.0 != 0
    }

    /// `END_TAG_NAME` or `ERRONEOUS_END_TAG_NAME`.
    #[must_use]
    pub const fn has_end_tag_name(self) -> bool {
        self.0 & END_TAG_NAMES.0 != 0
    }
}

impl FromIterator<TokenKind> for ValidTokens {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
