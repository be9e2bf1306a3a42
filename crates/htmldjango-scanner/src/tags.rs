use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Closed set of tag categories the scanner distinguishes.
///
/// Only the tags that participate in a content-model rule, a raw-text mode,
/// or foreign content get their own kind; every other name is carried as
/// [`TagKind::Custom`] with the name stored on the [`Tag`]. Void kinds sort
/// first so [`TagKind::is_void`] is a single discriminant comparison, and
/// the discriminant doubles as the serialized kind byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TagKind {
    // Void elements.
    Area,
    Base,
    Br,
    Col,
    Embed,
    Hr,
    Img,
    Input,
    Link,
    Meta,
    Param,
    Source,
    Track,
    Wbr,
    // Document structure.
    Html,
    Head,
    Body,
    // Elements with special content modes.
    Script,
    Style,
    Title,
    Textarea,
    Plaintext,
    // Foreign content roots.
    Svg,
    Math,
    // Block-level elements that force an open `<p>` closed.
    Address,
    Article,
    Aside,
    Blockquote,
    Details,
    Div,
    Dl,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Header,
    Main,
    Menu,
    Nav,
    Ol,
    P,
    Pre,
    Section,
    Table,
    Ul,
    // Remaining participants in the implicit-close table.
    Li,
    Dt,
    Dd,
    Colgroup,
    Rp,
    Rt,
    Optgroup,
    Option,
    Tr,
    Td,
    Th,
    Tbody,
    Thead,
    Tfoot,
    // Everything else; the name lives on the `Tag`.
    Custom,
}

/// Every kind in discriminant order. Indexed by the serialized kind byte.
pub(crate) const ALL_KINDS: [TagKind; 67] = [
    TagKind::Area,
    TagKind::Base,
    TagKind::Br,
    TagKind::Col,
    TagKind::Embed,
    TagKind::Hr,
    TagKind::Img,
    TagKind::Input,
    TagKind::Link,
    TagKind::Meta,
    TagKind::Param,
    TagKind::Source,
    TagKind::Track,
    TagKind::Wbr,
    TagKind::Html,
    TagKind::Head,
    TagKind::Body,
    TagKind::Script,
    TagKind::Style,
    TagKind::Title,
    TagKind::Textarea,
    TagKind::Plaintext,
    TagKind::Svg,
    TagKind::Math,
    TagKind::Address,
    TagKind::Article,
    TagKind::Aside,
    TagKind::Blockquote,
    TagKind::Details,
    TagKind::Div,
    TagKind::Dl,
    TagKind::Fieldset,
    TagKind::Figcaption,
    TagKind::Figure,
    TagKind::Footer,
    TagKind::Form,
    TagKind::H1,
    TagKind::H2,
    TagKind::H3,
    TagKind::H4,
    TagKind::H5,
    TagKind::H6,
    TagKind::Header,
    TagKind::Main,
    TagKind::Menu,
    TagKind::Nav,
    TagKind::Ol,
    TagKind::P,
    TagKind::Pre,
    TagKind::Section,
    TagKind::Table,
    TagKind::Ul,
    TagKind::Li,
    TagKind::Dt,
    TagKind::Dd,
    TagKind::Colgroup,
    TagKind::Rp,
    TagKind::Rt,
    TagKind::Optgroup,
    TagKind::Option,
    TagKind::Tr,
    TagKind::Td,
    TagKind::Th,
    TagKind::Tbody,
    TagKind::Thead,
    TagKind::Tfoot,
    TagKind::Custom,
];

const NAME_TABLE: &[(&str, TagKind)] = &[
    ("AREA", TagKind::Area),
    ("BASE", TagKind::Base),
    ("BR", TagKind::Br),
    ("COL", TagKind::Col),
    ("EMBED", TagKind::Embed),
    ("HR", TagKind::Hr),
    ("IMG", TagKind::Img),
    ("INPUT", TagKind::Input),
    ("LINK", TagKind::Link),
    ("META", TagKind::Meta),
    ("PARAM", TagKind::Param),
    ("SOURCE", TagKind::Source),
    ("TRACK", TagKind::Track),
    ("WBR", TagKind::Wbr),
    ("HTML", TagKind::Html),
    ("HEAD", TagKind::Head),
    ("BODY", TagKind::Body),
    ("SCRIPT", TagKind::Script),
    ("STYLE", TagKind::Style),
    ("TITLE", TagKind::Title),
    ("TEXTAREA", TagKind::Textarea),
    ("PLAINTEXT", TagKind::Plaintext),
    ("SVG", TagKind::Svg),
    ("MATH", TagKind::Math),
    ("ADDRESS", TagKind::Address),
    ("ARTICLE", TagKind::Article),
    ("ASIDE", TagKind::Aside),
    ("BLOCKQUOTE", TagKind::Blockquote),
    ("DETAILS", TagKind::Details),
    ("DIV", TagKind::Div),
    ("DL", TagKind::Dl),
    ("FIELDSET", TagKind::Fieldset),
    ("FIGCAPTION", TagKind::Figcaption),
    ("FIGURE", TagKind::Figure),
    ("FOOTER", TagKind::Footer),
    ("FORM", TagKind::Form),
    ("H1", TagKind::H1),
    ("H2", TagKind::H2),
    ("H3", TagKind::H3),
    ("H4", TagKind::H4),
    ("H5", TagKind::H5),
    ("H6", TagKind::H6),
    ("HEADER", TagKind::Header),
    ("MAIN", TagKind::Main),
    ("MENU", TagKind::Menu),
    ("NAV", TagKind::Nav),
    ("OL", TagKind::Ol),
    ("P", TagKind::P),
    ("PRE", TagKind::Pre),
    ("SECTION", TagKind::Section),
    ("TABLE", TagKind::Table),
    ("UL", TagKind::Ul),
    ("LI", TagKind::Li),
    ("DT", TagKind::Dt),
    ("DD", TagKind::Dd),
    ("COLGROUP", TagKind::Colgroup),
    ("RP", TagKind::Rp),
    ("RT", TagKind::Rt),
    ("OPTGROUP", TagKind::Optgroup),
    ("OPTION", TagKind::Option),
    ("TR", TagKind::Tr),
    ("TD", TagKind::Td),
    ("TH", TagKind::Th),
    ("TBODY", TagKind::Tbody),
    ("THEAD", TagKind::Thead),
    ("TFOOT", TagKind::Tfoot),
];

static KINDS_BY_NAME: LazyLock<FxHashMap<&'static str, TagKind>> =
    LazyLock::new(|| NAME_TABLE.iter().copied().collect());

impl TagKind {
    #[must_use]
    pub fn is_void(self) -> bool {
        self as u8 <= TagKind::Wbr as u8
    }

    /// Roots of SVG/MathML subtrees, where HTML content-model rules stop
    /// applying and names stay case-sensitive.
    #[must_use]
    pub fn is_foreign_root(self) -> bool {
        matches!(self, TagKind::Svg | TagKind::Math)
    }

    pub(crate) fn from_serialized(byte: u8) -> Option<Self> {
        ALL_KINDS.get(usize::from(byte)).copied()
    }
}

/// An open element: a kind plus, for [`TagKind::Custom`], the owned name.
///
/// Two tags are equal when their kinds match and, for custom tags, their
/// name bytes match. Recognized kinds never store a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    kind: TagKind,
    name: Option<String>,
}

impl Tag {
    /// Classify `name`, uppercase-folding it for the lookup. Unrecognized
    /// names become custom tags carrying the folded name, so that a later
    /// end tag folded the same way compares equal.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        let folded = name.to_ascii_uppercase();
        match KINDS_BY_NAME.get(folded.as_str()) {
            Some(&kind) => Self { kind, name: None },
            None => Self {
                kind: TagKind::Custom,
                name: Some(folded),
            },
        }
    }

    /// A custom tag keeping `name` exactly as written. Used in foreign
    /// content, where SVG/MathML names are case-sensitive.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Custom,
            name: Some(name.into()),
        }
    }

    pub(crate) fn from_kind(kind: TagKind) -> Self {
        let name = matches!(kind, TagKind::Custom).then(String::new);
        Self { kind, name }
    }

    #[must_use]
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    /// HTML's implicit-close table: may `child` open inside `self` without
    /// forcing `self` closed first? Kinds with no rule default to true.
    #[must_use]
    pub fn can_contain(&self, child: &Tag) -> bool {
        use TagKind as K;

        let child = child.kind;
        match self.kind {
            K::Li => child != K::Li,
            K::Dt | K::Dd => !matches!(child, K::Dt | K::Dd),
            K::P => !matches!(
                child,
                K::Address
                    | K::Article
                    | K::Aside
                    | K::Blockquote
                    | K::Details
                    | K::Div
                    | K::Dl
                    | K::Fieldset
                    | K::Figcaption
                    | K::Figure
                    | K::Footer
                    | K::Form
                    | K::H1
                    | K::H2
                    | K::H3
                    | K::H4
                    | K::H5
                    | K::H6
                    | K::Header
                    | K::Hr
                    | K::Main
                    | K::Menu
                    | K::Nav
                    | K::Ol
                    | K::P
                    | K::Pre
                    | K::Section
                    | K::Table
                    | K::Ul
            ),
            K::Colgroup => child == K::Col,
            K::Rp | K::Rt => !matches!(child, K::Rp | K::Rt),
            K::Optgroup => child != K::Optgroup,
            K::Option => !matches!(child, K::Option | K::Optgroup),
            K::Tr => child != K::Tr,
            K::Td | K::Th => !matches!(child, K::Td | K::Th | K::Tr),
            K::Tbody | K::Thead | K::Tfoot => !matches!(child, K::Tbody | K::Thead | K::Tfoot),
            _ => true,
        }
    }
}
