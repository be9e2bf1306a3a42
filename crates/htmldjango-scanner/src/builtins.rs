//! The reserved Django template tag keywords.
//!
//! Tags named here are matched by the grammar's own keyword tokens, so the
//! generic-tag validator refuses them: an unknown identifier is only a
//! candidate for the generic simple/block productions when it is not a
//! built-in.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

const BUILTIN_TAGS: &[&str] = &[
    "if",
    "elif",
    "else",
    "endif",
    "for",
    "empty",
    "endfor",
    "with",
    "endwith",
    "block",
    "endblock",
    "extends",
    "include",
    "load",
    "url",
    "csrf_token",
    "autoescape",
    "endautoescape",
    "filter",
    "endfilter",
    "spaceless",
    "endspaceless",
    "verbatim",
    "endverbatim",
    "cycle",
    "firstof",
    "now",
    "regroup",
    "ifchanged",
    "endifchanged",
    "widthratio",
    "templatetag",
    "debug",
    "lorem",
    "resetcycle",
    "querystring",
    "partialdef",
    "endpartialdef",
    "partial",
    "comment",
    "endcomment",
];

static BUILTIN_TAG_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| BUILTIN_TAGS.iter().copied().collect());

/// Whether `name` is one of Django's built-in template tags.
#[must_use]
pub fn is_builtin_tag(name: &str) -> bool {
    BUILTIN_TAG_SET.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_builtins() {
        for name in ["if", "endif", "csrf_token", "verbatim", "querystring"] {
            assert!(is_builtin_tag(name), "{name} is a built-in");
        }
    }

    #[test]
    fn rejects_unknown_and_near_misses() {
        for name in ["tabs", "blocktranslate", "IF", "endif ", ""] {
            assert!(!is_builtin_tag(name), "{name:?} is not a built-in");
        }
    }
}
