use crate::tags::Tag;

/// The ordered sequence of currently-open elements.
///
/// Pushed only by the start-tag scanner, popped only by the end-tag,
/// implicit-end, plaintext-text, and foreign self-close paths. Owns the
/// name storage of any custom tags on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementStack {
    tags: Vec<Tag>,
}

impl ElementStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn pop(&mut self) -> Option<Tag> {
        self.tags.pop()
    }

    #[must_use]
    pub fn top(&self) -> Option<&Tag> {
        self.tags.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// True while any `<svg>` or `<math>` is open anywhere on the stack.
    #[must_use]
    pub fn in_foreign_content(&self) -> bool {
        self.tags.iter().any(|tag| tag.kind().is_foreign_root())
    }

    /// Distance from the top of the nearest entry equal to `tag`
    /// (0 is the top itself).
    #[must_use]
    pub fn find_topdown(&self, tag: &Tag) -> Option<usize> {
        self.tags.iter().rev().position(|open| open == tag)
    }

    /// True when at least one open element sits outside foreign content.
    ///
    /// Everything at or above the lowest foreign root is foreign, so only
    /// the bottom entry needs checking.
    #[must_use]
    pub fn has_open_non_foreign(&self) -> bool {
        self.tags
            .first()
            .is_some_and(|tag| !tag.kind().is_foreign_root())
    }
}

impl<'a> IntoIterator for &'a ElementStack {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_top() {
        let mut stack = ElementStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);

        stack.push(Tag::for_name("div"));
        stack.push(Tag::for_name("p"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top(), Some(&Tag::for_name("p")));

        assert_eq!(stack.pop(), Some(Tag::for_name("p")));
        assert_eq!(stack.pop(), Some(Tag::for_name("div")));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn foreign_content_tracking() {
        let mut stack = ElementStack::new();
        stack.push(Tag::for_name("div"));
        assert!(!stack.in_foreign_content());

        stack.push(Tag::for_name("svg"));
        assert!(stack.in_foreign_content());

        stack.push(Tag::custom("circle"));
        assert!(stack.in_foreign_content());

        stack.pop();
        stack.pop();
        assert!(!stack.in_foreign_content());
    }

    #[test]
    fn find_topdown_returns_nearest_match() {
        let mut stack = ElementStack::new();
        stack.push(Tag::for_name("div"));
        stack.push(Tag::for_name("ul"));
        stack.push(Tag::for_name("div"));
        stack.push(Tag::for_name("li"));

        assert_eq!(stack.find_topdown(&Tag::for_name("li")), Some(0));
        assert_eq!(stack.find_topdown(&Tag::for_name("div")), Some(1));
        assert_eq!(stack.find_topdown(&Tag::for_name("ul")), Some(2));
        assert_eq!(stack.find_topdown(&Tag::for_name("table")), None);
    }

    #[test]
    fn custom_tags_match_by_name() {
        let mut stack = ElementStack::new();
        stack.push(Tag::custom("x-panel"));
        assert_eq!(stack.find_topdown(&Tag::custom("x-panel")), Some(0));
        assert_eq!(stack.find_topdown(&Tag::custom("x-other")), None);
    }

    #[test]
    fn open_non_foreign_ignores_foreign_subtrees() {
        let mut stack = ElementStack::new();
        assert!(!stack.has_open_non_foreign());

        stack.push(Tag::for_name("svg"));
        stack.push(Tag::custom("g"));
        assert!(!stack.has_open_non_foreign());

        stack.clear();
        stack.push(Tag::for_name("body"));
        stack.push(Tag::for_name("svg"));
        assert!(stack.has_open_non_foreign());
    }
}
