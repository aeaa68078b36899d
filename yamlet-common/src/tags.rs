use crate::{YamlError, YamlResult};
use hashbrown::HashMap;

/// Directives every document starts with, unless it overrides the handle.
pub const DEFAULT_TAG_DIRECTIVES: [(&str, &str); 2] = [("!", "!"), ("!!", "tag:yaml.org,2002:")];

/// `%TAG handle prefix` pair.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

impl TagDirective {
    pub fn new(handle: impl Into<String>, prefix: impl Into<String>) -> Self {
        TagDirective {
            handle: handle.into(),
            prefix: prefix.into(),
        }
    }

    pub fn defaults() -> impl Iterator<Item = TagDirective> {
        DEFAULT_TAG_DIRECTIVES
            .iter()
            .map(|(handle, prefix)| TagDirective::new(*handle, *prefix))
    }

    pub fn is_default(&self) -> bool {
        DEFAULT_TAG_DIRECTIVES
            .iter()
            .any(|(handle, prefix)| self.handle == *handle && self.prefix == *prefix)
    }
}

/// Ordered set of tag directives keyed by handle.
#[derive(Clone, Debug, Default)]
pub struct TagDirectiveCollection {
    directives: Vec<TagDirective>,
    by_handle: HashMap<String, usize>,
}

impl TagDirectiveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding only `!` and `!!`.
    pub fn with_defaults() -> Self {
        let mut col = Self::new();
        for directive in TagDirective::defaults() {
            col.add_default(directive);
        }
        col
    }

    /// Adds a directive, failing when its handle is already present.
    pub fn add(&mut self, directive: TagDirective) -> YamlResult<()> {
        if self.contains(&directive.handle) {
            return Err(YamlError::InvalidArgument(format!(
                "duplicate tag handle {}",
                directive.handle
            )));
        }
        self.push(directive);
        Ok(())
    }

    /// Adds a directive unless its handle is already taken. Returns whether it was added.
    pub fn add_default(&mut self, directive: TagDirective) -> bool {
        if self.contains(&directive.handle) {
            return false;
        }
        self.push(directive);
        true
    }

    fn push(&mut self, directive: TagDirective) {
        self.by_handle
            .insert(directive.handle.clone(), self.directives.len());
        self.directives.push(directive);
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.by_handle.contains_key(handle)
    }

    pub fn find(&self, handle: &str) -> Option<&TagDirective> {
        self.by_handle.get(handle).map(|&i| &self.directives[i])
    }

    /// Directive with the longest prefix that `tag` starts with.
    pub fn find_by_prefix(&self, tag: &str) -> Option<&TagDirective> {
        self.directives
            .iter()
            .filter(|d| !d.prefix.is_empty() && tag.starts_with(&d.prefix))
            .max_by_key(|d| d.prefix.len())
    }

    pub fn iter(&self) -> core::slice::Iter<'_, TagDirective> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn clear(&mut self) {
        self.directives.clear();
        self.by_handle.clear();
    }
}

impl PartialEq for TagDirectiveCollection {
    fn eq(&self, other: &Self) -> bool {
        self.directives == other.directives
    }
}

impl Eq for TagDirectiveCollection {}

impl<'a> IntoIterator for &'a TagDirectiveCollection {
    type Item = &'a TagDirective;
    type IntoIter = core::slice::Iter<'a, TagDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl FromIterator<TagDirective> for TagDirectiveCollection {
    fn from_iter<T: IntoIterator<Item = TagDirective>>(iter: T) -> Self {
        let mut col = Self::new();
        for directive in iter {
            col.add_default(directive);
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let col = TagDirectiveCollection::with_defaults();
        assert_eq!(col.len(), 2);
        assert_eq!(col.find("!!").map(|x| x.prefix.as_str()), Some("tag:yaml.org,2002:"));
        assert_eq!(col.find("!").map(|x| x.prefix.as_str()), Some("!"));
    }

    #[test]
    fn test_duplicate_handle() {
        let mut col = TagDirectiveCollection::new();
        assert!(col.add(TagDirective::new("!e!", "tag:example.com,2000:")).is_ok());
        assert!(col.add(TagDirective::new("!e!", "tag:other:")).is_err());
        assert!(!col.add_default(TagDirective::new("!e!", "tag:other:")));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn test_explicit_overrides_default() {
        let mut col = TagDirectiveCollection::new();
        col.add(TagDirective::new("!!", "tag:example.com,2000:"))
            .unwrap();
        for d in TagDirective::defaults() {
            col.add_default(d);
        }
        assert_eq!(col.find("!!").map(|x| x.prefix.as_str()), Some("tag:example.com,2000:"));
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn test_longest_prefix() {
        let mut col = TagDirectiveCollection::with_defaults();
        col.add(TagDirective::new("!y!", "tag:yaml.org,2002:int:"))
            .unwrap();
        let found = col.find_by_prefix("tag:yaml.org,2002:int:x");
        assert_eq!(found.map(|x| x.handle.as_str()), Some("!y!"));
    }
}
