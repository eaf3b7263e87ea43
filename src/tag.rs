//! Parsing of per-field tags.
//!
//! A tag takes the form `name[,opt1[,opt2...]]`:
//!
//! * an empty tag, or one starting with a comma, keeps the field's declared
//!   name,
//! * the name `-` always skips the field,
//! * `omitempty` drops scalar fields holding an empty value.

use std::borrow::Cow;

/// Option dropping scalar fields that hold their kind's empty value.
pub const OMIT_EMPTY: &str = "omitempty";

/// Option marking a field whose record children are promoted into the
/// enclosing record. Only consulted when lowering `serde` structs, where
/// embedding cannot otherwise be expressed.
pub const INLINE: &str = "inline";

/// Name that skips a field unconditionally.
pub const SKIP: &str = "-";

/// The parsed form of a raw field tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag<'a> {
    name: Cow<'a, str>,
    options: Vec<&'a str>,
}

impl<'a> Tag<'a> {
    /// Parses `raw`, falling back to `declared` when the tag carries no name.
    ///
    /// ```
    /// use urlquery::Tag;
    ///
    /// let tag = Tag::parse("owner_id,omitempty", "OwnerID");
    /// assert_eq!(tag.name(), "owner_id");
    /// assert!(tag.has("omitempty"));
    ///
    /// let tag = Tag::parse(",omitempty", "Name");
    /// assert_eq!(tag.name(), "Name");
    /// ```
    pub fn parse(raw: &'a str, declared: &'a str) -> Self {
        if raw.is_empty() {
            return Self::named(declared);
        }

        let mut segments = raw.split(',');
        let name = match segments.next() {
            Some(name) if !name.is_empty() => name,
            _ => declared,
        };

        Self {
            name: Cow::Borrowed(name),
            options: segments.collect(),
        }
    }

    /// A tag with the given name and no options.
    pub fn named(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[&'a str] {
        &self.options
    }

    /// Checks whether the tag carries the option `opt`.
    pub fn has(&self, opt: &str) -> bool {
        self.options.iter().any(|o| *o == opt)
    }

    pub fn is_skipped(&self) -> bool {
        self.name == SKIP
    }

    pub fn omit_empty(&self) -> bool {
        self.has(OMIT_EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_uses_declared_name() {
        let tag = Tag::parse("", "Sex");
        assert_eq!(tag.name(), "Sex");
        assert!(tag.options().is_empty());
        assert!(!tag.omit_empty());
    }

    #[test]
    fn named_tag_with_options() {
        let tag = Tag::parse("owner_id,omitempty", "OwnerID");
        assert_eq!(tag.name(), "owner_id");
        assert!(tag.omit_empty());
        assert!(!tag.has("inline"));
    }

    #[test]
    fn leading_comma_keeps_declared_name() {
        let tag = Tag::parse(",omitempty", "Name");
        assert_eq!(tag.name(), "Name");
        assert_eq!(tag.options(), &["omitempty"]);
    }

    #[test]
    fn bare_comma() {
        let tag = Tag::parse(",", "Name");
        assert_eq!(tag.name(), "Name");
        assert_eq!(tag.options(), &[""]);
        assert!(!tag.omit_empty());
    }

    #[test]
    fn dash_is_skipped() {
        assert!(Tag::parse("-", "Secret").is_skipped());
        assert!(Tag::parse("-,omitempty", "Secret").is_skipped());
        assert!(!Tag::parse("-x", "Secret").is_skipped());
    }

    #[test]
    fn options_are_matched_exactly() {
        let tag = Tag::parse("a,omitemptyx,inline", "A");
        assert!(!tag.omit_empty());
        assert!(tag.has(INLINE));
    }
}
