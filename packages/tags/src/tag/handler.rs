//! Tag handler trait definition.

use regex::Captures;

use super::parser::TemplateParser;

/// One `***name params***` marker found in template text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagMatch<'t> {
    /// The full marker text, delimiters included.
    pub text: &'t str,
    /// Tag name as written, if the marker had one.
    pub name: Option<&'t str>,
    /// Everything after the name up to the closing delimiter, trimmed.
    pub params: Option<&'t str>,
}

impl<'t> TagMatch<'t> {
    /// Create a match for a named marker.
    #[must_use]
    pub fn new(text: &'t str, name: &'t str, params: Option<&'t str>) -> Self {
        Self {
            text,
            name: Some(name),
            params,
        }
    }

    /// Build a match from the captures of the marker pattern.
    pub(crate) fn from_captures(caps: &Captures<'t>) -> Self {
        Self {
            text: caps.get(0).map_or("", |m| m.as_str()),
            name: caps.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty()),
            params: caps.get(2).map(|m| m.as_str()).filter(|s| !s.is_empty()),
        }
    }
}

/// Trait for tag handlers.
///
/// A handler turns one kind of marker into replacement text. The registry
/// builds exactly one instance per kind and keeps it for the whole run, so a
/// handler may carry state between invocations. That state must only be
/// cleared by [`reset_for_day`](TagHandler::reset_for_day) and
/// [`reset_for_page`](TagHandler::reset_for_page).
///
/// `handle` takes `&self` because handlers re-enter the registry (an
/// `include` parses a file whose markers dispatch back into the same
/// registry, possibly to the same handler). Keep mutable state in `Cell` or
/// `RefCell` and never hold a `RefCell` borrow across a call into the parser.
///
/// Handlers are not expected to be thread-safe. A registry and its handlers
/// serve one parse at a time.
pub trait TagHandler {
    /// Produce the replacement text for a marker.
    ///
    /// Must not panic on odd input. Report failures as returned text
    /// (see [`TagError::inline`](crate::TagError::inline)) so one bad tag
    /// doesn't take the rest of the page with it.
    fn handle(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String;

    /// Clear anything that shouldn't survive into a new comic day.
    fn reset_for_day(&self) {}

    /// Clear anything scoped to a single rendered page.
    fn reset_for_page(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagRegistry;
    use crate::ComicDate;

    struct ShoutHandler;

    impl TagHandler for ShoutHandler {
        fn handle(&self, tag: &TagMatch<'_>, _parser: &mut TemplateParser<'_>) -> String {
            tag.params.unwrap_or_default().to_uppercase()
        }
    }

    #[test]
    fn test_handler_trait() {
        let registry = TagRegistry::new();
        let today = ComicDate::from_ymd(2024, 1, 15).unwrap();
        let mut parser = TemplateParser::new(&registry, today);

        let tag = TagMatch::new("***shout hi***", "shout", Some("hi"));
        assert_eq!(ShoutHandler.handle(&tag, &mut parser), "HI");
    }

    #[test]
    fn test_default_resets_are_noops() {
        ShoutHandler.reset_for_day();
        ShoutHandler.reset_for_page();
    }
}
