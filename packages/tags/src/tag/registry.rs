//! Tag registry for mapping tag names to handlers.

use std::collections::{HashMap, HashSet};

use super::config::builtin_tags;
use super::handler::{TagHandler, TagMatch};
use super::handlers::{InvalidTag, NullTag};
use super::parser::TemplateParser;
use crate::error::Result;

/// Separator between the words of a tag name (`nav_prev`).
pub const NAME_SEPARATOR: char = '_';

/// Suffix appended to every canonical handler name (`NavPrevTag`).
pub const HANDLER_SUFFIX: &str = "Tag";

/// Constructor for one handler kind.
pub type TagFactory = Box<dyn Fn() -> Result<Box<dyn TagHandler>>>;

/// One row of a registration table: a tag name and how to build its handler.
pub struct TagEntry {
    name: String,
    factory: TagFactory,
}

impl TagEntry {
    /// Create an entry for the tag written as `name` in templates.
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn() -> Result<Box<dyn TagHandler>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    /// Tag name as written in templates.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What to do with a marker whose name has no registered handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Put the marker's name and params back into the output.
    #[default]
    Echo,
    /// Replace the marker with an error message naming the tag.
    Report,
}

/// Convert a tag name to the canonical handler name.
///
/// The name is lower-cased and split on underscores, each word is
/// capitalised, and the words are joined and suffixed with `Tag`.
///
/// # Examples
/// ```
/// use autonifty_tags::tag::canonical_name;
///
/// assert_eq!(canonical_name("nav_prev"), "NavPrevTag");
/// assert_eq!(canonical_name("MYSTERY_tag"), "MysteryTagTag");
/// ```
#[must_use]
pub fn canonical_name(raw: &str) -> String {
    let mut name: String = raw
        .to_lowercase()
        .split(NAME_SEPARATOR)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    name.push_str(HANDLER_SUFFIX);
    name
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registry owning one handler instance per tag kind.
///
/// Lookups never fail: a name without a handler resolves to a fallback
/// chosen by the registry's [`UnknownTagPolicy`].
pub struct TagRegistry {
    handlers: HashMap<String, Box<dyn TagHandler>>,
    null: NullTag,
    invalid: InvalidTag,
    policy: UnknownTagPolicy,
}

impl TagRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            null: NullTag,
            invalid: InvalidTag::new(),
            policy: UnknownTagPolicy::default(),
        }
    }

    /// Create a registry holding the engine's built-in tags.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all(builtin_tags());
        registry
    }

    /// Set how unknown tag names are rendered.
    #[must_use]
    pub fn with_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> UnknownTagPolicy {
        self.policy
    }

    /// Register an already constructed handler for a tag name.
    ///
    /// A handler previously registered under the same canonical name is
    /// replaced.
    pub fn register(&mut self, tag_name: &str, handler: impl TagHandler + 'static) {
        self.handlers
            .insert(canonical_name(tag_name), Box::new(handler));
    }

    /// Construct and register every entry of a registration table.
    ///
    /// An entry whose factory fails is logged and left out; the remaining
    /// entries still register. Markers naming a left-out tag fall back like
    /// any other unknown name.
    ///
    /// # Returns
    /// The number of handlers that were registered.
    pub fn register_all(&mut self, entries: impl IntoIterator<Item = TagEntry>) -> usize {
        let mut registered = 0;

        for entry in entries {
            let canonical = canonical_name(&entry.name);
            match (entry.factory)() {
                Ok(handler) => {
                    tracing::debug!(tag = %entry.name, handler = %canonical, "Registered tag");
                    self.handlers.insert(canonical, handler);
                    registered += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        tag = %entry.name,
                        error = %err,
                        "Couldn't construct tag, skipping"
                    );
                }
            }
        }

        registered
    }

    /// Get the handler for a tag name, or the fallback if there is none.
    #[must_use]
    pub fn resolve(&self, tag_name: &str) -> &dyn TagHandler {
        let canonical = canonical_name(tag_name);

        if let Some(handler) = self.handlers.get(&canonical) {
            return handler.as_ref();
        }

        match self.policy {
            UnknownTagPolicy::Echo => &self.null,
            UnknownTagPolicy::Report => {
                self.invalid
                    .set_response(format!("ERROR: Invalid tag! No handler named {canonical}."));
                &self.invalid
            }
        }
    }

    /// Produce the replacement text for one marker.
    ///
    /// A marker without a name goes straight to the echo fallback, which
    /// hands back the marker text as found.
    pub fn dispatch(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String {
        let Some(name) = tag.name else {
            return self.null.handle(tag, parser);
        };

        tracing::trace!(tag = name, params = ?tag.params, "Dispatching tag");
        self.resolve(name).handle(tag, parser)
    }

    /// Tell every handler a new comic day is starting.
    pub fn reset_for_day(&self) {
        for handler in self.handlers.values() {
            handler.reset_for_day();
        }
    }

    /// Tell every handler a new page is starting.
    pub fn reset_for_page(&self) {
        for handler in self.handlers.values() {
            handler.reset_for_page();
        }
    }

    /// Check if a handler is registered for a tag name.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(&canonical_name(tag_name))
    }

    /// Return set of all registered canonical handler names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::TagError;
    use crate::ComicDate;

    struct FixedHandler(&'static str);

    impl TagHandler for FixedHandler {
        fn handle(&self, _tag: &TagMatch<'_>, _parser: &mut TemplateParser<'_>) -> String {
            self.0.to_string()
        }
    }

    #[derive(Default)]
    struct CounterHandler {
        day: Cell<u32>,
        page: Cell<u32>,
    }

    impl TagHandler for CounterHandler {
        fn handle(&self, _tag: &TagMatch<'_>, _parser: &mut TemplateParser<'_>) -> String {
            self.day.set(self.day.get() + 1);
            self.page.set(self.page.get() + 1);
            format!("{}/{}", self.day.get(), self.page.get())
        }

        fn reset_for_day(&self) {
            self.day.set(0);
            self.page.set(0);
        }

        fn reset_for_page(&self) {
            self.page.set(0);
        }
    }

    fn today() -> ComicDate {
        ComicDate::from_ymd(2024, 1, 15).unwrap()
    }

    fn run(registry: &TagRegistry, tag: &TagMatch<'_>) -> String {
        let mut parser = TemplateParser::new(registry, today());
        registry.dispatch(tag, &mut parser)
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("include"), "IncludeTag");
        assert_eq!(canonical_name("nav_prev"), "NavPrevTag");
        assert_eq!(canonical_name("NAV_PREV"), "NavPrevTag");
        assert_eq!(canonical_name("mystery_tag"), "MysteryTagTag");
        assert_eq!(canonical_name("nav__prev_"), "NavPrevTag");
    }

    #[test]
    fn test_registry_register_and_resolve() {
        let mut registry = TagRegistry::new();
        registry.register("hello_world", FixedHandler("hi"));

        assert!(registry.has_handler("hello_world"));
        assert!(registry.has_handler("HELLO_WORLD"));
        assert!(registry.registered_tags().contains("HelloWorldTag"));

        let tag = TagMatch::new("***Hello_World***", "Hello_World", None);
        assert_eq!(run(&registry, &tag), "hi");
    }

    #[test]
    fn test_resolve_unknown_echoes() {
        let registry = TagRegistry::new();
        let tag = TagMatch::new("***mystery_tag foo bar***", "mystery_tag", Some("foo bar"));
        assert_eq!(run(&registry, &tag), "mystery_tag foo bar");
    }

    #[test]
    fn test_resolve_unknown_reports_under_strict_policy() {
        let registry = TagRegistry::new().with_policy(UnknownTagPolicy::Report);
        let tag = TagMatch::new("***mystery***", "mystery", None);
        let out = run(&registry, &tag);
        assert!(out.starts_with("ERROR: Invalid tag!"));
        assert!(out.contains("MysteryTag"));
    }

    #[test]
    fn test_dispatch_without_name_returns_marker_text() {
        let registry = TagRegistry::with_builtins();
        let tag = TagMatch {
            text: "***   ***",
            name: None,
            params: None,
        };
        assert_eq!(run(&registry, &tag), "***   ***");
    }

    #[test]
    fn test_register_all_isolates_failures() {
        let mut registry = TagRegistry::new();
        let entries = vec![
            TagEntry::new("first", || Ok(Box::new(FixedHandler("1")) as Box<dyn TagHandler>)),
            TagEntry::new("broken", || {
                Err(TagError::Construction {
                    tag: "broken".to_string(),
                    reason: "missing data file".to_string(),
                })
            }),
            TagEntry::new("third", || Ok(Box::new(FixedHandler("3")) as Box<dyn TagHandler>)),
        ];

        assert_eq!(registry.register_all(entries), 2);
        assert!(registry.has_handler("first"));
        assert!(!registry.has_handler("broken"));
        assert!(registry.has_handler("third"));

        let tag = TagMatch::new("***broken now***", "broken", Some("now"));
        assert_eq!(run(&registry, &tag), "broken now");
    }

    #[test]
    fn test_reset_broadcasts() {
        let mut registry = TagRegistry::new();
        registry.register("counter", CounterHandler::default());
        let tag = TagMatch::new("***counter***", "counter", None);
        let mut parser = TemplateParser::new(&registry, today());

        assert_eq!(registry.dispatch(&tag, &mut parser), "1/1");
        assert_eq!(registry.dispatch(&tag, &mut parser), "2/2");

        registry.reset_for_page();
        assert_eq!(registry.dispatch(&tag, &mut parser), "3/1");

        registry.reset_for_day();
        assert_eq!(registry.dispatch(&tag, &mut parser), "1/1");
    }

    #[test]
    fn test_with_builtins() {
        let registry = TagRegistry::with_builtins();
        assert!(registry.has_handler("include"));
        assert!(registry.has_handler("date"));
        assert!(registry.has_handler("today"));
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
