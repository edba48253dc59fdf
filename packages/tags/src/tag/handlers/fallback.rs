//! Fallback handlers used when a tag name can't be resolved.

use std::cell::RefCell;

use crate::tag::handler::{TagHandler, TagMatch};
use crate::tag::parser::TemplateParser;

/// Returned by [`NullTag`] when it is handed a match with nothing in it.
pub const UNMATCHED_NULL_TAG: &str = "UNMATCHED NULLTAG!";

/// Default response of [`InvalidTag`].
pub const DEFAULT_INVALID_RESPONSE: &str = "ERROR: Invalid tag!";

/// Handler that acts as if the marker weren't a tag.
///
/// The tag name (and params, joined by a single space) go back into the
/// output with the delimiters stripped, so `***mystery_tag foo***` becomes
/// `mystery_tag foo`. A marker with no name comes back exactly as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTag;

impl TagHandler for NullTag {
    fn handle(&self, tag: &TagMatch<'_>, _parser: &mut TemplateParser<'_>) -> String {
        let Some(name) = tag.name else {
            if tag.text.is_empty() {
                return UNMATCHED_NULL_TAG.to_string();
            }
            return tag.text.to_string();
        };

        match tag.params {
            Some(params) => format!("{name} {params}"),
            None => name.to_string(),
        }
    }
}

/// Handler that replaces the marker with an error message.
///
/// Useful where a silent [`NullTag`] would hide a mistake in a template.
#[derive(Debug)]
pub struct InvalidTag {
    response: RefCell<String>,
}

impl InvalidTag {
    /// Create a handler with the default response.
    #[must_use]
    pub fn new() -> Self {
        Self::with_response(DEFAULT_INVALID_RESPONSE)
    }

    /// Create a handler with a custom response.
    #[must_use]
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: RefCell::new(response.into()),
        }
    }

    /// Replace the response returned from now on.
    pub fn set_response(&self, response: impl Into<String>) {
        *self.response.borrow_mut() = response.into();
    }

    #[must_use]
    pub fn response(&self) -> String {
        self.response.borrow().clone()
    }
}

impl Default for InvalidTag {
    fn default() -> Self {
        Self::new()
    }
}

impl TagHandler for InvalidTag {
    fn handle(&self, _tag: &TagMatch<'_>, _parser: &mut TemplateParser<'_>) -> String {
        self.response()
    }
}
