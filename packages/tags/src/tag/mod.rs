//! Tag system for expanding `***tag***` markers in templates.
//!
//! A [`TemplateParser`] scans text for markers and hands each one to the
//! [`TagRegistry`], which maps the tag name to its [`TagHandler`] and
//! returns the handler's replacement text. Handlers are looked up by a
//! naming convention (`nav_prev` → `NavPrevTag`); names without a handler
//! fall back to [`NullTag`], which puts the marker's contents back.

mod config;
pub mod handlers;
mod handler;
mod parser;
mod registry;

pub use config::builtin_tags;
pub use handler::{TagHandler, TagMatch};
pub use handlers::{DateTag, IncludeTag, InvalidTag, NullTag};
pub use parser::{TemplateParser, TAG_PATTERN};
pub use registry::{
    canonical_name, TagEntry, TagFactory, TagRegistry, UnknownTagPolicy, HANDLER_SUFFIX,
    NAME_SEPARATOR,
};
