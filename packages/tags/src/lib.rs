//! AutoNifty tag engine - expand `***tag***` markers in webcomic templates.
//!
//! Templates are plain text (usually HTML) sprinkled with markers like
//! `***include header.html***` or `***date %B %d, %Y***`. The engine finds
//! each marker, asks the handler registered for its name for replacement
//! text, and splices that text in. Handlers may parse further templates,
//! so the parser keeps track of the include chain and refuses to loop.
//!
//! # Example
//!
//! ```
//! use autonifty_tags::{ComicDate, TagRegistry, TemplateParser};
//!
//! let registry = TagRegistry::with_builtins();
//! let today = ComicDate::from_ymd(2024, 1, 15).unwrap();
//! let mut parser = TemplateParser::new(&registry, today);
//!
//! assert_eq!(
//!     parser.parse_text("<p>***date %B %-d, %Y***</p>\n"),
//!     "<p>January 15, 2024</p>\n"
//! );
//! assert_eq!(parser.parse_text("***no_such_tag here***"), "no_such_tag here");
//! ```
//!
//! # Architecture
//!
//! - [`tag`]: handler trait, registry, parser session and built-in handlers
//! - [`date`]: the `ComicDate` type shared with date-aware handlers
//! - [`error`]: error types and Result alias

pub mod date;
pub mod error;
pub mod tag;

pub use date::ComicDate;
pub use error::{Result, TagError};
pub use tag::{TagEntry, TagHandler, TagMatch, TagRegistry, TemplateParser, UnknownTagPolicy};
