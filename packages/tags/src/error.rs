//! Error types for the tag engine.
//!
//! Nothing in the engine propagates these to the caller of
//! [`TemplateParser`](crate::TemplateParser). They exist so handlers and the
//! parser can describe a failure precisely and then render it inline with
//! [`TagError::inline`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the tag engine.
#[derive(Debug, Error)]
pub enum TagError {
    /// A file is already being parsed further up the include chain.
    #[error("This is an include loop! {} is already being included!", .path.display())]
    IncludeLoop { path: PathBuf },

    /// A template file could not be opened or read.
    #[error("Something went wrong reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template file is not UTF-8 text.
    #[error("File {} is not valid UTF-8 text", .path.display())]
    NotText { path: PathBuf },

    /// A tag was used without a parameter it requires.
    #[error("The {tag} tag needs {what}")]
    MissingParameter { tag: String, what: &'static str },

    /// A strftime-style format string could not be understood.
    #[error("Invalid date format '{0}'")]
    InvalidFormat(String),

    /// A date that does not exist on the calendar, or a malformed datestamp.
    #[error("Invalid date: '{0}'. Expected a real date as YYYYMMDD (e.g., 20240115)")]
    InvalidDate(String),

    /// A handler kind could not be constructed when the registry was built.
    #[error("Couldn't construct tag {tag}: {reason}")]
    Construction { tag: String, reason: String },
}

impl TagError {
    /// Render the error as replacement text for the marker that caused it.
    #[must_use]
    pub fn inline(&self) -> String {
        format!("ERROR: {self}")
    }
}

/// Result type alias for tag engine operations.
pub type Result<T> = std::result::Result<T, TagError>;
