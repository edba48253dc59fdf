//! Error types for the publisher.
//!
//! Template problems never show up here; the tag engine renders those
//! inline. These are the failures that stop a publishing run: bad
//! configuration, missing directories and templates, and filesystem errors.

use std::path::PathBuf;

use autonifty_tags::TagError;
use thiserror::Error;

/// Main error type for the publisher library.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A logical directory name that the configuration doesn't know.
    #[error("Unknown directory '{0}'. Expected one of: comicsdir, uploaddir, sitedir, parsedir, imagedir, dailydir, workdir, datadir")]
    UnknownDirectory(String),

    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML deserialization error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A staged comic could not be moved into the comics directory.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template the run needs doesn't exist.
    #[error("Template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    /// There is nothing to publish.
    #[error("No live comics found in {}", .0.display())]
    EmptyBucket(PathBuf),

    /// Invalid date or other tag engine error surfaced outside a template.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for publisher operations.
pub type Result<T> = std::result::Result<T, PublishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PublishError::UnknownDirectory("cachedir".to_string());
        assert!(err.to_string().contains("cachedir"));
        assert!(err.to_string().contains("comicsdir"));
    }

    #[test]
    fn test_tag_error_is_transparent() {
        let err: PublishError = TagError::InvalidDate("2024".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid date: '2024'. Expected a real date as YYYYMMDD (e.g., 20240115)"
        );
    }
}
