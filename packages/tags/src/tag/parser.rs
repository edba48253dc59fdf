//! Template parser that expands tag markers using the registry.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::handler::TagMatch;
use super::registry::TagRegistry;
use crate::date::ComicDate;
use crate::error::TagError;

/// Marker pattern: `***`, the tag name, optional params, `***`.
///
/// Group 1 is the name and group 2 the params. Whitespace just inside the
/// delimiters is not captured. A marker holding only whitespace still
/// matches, with neither group set.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*\s*(?:(\S+?)(?:\s+(.+?))?)?\s*\*\*\*").expect("valid regex")
});

/// One parse session.
///
/// The parser borrows a [`TagRegistry`] and carries the state its handlers
/// share while a page is rendered: the files currently open in the include
/// chain, the frozen "today" and the requested comic date.
///
/// Neither entry point fails. Unreadable files, include loops and broken
/// tags all come back as `ERROR: ...` text in place of whatever couldn't be
/// produced.
pub struct TemplateParser<'r> {
    registry: &'r TagRegistry,
    open_files: HashSet<PathBuf>,
    today: ComicDate,
    requested_date: ComicDate,
    include_root: Option<PathBuf>,
}

impl<'r> TemplateParser<'r> {
    /// Start a session. The requested date starts out as `today`.
    #[must_use]
    pub fn new(registry: &'r TagRegistry, today: ComicDate) -> Self {
        Self {
            registry,
            open_files: HashSet::new(),
            today,
            requested_date: today,
            include_root: None,
        }
    }

    /// Resolve relative include paths against `root` instead of the
    /// working directory.
    #[must_use]
    pub fn with_include_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.include_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn include_root(&self) -> Option<&Path> {
        self.include_root.as_deref()
    }

    /// The day this session was started for.
    #[must_use]
    pub fn today(&self) -> ComicDate {
        self.today
    }

    /// The comic date being rendered. Matches [`today`](Self::today) until
    /// someone sets it.
    #[must_use]
    pub fn requested_date(&self) -> ComicDate {
        self.requested_date
    }

    /// Point the session at another comic date.
    ///
    /// Tags parsed after this call see the new date. The caller is
    /// responsible for the date actually having a comic.
    pub fn set_requested_date(&mut self, date: ComicDate) {
        self.requested_date = date;
    }

    /// Turn a path written in a template into the path to open.
    #[must_use]
    pub fn resolve_include(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        match &self.include_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Check whether a file is somewhere in the current include chain.
    #[must_use]
    pub fn is_open(&self, path: impl AsRef<Path>) -> bool {
        self.open_files.contains(&normalize_path(path.as_ref()))
    }

    /// Parse a block of text, line by line, keeping every line ending.
    pub fn parse_text(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            self.parse_line_into(line, &mut out);
        }
        out
    }

    /// Parse a file.
    ///
    /// A file that is already being parsed further up the include chain is
    /// not opened again; the include loop is reported in its place. The
    /// file leaves the chain when this call returns, however it went, so a
    /// later sibling include of the same file parses normally.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let key = normalize_path(path);

        if self.open_files.contains(&key) {
            let err = TagError::IncludeLoop {
                path: path.to_path_buf(),
            };
            tracing::warn!(file = %path.display(), "Include loop, not parsing file again");
            return err.inline();
        }

        tracing::debug!(file = %path.display(), depth = self.open_files.len(), "Parsing file");
        self.open_files.insert(key.clone());
        let result = self.parse_open_file(path);
        self.open_files.remove(&key);

        result.unwrap_or_else(|err| {
            tracing::warn!(file = %path.display(), error = %err, "Couldn't parse file");
            err.inline()
        })
    }

    fn parse_open_file(&mut self, path: &Path) -> Result<String, TagError> {
        let read_error = |source: std::io::Error| {
            if source.kind() == ErrorKind::InvalidData {
                TagError::NotText {
                    path: path.to_path_buf(),
                }
            } else {
                TagError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        };

        let file = File::open(path).map_err(read_error)?;
        let mut reader = BufReader::new(file);
        let mut out = String::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).map_err(read_error)? == 0 {
                break;
            }
            self.parse_line_into(&line, &mut out);
        }

        Ok(out)
    }

    /// Expand every marker on one line, appending the result to `out`.
    fn parse_line_into(&mut self, line: &str, out: &mut String) {
        let registry = self.registry;
        let mut cursor = 0;

        for caps in TAG_PATTERN.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&line[cursor..whole.start()]);

            let tag = TagMatch::from_captures(&caps);
            out.push_str(&registry.dispatch(&tag, self));

            cursor = whole.end();
        }

        out.push_str(&line[cursor..]);
    }
}

/// Make a path absolute and drop `.`/`..` components without touching the
/// filesystem, so the same file reached two ways gets one identity.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
