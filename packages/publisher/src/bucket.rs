//! The comic bucket: every live comic file, grouped by date.
//!
//! Comic files carry their date in their name as an 8-digit `YYYYMMDD`
//! datestamp (`20240115.png`, `strip-20240115-b.png`). Files without one,
//! or with a datestamp that isn't a real date, are ignored with a warning.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use autonifty_tags::ComicDate;
use regex::Regex;

use crate::error::{PublishError, Result};

/// First run of eight digits in a file name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATESTAMP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{8}").expect("valid regex"));

/// Why a file name didn't produce a comic date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Datestamp {
    Valid(ComicDate),
    Missing,
    Invalid,
}

fn datestamp_in(file_name: &str) -> Datestamp {
    match DATESTAMP_PATTERN.find(file_name) {
        None => Datestamp::Missing,
        Some(m) => ComicDate::parse_datestamp(m.as_str())
            .map(Datestamp::Valid)
            .unwrap_or(Datestamp::Invalid),
    }
}

/// Extract the comic date from a file name, if it has a valid one.
///
/// # Examples
/// ```
/// use autonifty::bucket::comic_date_of;
///
/// assert_eq!(comic_date_of("strip-20240115-b.png").unwrap().datestamp(), "20240115");
/// assert!(comic_date_of("logo.png").is_none());
/// assert!(comic_date_of("20241345.png").is_none());
/// ```
#[must_use]
pub fn comic_date_of(file_name: &str) -> Option<ComicDate> {
    match datestamp_in(file_name) {
        Datestamp::Valid(date) => Some(date),
        Datestamp::Missing | Datestamp::Invalid => None,
    }
}

/// Plain files in a directory, by name, with the datestamp check applied.
///
/// Logs and skips anything that isn't a usable comic file.
fn dated_files(dir: &Path, caller: &str) -> Result<Vec<(ComicDate, String)>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(caller, file = ?entry.file_name(), "Comic file name isn't UTF-8, ignoring");
            continue;
        };

        match datestamp_in(&name) {
            Datestamp::Valid(date) => files.push((date, name)),
            Datestamp::Missing => {
                tracing::warn!(caller, file = %name, "Comic file has no datestamp in its name, ignoring");
            }
            Datestamp::Invalid => {
                tracing::warn!(caller, file = %name, "Comic file contains an invalid date, ignoring");
            }
        }
    }

    Ok(files)
}

/// Move staged comics that are due into the comics directory.
///
/// A file is due when its datestamp is on or before `today`. Nothing
/// happens when both directories are the same.
///
/// # Returns
/// The number of files moved, which says nothing about how many new comic
/// days there are.
pub fn filter_bucket(upload_dir: &Path, comics_dir: &Path, today: ComicDate) -> Result<usize> {
    if same_dir(upload_dir, comics_dir) {
        tracing::debug!(dir = %comics_dir.display(), "Upload and comics directories are the same, nothing to move");
        return Ok(0);
    }

    fs::create_dir_all(comics_dir)?;

    let mut moved = 0;
    for (date, name) in dated_files(upload_dir, "filter_bucket")? {
        if date > today {
            continue;
        }

        let from = upload_dir.join(&name);
        let to = comics_dir.join(&name);
        fs::rename(&from, &to).map_err(|source| PublishError::Move {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        tracing::info!(file = %name, "Moved comic into the live directory");
        moved += 1;
    }

    Ok(moved)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Every live comic, keyed by date.
///
/// Each date's files are in alphabetical order, which is the order they
/// appear on the site.
#[derive(Debug, Clone, Default)]
pub struct ComicBucket {
    comics: BTreeMap<ComicDate, Vec<String>>,
}

impl ComicBucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the comics directory as it is right now.
    ///
    /// Run [`filter_bucket`] first so that newly due comics are included.
    pub fn read(comics_dir: &Path) -> Result<Self> {
        let mut bucket = Self::new();
        for (date, name) in dated_files(comics_dir, "read_bucket")? {
            bucket.insert(date, name);
        }
        for files in bucket.comics.values_mut() {
            files.sort();
        }

        tracing::debug!(dir = %comics_dir.display(), dates = bucket.len(), "Read comic bucket");
        Ok(bucket)
    }

    /// Add a file under a date.
    pub fn insert(&mut self, date: ComicDate, file_name: impl Into<String>) {
        self.comics.entry(date).or_default().push(file_name.into());
    }

    /// Drop every date after `today`.
    #[must_use]
    pub fn until(mut self, today: ComicDate) -> Self {
        self.comics.retain(|date, _| *date <= today);
        self
    }

    /// Number of comic dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comics.is_empty()
    }

    /// All comic dates, oldest first.
    #[must_use]
    pub fn dates(&self) -> Vec<ComicDate> {
        self.comics.keys().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, date: ComicDate) -> bool {
        self.comics.contains_key(&date)
    }

    /// Files for a date, or `None` if there is no comic that day.
    #[must_use]
    pub fn comics_for(&self, date: ComicDate) -> Option<&[String]> {
        self.comics.get(&date).map(Vec::as_slice)
    }

    #[must_use]
    pub fn first(&self) -> Option<(ComicDate, &[String])> {
        self.comics
            .first_key_value()
            .map(|(date, files)| (*date, files.as_slice()))
    }

    #[must_use]
    pub fn last(&self) -> Option<(ComicDate, &[String])> {
        self.comics
            .last_key_value()
            .map(|(date, files)| (*date, files.as_slice()))
    }

    /// The comic date after `date`.
    ///
    /// `None` when `date` is the last one or isn't in the bucket at all.
    #[must_use]
    pub fn next(&self, date: ComicDate) -> Option<(ComicDate, &[String])> {
        if !self.contains(date) {
            return None;
        }
        self.comics
            .range(date..)
            .nth(1)
            .map(|(date, files)| (*date, files.as_slice()))
    }

    /// The comic date before `date`.
    ///
    /// `None` when `date` is the first one or isn't in the bucket at all.
    #[must_use]
    pub fn prev(&self, date: ComicDate) -> Option<(ComicDate, &[String])> {
        if !self.contains(date) {
            return None;
        }
        self.comics
            .range(..date)
            .next_back()
            .map(|(date, files)| (*date, files.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn date(stamp: &str) -> ComicDate {
        ComicDate::parse_datestamp(stamp).unwrap()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_read_groups_and_sorts() {
        let dir = tempdir().unwrap();
        for name in [
            "20240103b.png",
            "20240101.png",
            "20240103a.png",
            "notes.txt",
            "20241399.png",
        ] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("20240105")).unwrap();

        let bucket = ComicBucket::read(dir.path()).unwrap();

        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.dates(), vec![date("20240101"), date("20240103")]);
        assert_eq!(
            bucket.comics_for(date("20240103")).unwrap(),
            ["20240103a.png", "20240103b.png"]
        );
        assert!(bucket.comics_for(date("20240102")).is_none());
    }

    #[test]
    fn test_navigation() {
        let mut bucket = ComicBucket::new();
        bucket.insert(date("20240110"), "c.png");
        bucket.insert(date("20240101"), "a.png");
        bucket.insert(date("20240105"), "b.png");

        assert_eq!(bucket.first().unwrap().0, date("20240101"));
        assert_eq!(bucket.last().unwrap().0, date("20240110"));

        assert_eq!(bucket.next(date("20240101")).unwrap().0, date("20240105"));
        assert_eq!(bucket.next(date("20240105")).unwrap().1, ["c.png"]);
        assert!(bucket.next(date("20240110")).is_none());

        assert_eq!(bucket.prev(date("20240110")).unwrap().0, date("20240105"));
        assert!(bucket.prev(date("20240101")).is_none());

        assert!(bucket.next(date("20240102")).is_none());
        assert!(bucket.prev(date("20240102")).is_none());
    }

    #[test]
    fn test_until_drops_future_dates() {
        let mut bucket = ComicBucket::new();
        bucket.insert(date("20240101"), "a.png");
        bucket.insert(date("20240201"), "b.png");

        let bucket = bucket.until(date("20240115"));
        assert_eq!(bucket.dates(), vec![date("20240101")]);
    }

    #[test]
    fn test_filter_bucket_moves_due_files() {
        let upload = tempdir().unwrap();
        let site = tempdir().unwrap();
        let comics = site.path().join("comics");

        for name in ["20240114.png", "20240115.png", "20240116.png", "readme.txt"] {
            touch(upload.path(), name);
        }

        let moved = filter_bucket(upload.path(), &comics, date("20240115")).unwrap();
        assert_eq!(moved, 2);

        assert!(comics.join("20240114.png").exists());
        assert!(comics.join("20240115.png").exists());
        assert!(upload.path().join("20240116.png").exists());
        assert!(upload.path().join("readme.txt").exists());
    }

    #[test]
    fn test_filter_bucket_same_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "20240101.png");

        assert_eq!(filter_bucket(dir.path(), dir.path(), date("20240115")).unwrap(), 0);
        assert!(dir.path().join("20240101.png").exists());
    }

    #[test]
    fn test_comic_date_of() {
        assert_eq!(comic_date_of("x20240229y.png"), Some(date("20240229")));
        assert_eq!(comic_date_of("20230229.png"), None);
        assert_eq!(comic_date_of("2024.png"), None);
    }
}
