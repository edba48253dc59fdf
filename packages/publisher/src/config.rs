//! Site configuration: directories, URLs, update schedule and nav labels.
//!
//! The configuration is a YAML file. Every key is optional; anything left
//! out keeps the default listed on the field.
//!
//! ```yaml
//! url: https://example.com/comic/
//! base_dir: /srv/comic
//! update_time: "0600"
//! update_day: same
//! tz_offset: -500
//! nav:
//!   previous: "&lt; Back"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use autonifty_tags::ComicDate;
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::error::{PublishError, Result};

/// When a comic goes live relative to its own date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateDay {
    /// The comic dated D goes up at the update time on D.
    #[default]
    Same,
    /// The comic dated D goes up at the update time on the day before D.
    Previous,
}

/// Labels for the navigation tags.
///
/// A ghosted label is shown, unlinked, when there is nowhere to go (the
/// previous comic of the first day). Without one the regular label is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavLabels {
    pub first: String,
    pub previous: String,
    pub next: String,
    pub last: String,
    pub first_ghosted: Option<String>,
    pub previous_ghosted: Option<String>,
    pub next_ghosted: Option<String>,
    pub last_ghosted: Option<String>,
}

impl Default for NavLabels {
    fn default() -> Self {
        Self {
            first: "First".to_string(),
            previous: "Previous".to_string(),
            next: "Next".to_string(),
            last: "Last".to_string(),
            first_ghosted: None,
            previous_ghosted: None,
            next_ghosted: None,
            last_ghosted: None,
        }
    }
}

/// Site configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Public URL of the site root, with trailing slash (default: `about:blank`).
    pub url: String,
    /// Directory every other directory is relative to. A relative value is
    /// taken relative to the config file.
    pub base_dir: PathBuf,
    /// Update time as HHMM (default: `2300`).
    pub update_time: String,
    pub update_day: UpdateDay,
    /// Offset from UTC as signed HHMM (`-500` is UTC-5). Local time if unset.
    pub tz_offset: Option<i32>,
    /// Live comics (default: `comics/`).
    pub comics_dir: String,
    /// Staged comics waiting for their date (default: `comics/`).
    pub upload_dir: String,
    /// Generated site (default: `public_html/`).
    pub site_dir: String,
    /// Templates (default: `pages/`).
    pub parse_dir: String,
    pub image_dir: String,
    /// Daily pages, inside the site directory (default: `d/`).
    pub daily_dir: String,
    pub work_dir: String,
    pub data_dir: String,
    pub daily_ext: String,
    pub daily_template: String,
    pub index_file: String,
    pub nav: NavLabels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            base_dir: PathBuf::from("."),
            update_time: "2300".to_string(),
            update_day: UpdateDay::Same,
            tz_offset: None,
            comics_dir: "comics/".to_string(),
            upload_dir: "comics/".to_string(),
            site_dir: "public_html/".to_string(),
            parse_dir: "pages/".to_string(),
            image_dir: "images/".to_string(),
            daily_dir: "d/".to_string(),
            work_dir: "workspace/".to_string(),
            data_dir: "data/".to_string(),
            daily_ext: ".html".to_string(),
            daily_template: "dailytemplate.html".to_string(),
            index_file: "index.html".to_string(),
            nav: NavLabels::default(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    ///
    /// A relative `base_dir` is resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| PublishError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_yaml(&yaml)?;
        if config.base_dir.is_relative() {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            config.base_dir = parent.join(&config.base_dir);
        }

        tracing::debug!(file = %path.display(), base_dir = %config.base_dir.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an all-default map.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde can't check.
    ///
    /// # Errors
    /// * `tz_offset` outside -1200..=1200 or with 60 or more minutes
    /// * `update_time` not a valid HHMM time
    pub fn validate(&self) -> Result<()> {
        if let Some(offset) = self.tz_offset {
            if !(-1200..=1200).contains(&offset) || offset.abs() % 100 >= 60 {
                return Err(PublishError::Config(format!(
                    "{offset} isn't a valid timezone offset"
                )));
            }
        }

        self.update_time_of_day()?;
        Ok(())
    }

    /// The update time as a time of day.
    pub fn update_time_of_day(&self) -> Result<NaiveTime> {
        let invalid = || {
            PublishError::Config(format!(
                "update_time '{}' must be HHMM (e.g., 2300)",
                self.update_time
            ))
        };

        let hhmm = &self.update_time;
        if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours = hhmm[..2].parse().map_err(|_| invalid())?;
        let minutes = hhmm[2..].parse().map_err(|_| invalid())?;

        NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
    }

    /// Resolve a logical directory name to a path under `base_dir`.
    ///
    /// Accepts the classic names (`comicsdir`, `sitedir`, ...).
    pub fn directory_for(&self, name: &str) -> Result<PathBuf> {
        let dir = match name {
            "comicsdir" => &self.comics_dir,
            "uploaddir" => &self.upload_dir,
            "sitedir" => &self.site_dir,
            "parsedir" => &self.parse_dir,
            "imagedir" => &self.image_dir,
            "workdir" => &self.work_dir,
            "datadir" => &self.data_dir,
            "dailydir" => return Ok(self.base_dir.join(&self.site_dir).join(&self.daily_dir)),
            _ => return Err(PublishError::UnknownDirectory(name.to_string())),
        };
        Ok(self.base_dir.join(dir))
    }

    /// Public URL of the daily page for a date.
    #[must_use]
    pub fn daily_url(&self, date: ComicDate) -> String {
        format!("{}{}{}{}", self.url, self.daily_dir, date.datestamp(), self.daily_ext)
    }

    /// File name of the daily page for a date.
    #[must_use]
    pub fn daily_file_name(&self, date: ComicDate) -> String {
        format!("{}{}", date.datestamp(), self.daily_ext)
    }

    /// Public URL of a comic file.
    #[must_use]
    pub fn comic_url(&self, file_name: &str) -> String {
        format!("{}{}{}", self.url, self.comics_dir, file_name)
    }

    /// The comic day in effect right now.
    #[must_use]
    pub fn today(&self) -> ComicDate {
        self.today_at(Utc::now())
    }

    /// The comic day in effect at `now`.
    ///
    /// Shifts `now` into the configured zone, then moves a day back (update
    /// day `same`, before the update time) or forward (update day
    /// `previous`, at or after the update time).
    #[must_use]
    pub fn today_at(&self, now: DateTime<Utc>) -> ComicDate {
        let local: NaiveDateTime = match self.tz_offset {
            Some(offset) => now.naive_utc() + Duration::minutes(offset_minutes(offset)),
            None => now.with_timezone(&Local).naive_local(),
        };

        // validate() already rejected bad values; fall back to midnight so
        // an unvalidated config still yields a date.
        let update = self.update_time_of_day().unwrap_or_default();
        let date = local.date();

        let comic_day = match self.update_day {
            UpdateDay::Same if local.time() < update => date.pred_opt(),
            UpdateDay::Previous if local.time() >= update => date.succ_opt(),
            _ => Some(date),
        };

        ComicDate::from(comic_day.unwrap_or(date))
    }
}

/// Convert a signed HHMM offset to minutes.
fn offset_minutes(hhmm: i32) -> i64 {
    let minutes = i64::from(hhmm.abs() / 100 * 60 + hhmm.abs() % 100);
    if hhmm < 0 {
        -minutes
    } else {
        minutes
    }
}
