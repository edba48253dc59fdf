//! The publishing run: promote due comics, then render every page.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use autonifty_tags::{ComicDate, TagRegistry, TemplateParser, UnknownTagPolicy};

use crate::bucket::{filter_bucket, ComicBucket};
use crate::config::Config;
use crate::error::{PublishError, Result};
use crate::tags::comic_tags;

/// What a publishing run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Staged comic files moved into the comics directory.
    pub files_moved: usize,
    /// Daily pages written.
    pub pages_written: usize,
    /// Whether the front page was written.
    pub index_written: bool,
    /// The newest comic date, shown on the front page.
    pub latest: Option<ComicDate>,
}

/// Build the registry every page of a site is rendered with.
#[must_use]
pub fn build_registry(
    config: &Config,
    bucket: Rc<ComicBucket>,
    policy: UnknownTagPolicy,
) -> TagRegistry {
    let mut registry = TagRegistry::with_builtins().with_policy(policy);
    registry.register_all(comic_tags(bucket, Rc::new(config.clone())));
    registry
}

/// Publish the site as of `today`.
pub fn publish(config: &Config, today: ComicDate) -> Result<PublishReport> {
    publish_with_progress(config, today, |_, _, _| {})
}

/// Publish the site as of `today`, reporting each daily page as it's done.
///
/// `progress` receives the page's date, its position and the page count.
///
/// # Steps
/// 1. Move due comics from the upload directory into the comics directory
/// 2. Read the comics directory, ignoring anything dated after `today`
/// 3. Render the daily template once per comic date
/// 4. Render the front page for the newest date, if there's a template
pub fn publish_with_progress(
    config: &Config,
    today: ComicDate,
    mut progress: impl FnMut(ComicDate, usize, usize),
) -> Result<PublishReport> {
    let upload_dir = config.directory_for("uploaddir")?;
    let comics_dir = config.directory_for("comicsdir")?;
    let parse_dir = config.directory_for("parsedir")?;
    let site_dir = config.directory_for("sitedir")?;
    let daily_dir = config.directory_for("dailydir")?;

    let daily_template = parse_dir.join(&config.daily_template);
    if !daily_template.is_file() {
        return Err(PublishError::TemplateMissing(daily_template));
    }

    let files_moved = filter_bucket(&upload_dir, &comics_dir, today)?;
    let bucket = Rc::new(ComicBucket::read(&comics_dir)?.until(today));
    if bucket.is_empty() {
        return Err(PublishError::EmptyBucket(comics_dir));
    }

    tracing::info!(today = %today, dates = bucket.len(), files_moved, "Publishing comic");

    let registry = build_registry(config, Rc::clone(&bucket), UnknownTagPolicy::Echo);
    fs::create_dir_all(&daily_dir)?;

    let dates = bucket.dates();
    let total = dates.len();
    let mut report = PublishReport {
        files_moved,
        ..PublishReport::default()
    };

    for (index, date) in dates.into_iter().enumerate() {
        registry.reset_for_day();
        let page = render_page(&registry, &parse_dir, &daily_template, today, date);

        let target = daily_dir.join(config.daily_file_name(date));
        fs::write(&target, page)?;
        tracing::debug!(date = %date, file = %target.display(), "Wrote daily page");

        report.pages_written += 1;
        report.latest = Some(date);
        progress(date, index + 1, total);
    }

    let index_template = parse_dir.join(&config.index_file);
    if let Some(latest) = report.latest {
        if index_template.is_file() {
            // Same comic day as the last daily page; only page state goes.
            registry.reset_for_page();
            let page = render_page(&registry, &parse_dir, &index_template, today, latest);
            fs::write(site_dir.join(&config.index_file), page)?;
            report.index_written = true;
        } else {
            tracing::warn!(file = %index_template.display(), "No front page template, skipping");
        }
    }

    Ok(report)
}

/// Render one template for one comic date in a fresh session.
fn render_page(
    registry: &TagRegistry,
    parse_dir: &Path,
    template: &Path,
    today: ComicDate,
    date: ComicDate,
) -> String {
    let mut parser = TemplateParser::new(registry, today).with_include_root(parse_dir);
    parser.set_requested_date(date);
    parser.parse_file(template)
}

/// Render a single template without writing anything.
///
/// Relative template paths are looked up in the templates directory. The
/// page is rendered for `date`, or for the newest comic when `date` is
/// `None`. Staged comics are not moved.
pub fn render_file(
    config: &Config,
    template: &Path,
    date: Option<ComicDate>,
    today: ComicDate,
    policy: UnknownTagPolicy,
) -> Result<String> {
    let parse_dir = config.directory_for("parsedir")?;
    let template: PathBuf = if template.is_relative() && !template.is_file() {
        parse_dir.join(template)
    } else {
        template.to_path_buf()
    };
    if !template.is_file() {
        return Err(PublishError::TemplateMissing(template));
    }

    let comics_dir = config.directory_for("comicsdir")?;
    let bucket = if comics_dir.is_dir() {
        ComicBucket::read(&comics_dir)?.until(today)
    } else {
        tracing::warn!(dir = %comics_dir.display(), "Comics directory doesn't exist");
        ComicBucket::new()
    };

    let date = date
        .or_else(|| bucket.last().map(|(date, _)| date))
        .unwrap_or(today);

    let registry = build_registry(config, Rc::new(bucket), policy);
    Ok(render_page(&registry, &parse_dir, &template, today, date))
}
