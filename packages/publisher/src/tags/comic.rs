//! The `comic` tag: image markup for the requested day's strips.

use std::cell::Cell;
use std::rc::Rc;

use autonifty_tags::{TagHandler, TagMatch, TemplateParser};

use crate::bucket::ComicBucket;
use crate::config::Config;

/// Handler for `***comic [css-class]***`.
///
/// Each marker on a page emits the next file of the requested date, so a
/// day with two strips is laid out with two markers. Once every file has
/// been used the marker renders as nothing.
pub struct ComicTag {
    bucket: Rc<ComicBucket>,
    config: Rc<Config>,
    cursor: Cell<usize>,
}

impl ComicTag {
    #[must_use]
    pub fn new(bucket: Rc<ComicBucket>, config: Rc<Config>) -> Self {
        Self {
            bucket,
            config,
            cursor: Cell::new(0),
        }
    }
}

impl TagHandler for ComicTag {
    fn handle(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String {
        let date = parser.requested_date();
        let Some(files) = self.bucket.comics_for(date) else {
            return format!("ERROR: There is no comic for {date}!");
        };

        let index = self.cursor.get();
        let Some(file) = files.get(index) else {
            return String::new();
        };
        self.cursor.set(index + 1);

        let class = tag
            .params
            .map(|class| format!(" class=\"{class}\""))
            .unwrap_or_default();
        format!(
            "<img src=\"{}\" alt=\"Comic for {}\"{class}>",
            self.config.comic_url(file),
            date.as_naive().format("%B %-d, %Y")
        )
    }

    fn reset_for_day(&self) {
        self.cursor.set(0);
    }

    fn reset_for_page(&self) {
        self.cursor.set(0);
    }
}

#[cfg(test)]
mod tests {
    use autonifty_tags::{ComicDate, TagRegistry};
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(stamp: &str) -> ComicDate {
        ComicDate::parse_datestamp(stamp).unwrap()
    }

    fn registry() -> TagRegistry {
        let mut bucket = ComicBucket::new();
        bucket.insert(date("20240115"), "20240115a.png");
        bucket.insert(date("20240115"), "20240115b.png");
        let config = Config {
            url: "/".to_string(),
            ..Config::default()
        };

        let mut registry = TagRegistry::new();
        registry.register("comic", ComicTag::new(Rc::new(bucket), Rc::new(config)));
        registry
    }

    #[test]
    fn test_comic_emits_each_file_once_per_page() {
        let registry = registry();
        let mut parser = TemplateParser::new(&registry, date("20240115"));

        assert_eq!(
            parser.parse_text("***comic***\n***comic strip***\n***comic***\n"),
            "<img src=\"/comics/20240115a.png\" alt=\"Comic for January 15, 2024\">\n\
             <img src=\"/comics/20240115b.png\" alt=\"Comic for January 15, 2024\" class=\"strip\">\n\
             \n"
        );

        registry.reset_for_page();
        let mut parser = TemplateParser::new(&registry, date("20240115"));
        assert!(parser.parse_text("***comic***").contains("20240115a.png"));
    }

    #[test]
    fn test_comic_for_missing_day() {
        let registry = registry();
        let mut parser = TemplateParser::new(&registry, date("20240116"));

        assert_eq!(
            parser.parse_text("***comic***"),
            "ERROR: There is no comic for 20240116!"
        );
    }
}
