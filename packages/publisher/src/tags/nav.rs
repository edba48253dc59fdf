//! Navigation tags: `nav_first`, `nav_prev`, `nav_next` and `nav_last`.

use std::cell::RefCell;
use std::rc::Rc;

use autonifty_tags::{ComicDate, TagHandler, TagMatch, TemplateParser};

use crate::bucket::ComicBucket;
use crate::config::Config;

/// Which way a navigation tag points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    First,
    Previous,
    Next,
    Last,
}

impl NavDirection {
    /// Tag name the direction is registered under.
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::First => "nav_first",
            Self::Previous => "nav_prev",
            Self::Next => "nav_next",
            Self::Last => "nav_last",
        }
    }
}

/// Handler for the navigation tags.
///
/// Renders `<a href="daily page">label</a>` for the target comic. The label
/// is the tag's params, or the configured label for the direction. With no
/// target, or when the target is the page being rendered, the ghosted label
/// is emitted without a link.
///
/// The target is worked out once per requested date and kept until the
/// next comic day.
pub struct NavTag {
    direction: NavDirection,
    bucket: Rc<ComicBucket>,
    config: Rc<Config>,
    target: RefCell<Option<(ComicDate, Option<ComicDate>)>>,
}

impl NavTag {
    #[must_use]
    pub fn new(direction: NavDirection, bucket: Rc<ComicBucket>, config: Rc<Config>) -> Self {
        Self {
            direction,
            bucket,
            config,
            target: RefCell::new(None),
        }
    }

    fn target_for(&self, requested: ComicDate) -> Option<ComicDate> {
        if let Some((cached_for, target)) = *self.target.borrow() {
            if cached_for == requested {
                return target;
            }
        }

        let target = match self.direction {
            NavDirection::First => self.bucket.first(),
            NavDirection::Previous => self.bucket.prev(requested),
            NavDirection::Next => self.bucket.next(requested),
            NavDirection::Last => self.bucket.last(),
        }
        .map(|(date, _)| date)
        .filter(|date| *date != requested);

        *self.target.borrow_mut() = Some((requested, target));
        target
    }

    fn labels(&self) -> (&str, &str) {
        let nav = &self.config.nav;
        let (label, ghosted) = match self.direction {
            NavDirection::First => (&nav.first, &nav.first_ghosted),
            NavDirection::Previous => (&nav.previous, &nav.previous_ghosted),
            NavDirection::Next => (&nav.next, &nav.next_ghosted),
            NavDirection::Last => (&nav.last, &nav.last_ghosted),
        };
        (label.as_str(), ghosted.as_deref().unwrap_or(label))
    }
}

impl TagHandler for NavTag {
    fn handle(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String {
        let (label, ghosted) = self.labels();

        match self.target_for(parser.requested_date()) {
            Some(date) => format!(
                "<a href=\"{}\">{}</a>",
                self.config.daily_url(date),
                tag.params.unwrap_or(label)
            ),
            None => tag.params.unwrap_or(ghosted).to_string(),
        }
    }

    fn reset_for_day(&self) {
        self.target.borrow_mut().take();
    }
}
