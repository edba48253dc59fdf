//! Comic-specific tags, registered next to the engine's built-ins.

mod comic;
mod nav;

use std::rc::Rc;

use autonifty_tags::{TagEntry, TagHandler};

use crate::bucket::ComicBucket;
use crate::config::Config;

pub use comic::ComicTag;
pub use nav::{NavDirection, NavTag};

/// Create the registration table for the comic tags.
///
/// Every handler shares the same bucket and configuration.
#[must_use]
pub fn comic_tags(bucket: Rc<ComicBucket>, config: Rc<Config>) -> Vec<TagEntry> {
    let mut entries = Vec::with_capacity(5);

    {
        let bucket = Rc::clone(&bucket);
        let config = Rc::clone(&config);
        entries.push(TagEntry::new("comic", move || {
            Ok(Box::new(ComicTag::new(Rc::clone(&bucket), Rc::clone(&config))) as Box<dyn TagHandler>)
        }));
    }

    for direction in [
        NavDirection::First,
        NavDirection::Previous,
        NavDirection::Next,
        NavDirection::Last,
    ] {
        let bucket = Rc::clone(&bucket);
        let config = Rc::clone(&config);
        entries.push(TagEntry::new(direction.tag_name(), move || {
            Ok(Box::new(NavTag::new(direction, Rc::clone(&bucket), Rc::clone(&config)))
                as Box<dyn TagHandler>)
        }));
    }

    entries
}
