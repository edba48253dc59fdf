//! Registration table for the engine's built-in tags.

use super::handler::TagHandler;
use super::handlers::{DateTag, IncludeTag};
use super::registry::TagEntry;

/// Create the registration table of tags every site gets.
///
/// - `include <file>`: parse another template in place
/// - `date [format]`: the requested comic date
/// - `today [format]`: the day the session was started for
#[must_use]
pub fn builtin_tags() -> Vec<TagEntry> {
    vec![
        TagEntry::new("include", || Ok(Box::new(IncludeTag) as Box<dyn TagHandler>)),
        TagEntry::new("date", || {
            Ok(Box::new(DateTag::requested()) as Box<dyn TagHandler>)
        }),
        TagEntry::new("today", || Ok(Box::new(DateTag::today()) as Box<dyn TagHandler>)),
    ]
}
