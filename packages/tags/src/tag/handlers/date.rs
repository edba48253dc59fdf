//! The `date` and `today` tags: print a session date with a strftime format.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};

use crate::date::ComicDate;
use crate::error::{Result, TagError};
use crate::tag::handler::{TagHandler, TagMatch};
use crate::tag::parser::TemplateParser;

/// Format used when the tag has no params.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the session's dates a [`DateTag`] prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// The comic being rendered (`***date***`).
    Requested,
    /// The day the session thinks it is (`***today***`).
    Today,
}

/// Handler for `***date [format]***` and `***today [format]***`.
#[derive(Debug, Clone, Copy)]
pub struct DateTag {
    source: DateSource,
}

impl DateTag {
    #[must_use]
    pub fn requested() -> Self {
        Self {
            source: DateSource::Requested,
        }
    }

    #[must_use]
    pub fn today() -> Self {
        Self {
            source: DateSource::Today,
        }
    }
}

impl TagHandler for DateTag {
    fn handle(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String {
        let date = match self.source {
            DateSource::Requested => parser.requested_date(),
            DateSource::Today => parser.today(),
        };
        let format = tag.params.unwrap_or(DEFAULT_DATE_FORMAT);

        format_date(date, format).unwrap_or_else(|err| err.inline())
    }
}

/// Format a date with a strftime-style format string.
///
/// Fails instead of panicking on unknown specifiers and on specifiers a
/// plain date can't fill (hours, time zones).
pub fn format_date(date: ComicDate, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(TagError::InvalidFormat(format.to_string()));
    }

    let mut out = String::new();
    write!(out, "{}", date.as_naive().format_with_items(items.into_iter()))
        .map_err(|_| TagError::InvalidFormat(format.to_string()))?;
    Ok(out)
}
