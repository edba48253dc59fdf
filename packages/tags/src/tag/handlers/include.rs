//! The `include` tag: splice another parsed template into this one.

use crate::error::TagError;
use crate::tag::handler::{TagHandler, TagMatch};
use crate::tag::parser::TemplateParser;

/// Handler for `***include <file>***`.
///
/// The file is resolved against the parser's include root and parsed in the
/// same session, so its own tags see the same dates and include chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncludeTag;

impl TagHandler for IncludeTag {
    fn handle(&self, tag: &TagMatch<'_>, parser: &mut TemplateParser<'_>) -> String {
        let Some(file) = tag.params else {
            return TagError::MissingParameter {
                tag: tag.name.unwrap_or("include").to_string(),
                what: "a file name",
            }
            .inline();
        };

        let path = parser.resolve_include(file);
        parser.parse_file(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::tag::TagRegistry;
    use crate::ComicDate;

    fn today() -> ComicDate {
        ComicDate::from_ymd(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_include_without_file_name() {
        let registry = TagRegistry::new();
        let mut parser = TemplateParser::new(&registry, today());

        let tag = TagMatch::new("***include***", "include", None);
        assert_eq!(
            IncludeTag.handle(&tag, &mut parser),
            "ERROR: The include tag needs a file name"
        );
    }

    #[test]
    fn test_include_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("header.html"), "<h1>Header</h1>\n").unwrap();

        let registry = TagRegistry::new();
        let mut parser = TemplateParser::new(&registry, today()).with_include_root(dir.path());

        let tag = TagMatch::new("***include header.html***", "include", Some("header.html"));
        assert_eq!(IncludeTag.handle(&tag, &mut parser), "<h1>Header</h1>\n");
    }
}
