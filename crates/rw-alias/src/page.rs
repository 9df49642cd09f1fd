//! Page model shared by both build phases.

use serde_yaml::Value;

use crate::headings::{Heading, extract_headings, first_h1};

/// A documentation page as seen by the alias passes.
///
/// Pages are built by the host before the collection phase and shared
/// (behind `Arc`) by every alias entry that points at them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Source path relative to the docs root (e.g. `guide/setup.md`).
    pub src_path: String,
    /// Output URL used as link target (e.g. `guide/setup.md` or `guide/setup/`).
    pub url: String,
    /// Page title from metadata or the first H1.
    pub title: Option<String>,
    /// Icon declared in metadata (e.g. `material/home`).
    pub icon: Option<String>,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

impl Page {
    /// Create a page with no title, icon or headings.
    pub fn new(src_path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            src_path: src_path.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build a page from its front-matter and Markdown body.
    ///
    /// The title is the metadata `title` when set, otherwise the first H1 of
    /// the body. The icon comes from the metadata `icon` key.
    #[must_use]
    pub fn from_source(
        src_path: impl Into<String>,
        url: impl Into<String>,
        metadata: &Value,
        markdown: &str,
    ) -> Self {
        let headings = extract_headings(markdown);
        let title = metadata_str(metadata, "title")
            .or_else(|| first_h1(&headings))
            .map(str::to_owned);

        Self {
            src_path: src_path.into(),
            url: url.into(),
            title,
            icon: metadata_str(metadata, "icon").map(str::to_owned),
            headings,
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the page headings.
    #[must_use]
    pub fn with_headings(mut self, headings: Vec<Heading>) -> Self {
        self.headings = headings;
        self
    }

    /// Find a heading by anchor id.
    #[must_use]
    pub fn heading(&self, id: &str) -> Option<&Heading> {
        self.headings.iter().find(|h| h.id == id)
    }
}

fn metadata_str<'a>(metadata: &'a Value, key: &str) -> Option<&'a str> {
    metadata
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn test_title_from_h1() {
        let page = Page::from_source(
            "test.md",
            "test.md",
            &Value::Null,
            "# The actual title\n\nSome body text",
        );
        assert_eq!(page.title.as_deref(), Some("The actual title"));
    }

    #[test]
    fn test_title_from_metadata_wins() {
        let page = Page::from_source(
            "test.md",
            "test.md",
            &yaml("title: The actual title"),
            "# NOT The actual title\n\nSome body text",
        );
        assert_eq!(page.title.as_deref(), Some("The actual title"));
    }

    #[test]
    fn test_page_without_title() {
        let page = Page::from_source("test.md", "test.md", &Value::Null, "Some body text");
        assert!(page.title.is_none());
    }

    #[test]
    fn test_blank_metadata_title_falls_back_to_h1() {
        let page = Page::from_source("a.md", "a.md", &yaml("title: '  '"), "# Heading\n");
        assert_eq!(page.title.as_deref(), Some("Heading"));
    }

    #[test]
    fn test_icon_from_metadata() {
        let page = Page::from_source(
            "a.md",
            "a.md",
            &yaml("title: Home\nicon: material/home"),
            "",
        );
        assert_eq!(page.icon.as_deref(), Some("material/home"));
    }

    #[test]
    fn test_heading_lookup() {
        let page = Page::from_source(
            "a.md",
            "a.md",
            &Value::Null,
            "# Title\n\n## Section One\n",
        );
        assert_eq!(
            page.heading("section-one").map(|h| h.title.as_str()),
            Some("Section One")
        );
        assert!(page.heading("missing").is_none());
    }

    #[test]
    fn test_builder_methods() {
        let page = Page::new("a.md", "a/")
            .with_title("A")
            .with_icon("octicons/book")
            .with_headings(vec![Heading::new(2, "x", "X")]);
        assert_eq!(page.url, "a/");
        assert_eq!(page.title.as_deref(), Some("A"));
        assert_eq!(page.icon.as_deref(), Some("octicons/book"));
        assert_eq!(page.heading("x").map(|h| h.level), Some(2));
    }
}
