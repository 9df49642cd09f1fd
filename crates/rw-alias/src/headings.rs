//! Heading extraction for anchor titles.
//!
//! Walks a page's Markdown with `pulldown-cmark` and records every heading in
//! document order together with the anchor id the renderer assigns to it.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A heading of a page, addressable by its anchor id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Anchor ID for linking.
    pub id: String,
    /// Heading text.
    pub title: String,
}

impl Heading {
    /// Create a heading.
    pub fn new(level: u8, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            level,
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Extract all headings from Markdown source.
///
/// Explicit `{#id}` attributes are honoured; other headings get a slug of
/// their text, with `-1`, `-2`, ... appended to repeated slugs.
#[must_use]
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut headings = Vec::new();
    let mut ids = HeadingIds::default();
    let mut current: Option<(u8, Option<String>, String)> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((
                    heading_level_to_num(level),
                    id.map(|id| id.into_string()),
                    String::new(),
                ));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit_id, text)) = current.take() {
                    let title = text.trim().to_owned();
                    let id = match explicit_id {
                        Some(id) => ids.claim(id),
                        None => ids.generate(&title),
                    };
                    headings.push(Heading { level, id, title });
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Title of the first level-1 heading, if any.
#[must_use]
pub fn first_h1(headings: &[Heading]) -> Option<&str> {
    headings
        .iter()
        .find(|h| h.level == 1 && !h.title.is_empty())
        .map(|h| h.title.as_str())
}

/// Counter for generating unique heading IDs.
#[derive(Default)]
struct HeadingIds {
    counts: HashMap<String, usize>,
}

impl HeadingIds {
    /// Generate a unique ID from heading text.
    fn generate(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    /// Record an explicit ID so later slugs do not collide with it.
    fn claim(&mut self, id: String) -> String {
        *self.counts.entry(id.clone()).or_default() += 1;
        id
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
