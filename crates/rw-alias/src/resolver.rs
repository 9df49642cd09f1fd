//! Rewriting of alias references in page content.
//!
//! The resolver scans a page once, left to right, and substitutes every
//! recognized occurrence:
//!
//! - `[[name]]`, `[[name|Title]]`, `[[name#anchor]]`, `[[name#anchor|Title]]`
//!   become Markdown links to the aliased page.
//! - `[[#anchor]]` links to a heading on the current page.
//! - `\[[...]]` is emitted as `[[...]]` without being looked up.
//! - `[label]: [[name]]` at the start of a line becomes a reference-link
//!   definition, and `[^note]: [[name]]` a footnote whose body is a link.
//!
//! Substituted text is never scanned again. References to unknown aliases
//! are left exactly as written and reported as warnings.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::AliasConfig;
use crate::page::Page;
use crate::reference::Reference;
use crate::registry::{AliasEntry, AliasLookup};
use crate::url::{link_destination, relative_path, with_fragment};
use crate::warning::AliasWarning;

/// Matches an optional reference definition prefix, an optional escape and a
/// `[[body]]` reference.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?P<def>^ {0,3}\[(?P<label>[^\]\n]+)\]:[ \t]*)?(?P<escape>\\)?\[\[(?P<body>[^\]\n]+)\]\]",
    )
    .unwrap()
});

/// A resolved link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Display text.
    pub text: String,
    /// Target URL, relative to the referencing page.
    pub href: String,
}

impl Link {
    /// Render as the target of a reference-link definition (`url "title"`).
    fn definition_target(&self, title: Option<&str>) -> String {
        let destination = link_destination(&self.href);
        match title {
            Some(title) => format!("{destination} \"{}\"", title.replace('"', "\\\"")),
            None => destination,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.text, link_destination(&self.href))
    }
}

/// Result of rewriting one page.
#[derive(Debug, Default)]
pub struct Rewrite {
    /// Page content with references substituted.
    pub content: String,
    /// Warnings raised while rewriting.
    pub warnings: Vec<AliasWarning>,
    /// Number of references replaced with links.
    pub resolved: usize,
    /// Number of references left as written.
    pub unresolved: usize,
}

/// Resolves `[[...]]` references against an alias lookup.
pub struct Resolver<'a, L: ?Sized> {
    lookup: &'a L,
    config: &'a AliasConfig,
}

impl<'a, L: AliasLookup + ?Sized> Resolver<'a, L> {
    /// Create a resolver over a frozen lookup.
    pub fn new(lookup: &'a L, config: &'a AliasConfig) -> Self {
        Self { lookup, config }
    }

    /// Rewrite every reference in `content`, which belongs to `page`.
    #[must_use]
    pub fn rewrite(&self, page: &Page, content: &str) -> Rewrite {
        if !content.contains("[[") {
            return Rewrite {
                content: content.to_owned(),
                ..Rewrite::default()
            };
        }

        let mut stats = Rewrite::default();
        let content = REFERENCE_RE
            .replace_all(content, |caps: &Captures<'_>| {
                self.substitute(page, caps, &mut stats)
            })
            .into_owned();

        Rewrite { content, ..stats }
    }

    /// Resolve a single reference made from `page`.
    ///
    /// Returns `None` when the alias is not registered.
    #[must_use]
    pub fn resolve(&self, page: &Page, reference: &Reference<'_>) -> Option<Link> {
        if reference.is_self_anchor() {
            return Some(self.self_anchor_link(page, reference));
        }

        let entry = self.lookup.lookup(reference.name)?;
        let target = entry.page.as_ref();

        let text = reference
            .title
            .map(str::to_owned)
            .or_else(|| self.anchor_title(target, reference.anchor))
            .unwrap_or_else(|| self.entry_text(entry));
        let href = with_fragment(relative_path(&page.url, &target.url), reference.anchor);

        Some(Link { text, href })
    }

    fn substitute(&self, page: &Page, caps: &Captures<'_>, stats: &mut Rewrite) -> String {
        let definition = caps.name("def").map_or("", |m| m.as_str());
        let body = &caps["body"];

        if caps.name("escape").is_some() {
            return format!("{definition}[[{body}]]");
        }

        let label = caps.name("label").map(|m| m.as_str());
        let mut reference = Reference::parse(body);
        if label.is_some() {
            reference = reference.in_definition();
        }

        let Some(link) = self.resolve(page, &reference) else {
            let name = if reference.name.is_empty() {
                body
            } else {
                reference.name
            };
            AliasWarning::AliasNotFound {
                name: name.to_owned(),
                page: page.src_path.clone(),
            }
            .report(&mut stats.warnings);
            stats.unresolved += 1;
            return caps[0].to_owned();
        };

        stats.resolved += 1;
        tracing::info!(
            page = %page.src_path,
            "replaced alias '{}' with '{}' to '{}'",
            reference.name,
            link.text,
            link.href
        );

        if !reference.footnote {
            return link.to_string();
        }
        match label {
            Some(label) if label.starts_with('^') => format!("{definition}{link}"),
            _ => format!("{definition}{}", link.definition_target(reference.title)),
        }
    }

    /// Link to a heading on the referencing page itself.
    ///
    /// The heading text is used whether or not anchor titles are enabled,
    /// since there is no alias text to fall back on.
    fn self_anchor_link(&self, page: &Page, reference: &Reference<'_>) -> Link {
        let anchor = reference.anchor.unwrap_or_default();
        let text = reference
            .title
            .map(str::to_owned)
            .or_else(|| page.heading(anchor).map(|h| h.title.clone()))
            .or_else(|| page.title.clone())
            .unwrap_or_else(|| anchor.to_owned());

        Link {
            text,
            href: format!("#{anchor}"),
        }
    }

    fn anchor_title(&self, target: &Page, anchor: Option<&str>) -> Option<String> {
        if !self.config.use_anchor_titles {
            return None;
        }
        target
            .heading(anchor?)
            .map(|h| h.title.clone())
            .filter(|t| !t.is_empty())
    }

    /// Entry text, prefixed with the page icon when it is the page title.
    fn entry_text(&self, entry: &AliasEntry) -> String {
        let text = entry.display_text();
        match entry.icon.as_deref() {
            Some(icon) if self.config.use_page_icon => format!("{} {text}", icon_shortcode(icon)),
            _ => text.to_owned(),
        }
    }
}

/// Emoji shortcode for a page icon: `material/home` becomes `:material-home:`.
#[must_use]
pub fn icon_shortcode(icon: &str) -> String {
    format!(":{}:", icon.replace('/', "-"))
}
