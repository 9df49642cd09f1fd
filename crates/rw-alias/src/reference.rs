//! Parsing of `[[...]]` reference bodies.

/// A parsed `[[name#anchor|title]]` occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Alias name; empty for a self-page anchor.
    pub name: &'a str,
    /// Anchor fragment (first `#` segment only).
    pub anchor: Option<&'a str>,
    /// Explicit display text after `|`.
    pub title: Option<&'a str>,
    /// Whether the reference is the target of a reference-link or footnote definition.
    pub footnote: bool,
}

impl<'a> Reference<'a> {
    /// Parse the text between `[[` and `]]`.
    ///
    /// The body is split on the first unescaped `|` into target and title,
    /// then the target is split on `#` into name and anchor. Text after a
    /// second `#` is ignored.
    #[must_use]
    pub fn parse(body: &'a str) -> Self {
        let (target, title) = split_title(body);
        let (name, anchor) = match target.split_once('#') {
            Some((name, fragment)) => {
                let anchor = fragment.split('#').next().filter(|a| !a.is_empty());
                (name, anchor)
            }
            None => (target, None),
        };

        Self {
            name,
            anchor,
            title: title.filter(|t| !t.is_empty()),
            footnote: false,
        }
    }

    /// Mark the reference as coming from a reference-link definition.
    #[must_use]
    pub fn in_definition(mut self) -> Self {
        self.footnote = true;
        self
    }

    /// Whether this reference targets an anchor on the current page.
    #[must_use]
    pub fn is_self_anchor(&self) -> bool {
        self.name.is_empty() && self.anchor.is_some()
    }
}

/// Split on the first `|` not preceded by a backslash.
fn split_title(body: &str) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '|' if !escaped => return (&body[..i], Some(&body[i + 1..])),
            _ => escaped = false,
        }
    }
    (body, None)
}
