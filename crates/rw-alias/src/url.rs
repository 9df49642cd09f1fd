//! Relative URL computation for rewritten links.

/// Compute a relative URL from one page URL to another (RFC 3986).
///
/// Both `from` and `to` are URL paths; leading slashes are ignored. The last
/// segment of `from` is the current document and the base directory is
/// everything before it. A trailing slash on `from` makes the whole path a
/// directory, and a trailing slash on `to` is kept on the result.
///
/// # Examples
///
/// ```
/// use rw_alias::relative_path;
///
/// assert_eq!(relative_path("a/b.md", "a/c.md"), "c.md");
/// assert_eq!(relative_path("guide/setup.md", "index.md"), "../index.md");
/// assert_eq!(relative_path("guide/", "guide/faq/"), "faq/");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // Drop the document segment of `from` unless it is already a directory.
    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    let mut result = "../".repeat(ups);
    result.push_str(&remaining.join("/"));

    if result.is_empty() {
        return "./".to_owned();
    }
    if to.ends_with('/') && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Append a `#fragment` to a URL when an anchor is present.
pub(crate) fn with_fragment(url: String, anchor: Option<&str>) -> String {
    match anchor {
        Some(anchor) => format!("{url}#{anchor}"),
        None => url,
    }
}

/// Format a link destination for Markdown output.
///
/// Destinations containing whitespace or parentheses are wrapped in angle
/// brackets so the link still parses as `CommonMark`.
pub(crate) fn link_destination(href: &str) -> String {
    if href.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{href}>")
    } else {
        href.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_deep_to_root() {
        assert_eq!(
            relative_path("folder1/folder4/folder5/test.md", "my-alias.md"),
            "../../../my-alias.md"
        );
    }

    #[test]
    fn test_relative_path_root_to_nested() {
        assert_eq!(relative_path("index.md", "guide/setup.md"), "guide/setup.md");
    }

    #[test]
    fn test_relative_path_siblings() {
        assert_eq!(relative_path("guide/a.md", "guide/b.md"), "b.md");
    }

    #[test]
    fn test_relative_path_cousins() {
        assert_eq!(
            relative_path("guide/install/linux.md", "reference/cli.md"),
            "../../reference/cli.md"
        );
    }

    #[test]
    fn test_relative_path_same_page() {
        assert_eq!(relative_path("guide.md", "guide.md"), "guide.md");
    }

    #[test]
    fn test_relative_path_leading_slash_ignored() {
        assert_eq!(relative_path("/guide/a.md", "/guide/b.md"), "b.md");
    }

    #[test]
    fn test_relative_path_both_empty() {
        assert_eq!(relative_path("", ""), "./");
    }

    #[test]
    fn test_relative_path_directory_urls() {
        assert_eq!(relative_path("guide/setup/", "guide/faq/"), "../faq/");
        assert_eq!(relative_path("guide/", "guide/"), "./");
        assert_eq!(relative_path("", "guide/"), "guide/");
    }

    #[test]
    fn test_relative_path_nested_to_root_directory() {
        assert_eq!(relative_path("domains/billing/", ""), "../../");
    }

    #[test]
    fn test_with_fragment() {
        assert_eq!(with_fragment("a.md".to_owned(), Some("intro")), "a.md#intro");
        assert_eq!(with_fragment("a.md".to_owned(), None), "a.md");
    }

    #[test]
    fn test_link_destination_plain() {
        assert_eq!(link_destination("../a.md#intro"), "../a.md#intro");
    }

    #[test]
    fn test_link_destination_with_space() {
        assert_eq!(link_destination("a.md#my anchor"), "<a.md#my anchor>");
    }
}
