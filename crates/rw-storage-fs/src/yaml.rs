//! YAML front-matter handling.
//!
//! A document may start with a metadata block:
//!
//! ```text
//! ---
//! title: Setup
//! alias: setup
//! ---
//! # Setup
//! ```
//!
//! The closing delimiter may also be `...`.

use serde_yaml::Value;

/// A document split into its front-matter header and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Split<'a> {
    /// Header text including both delimiter lines (empty when absent).
    pub header: &'a str,
    /// YAML between the delimiters.
    pub yaml: Option<&'a str>,
    /// Everything after the header.
    pub body: &'a str,
}

/// Split a leading front-matter block from document content.
///
/// A byte order mark is dropped. Content without an opening `---` line, or
/// with an unterminated block, is returned entirely as body.
pub(crate) fn split_front_matter(content: &str) -> Split<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let whole = Split {
        header: "",
        yaml: None,
        body: content,
    };

    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return whole;
    };

    let yaml_start = content.len() - rest.len();
    let mut offset = yaml_start;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end_matches(['\r', '\n']);
        if marker == "---" || marker == "..." {
            let end = offset + line.len();
            return Split {
                header: &content[..end],
                yaml: Some(&content[yaml_start..offset]),
                body: &content[end..],
            };
        }
        offset += line.len();
    }

    whole
}

/// Parse front-matter YAML into a metadata value.
///
/// Empty content yields [`Value::Null`].
///
/// # Errors
///
/// Returns an error if the YAML is malformed.
pub(crate) fn parse_metadata(yaml: &str) -> Result<Value, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // ── split_front_matter tests ─────────────────────────────────────

    #[test]
    fn test_split_with_front_matter() {
        let split = split_front_matter("---\ntitle: A\n---\n# A\n");
        assert_eq!(split.header, "---\ntitle: A\n---\n");
        assert_eq!(split.yaml, Some("title: A\n"));
        assert_eq!(split.body, "# A\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let split = split_front_matter("# Title\n\n---\n");
        assert_eq!(split.header, "");
        assert_eq!(split.yaml, None);
        assert_eq!(split.body, "# Title\n\n---\n");
    }

    #[test]
    fn test_split_dots_terminator() {
        let split = split_front_matter("---\nalias: a\n...\nBody");
        assert_eq!(split.yaml, Some("alias: a\n"));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn test_split_crlf() {
        let split = split_front_matter("---\r\nalias: a\r\n---\r\nBody\r\n");
        assert_eq!(split.yaml, Some("alias: a\r\n"));
        assert_eq!(split.body, "Body\r\n");
    }

    #[test]
    fn test_split_strips_bom() {
        let split = split_front_matter("\u{feff}---\nalias: a\n---\n");
        assert_eq!(split.header, "---\nalias: a\n---\n");
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_split_unterminated_is_body() {
        let content = "---\nalias: a\nno end";
        let split = split_front_matter(content);
        assert_eq!(split.yaml, None);
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_split_empty_block() {
        let split = split_front_matter("---\n---\nBody");
        assert_eq!(split.yaml, Some(""));
        assert_eq!(split.body, "Body");
    }

    // ── parse_metadata tests ─────────────────────────────────────────

    #[test]
    fn test_parse_metadata_empty() {
        assert_eq!(parse_metadata("").unwrap(), Value::Null);
        assert_eq!(parse_metadata("   \n\t  ").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_metadata_mapping() {
        let meta = parse_metadata("title: \"My Page\"\naliases: [a, b]").unwrap();
        assert_eq!(meta.get("title").and_then(Value::as_str), Some("My Page"));
        assert_eq!(meta["aliases"].as_sequence().map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_metadata_invalid_yaml() {
        assert!(parse_metadata("title: [invalid yaml").is_err());
    }
}
