//! Alias declarations in page front-matter.
//!
//! A page declares aliases under the `alias` or `aliases` key. Each key
//! accepts three shapes:
//!
//! ```yaml
//! alias: setup                 # single name, text = page title
//! alias:
//!   name: setup                # name with custom link text
//!   text: Setup guide
//! aliases: [setup, install]    # several names, text = page title
//! ```
//!
//! Both keys may appear on the same page; their declarations are combined,
//! `alias` first. A site can read aliases from a single custom key instead
//! with [`declarations_under`].

use serde::Deserialize;
use serde_yaml::Value;

/// Metadata keys that declare aliases, in processing order.
pub const ALIAS_KEYS: [&str; 2] = ["alias", "aliases"];

/// One normalized alias declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDeclaration {
    /// Alias name, exactly as declared.
    pub name: String,
    /// Custom link text, if declared.
    pub text: Option<String>,
}

impl AliasDeclaration {
    /// Create a declaration without custom text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
        }
    }
}

/// Why (part of) a declaration was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// The value is not a string, mapping or list.
    #[error("expected a name, a mapping with `name`, or a list of names, found {0}")]
    UnsupportedType(&'static str),
    /// The mapping form could not be read.
    #[error("invalid alias mapping: {0}")]
    InvalidMapping(String),
    /// A list item is not a plain string.
    #[error("list item {index} is {found}, expected a name")]
    NonStringItem {
        /// Zero-based position in the list.
        index: usize,
        /// Kind of value found.
        found: &'static str,
    },
    /// The name can never be referenced from `[[...]]`.
    #[error("alias name {0:?} cannot be referenced")]
    InvalidName(String),
}

/// Mapping form: `{ name, text }`.
#[derive(Deserialize)]
struct NamedAlias {
    name: String,
    #[serde(default, alias = "title")]
    text: Option<String>,
}

/// Normalize every alias declaration found in page metadata.
///
/// Returns one item per declared name (or per problem), tagged with the key
/// it came from. Pages without either key yield nothing.
pub fn declarations(metadata: &Value) -> Vec<(&'static str, Result<AliasDeclaration, DeclarationError>)> {
    declarations_under(metadata, &ALIAS_KEYS)
}

/// Normalize the alias declarations found under `keys`, in key order.
pub fn declarations_under<'k>(
    metadata: &Value,
    keys: &[&'k str],
) -> Vec<(&'k str, Result<AliasDeclaration, DeclarationError>)> {
    keys.iter()
        .filter_map(|&key| metadata.get(key).map(|value| (key, value)))
        .flat_map(|(key, value)| parse_value(value).into_iter().map(move |r| (key, r)))
        .collect()
}

/// Normalize a single `alias`/`aliases` value.
pub fn parse_value(value: &Value) -> Vec<Result<AliasDeclaration, DeclarationError>> {
    match value {
        Value::Null => Vec::new(),
        Value::String(name) => vec![validate_name(name).map(AliasDeclaration::new)],
        Value::Mapping(_) => vec![parse_mapping(value)],
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(name) => validate_name(name).map(AliasDeclaration::new),
                other => Err(DeclarationError::NonStringItem {
                    index,
                    found: value_kind(other),
                }),
            })
            .collect(),
        other => vec![Err(DeclarationError::UnsupportedType(value_kind(other)))],
    }
}

fn parse_mapping(value: &Value) -> Result<AliasDeclaration, DeclarationError> {
    let named: NamedAlias = serde_yaml::from_value(value.clone())
        .map_err(|e| DeclarationError::InvalidMapping(e.to_string()))?;
    let name = validate_name(&named.name)?;
    Ok(AliasDeclaration {
        name,
        text: named.text.filter(|t| !t.trim().is_empty()),
    })
}

/// Reject names the reference syntax cannot express.
///
/// Whitespace is significant and kept; only the emptiness check trims.
fn validate_name(name: &str) -> Result<String, DeclarationError> {
    let unreachable = name.trim().is_empty() || name.contains([']', '|', '#', '\n', '\r']);
    if unreachable {
        return Err(DeclarationError::InvalidName(name.to_owned()));
    }
    Ok(name.to_owned())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
