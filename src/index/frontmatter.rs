//! YAML front matter extraction.
//!
//! A document may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: useEffect in depth
//! date: 2024-03-01
//! tags: [react, hooks]
//! ---
//! # body starts here
//! ```
//!
//! The block is kept as a loosely typed mapping; each consumer decides what
//! a missing or oddly typed key falls back to.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Front matter fence
const FENCE: &str = "---";

/// Front matter parsing errors
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened with `---` but never closed")]
    Unclosed,

    #[error("invalid front matter YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a key-value mapping")]
    NotMapping,
}

/// Parsed front matter keys and values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
}

impl FrontMatter {
    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar value for `key` rendered as text.
    ///
    /// Missing keys, `null`, empty strings and non-scalar values yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string).filter(|s| !s.is_empty())
    }

    /// List value for `key` as strings.
    ///
    /// A sequence keeps its scalar items in order (duplicates included),
    /// a lone scalar becomes a one-item list, anything else is empty.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(value) => scalar_to_string(value)
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Split a markdown source into front matter and body.
///
/// Sources that do not open with a `---` line have no front matter: the
/// whole text is the body.
pub fn split(source: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(first_line_end) = opening_fence_end(source) else {
        return Ok((FrontMatter::default(), source));
    };

    let rest = &source[first_line_end..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unclosed)
}

/// Byte index just past the opening fence line, if the source has one.
fn opening_fence_end(source: &str) -> Option<usize> {
    let line_end = source.find('\n').map_or(source.len(), |i| i + 1);
    let first_line = source[..line_end].trim_end_matches(['\r', '\n']);
    (first_line.trim_end() == FENCE).then_some(line_end)
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(fields) => Ok(FrontMatter { fields }),
        Value::Null => Ok(FrontMatter::default()),
        _ => Err(FrontMatterError::NotMapping),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let source = "---\ntitle: Hello\ndate: 2024-01-15\n---\n# Body\n";
        let (fm, body) = split(source).unwrap();

        assert_eq!(fm.text("title").as_deref(), Some("Hello"));
        assert_eq!(fm.text("date").as_deref(), Some("2024-01-15"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let source = "# Just a body\n\n---\nnot: yaml\n";
        let (fm, body) = split(source).unwrap();

        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, source);
    }

    #[test]
    fn test_split_keeps_blank_line_after_fence() {
        let (_, body) = split("---\ntitle: a\n---\n\nparagraph").unwrap();
        assert_eq!(body, "\nparagraph");
    }

    #[test]
    fn test_split_crlf() {
        let (fm, body) = split("---\r\ntitle: Win\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.text("title").as_deref(), Some("Win"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_fence_at_end_of_file() {
        let (fm, body) = split("---\ntags: [a]\n---").unwrap();
        assert_eq!(fm.list("tags"), vec!["a"]);
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_empty_block() {
        let (fm, body) = split("---\n---\ntext").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "text");
    }

    #[test]
    fn test_split_strips_bom() {
        let (fm, _) = split("\u{feff}---\ntitle: x\n---\n").unwrap();
        assert_eq!(fm.text("title").as_deref(), Some("x"));
    }

    #[test]
    fn test_split_unclosed_is_error() {
        let err = split("---\ntitle: never closed\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unclosed));
    }

    #[test]
    fn test_split_malformed_yaml_is_error() {
        let err = split("---\ntitle: [unterminated\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_split_non_mapping_is_error() {
        let err = split("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotMapping));
    }

    #[test]
    fn test_text_coerces_scalars() {
        let (fm, _) = split("---\ntitle: 2024\ndraft: true\nempty: ''\nnothing:\n---\n").unwrap();

        assert_eq!(fm.text("title").as_deref(), Some("2024"));
        assert_eq!(fm.text("draft").as_deref(), Some("true"));
        assert_eq!(fm.text("empty"), None);
        assert_eq!(fm.text("nothing"), None);
        assert_eq!(fm.text("missing"), None);
    }

    #[test]
    fn test_list_keeps_order_and_duplicates() {
        let (fm, _) = split("---\ntags: [react, hooks, react]\n---\n").unwrap();
        assert_eq!(fm.list("tags"), vec!["react", "hooks", "react"]);
    }

    #[test]
    fn test_list_from_scalar_and_block_sequence() {
        let (fm, _) = split("---\ntags: rust\ncats:\n  - a\n  - 1\n---\n").unwrap();
        assert_eq!(fm.list("tags"), vec!["rust"]);
        assert_eq!(fm.list("cats"), vec!["a", "1"]);
        assert!(fm.list("missing").is_empty());
    }
}
