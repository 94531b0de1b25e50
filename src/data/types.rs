//! Data types for the posts index.
//!
//! These types are serialized to JSON by the builder and deserialized by the
//! query engine. Parsing is forward compatible: unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// A single post record, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Path-derived identifier (e.g., "frontend/react/use-effect")
    pub slug: String,

    /// Title from front matter, or the slug
    pub title: String,

    /// Publication date as written by the author, or the build time
    pub date: String,

    /// Tags in declaration order, duplicates kept
    #[serde(default)]
    pub tags: Vec<String>,

    /// Short summary for list views
    #[serde(default)]
    pub excerpt: String,

    /// Raw markdown body
    #[serde(default)]
    pub content: String,

    /// Estimated reading time in minutes
    #[serde(default)]
    pub reading_time: u32,

    /// Source file the post was built from
    #[serde(default)]
    pub file_path: String,
}

impl Post {
    /// Check whether the post carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The whole index artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsIndex {
    /// Posts sorted by date, newest first
    pub posts: Vec<Post>,

    /// Build timestamp (RFC 3339)
    pub last_generated: String,
}

/// Occurrence count of a tag across the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFrequency {
    pub tag: String,
    pub count: usize,
}
