//! Source documents and their conversion into post records.

use super::{
    IndexOptions,
    frontmatter::{self, FrontMatter},
};
use crate::{
    data::Post,
    utils::{
        slug::{slug_from_path, to_slash},
        text::{derive_excerpt, reading_time},
    },
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A markdown file read from the content tree.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl Document {
    /// Read and split a markdown file.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(path, &String::from_utf8_lossy(&bytes))
    }

    /// Split already loaded source text.
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let (front_matter, body) = frontmatter::split(source)
            .with_context(|| format!("Failed to parse front matter of {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            front_matter,
            body: body.to_owned(),
        })
    }

    /// Build the post record for this document.
    ///
    /// | Field | Fallback when absent |
    /// |-------|----------------------|
    /// | `title` | slug |
    /// | `date` | `generated` (build time) |
    /// | `tags` | empty |
    /// | `excerpt` | first `excerpt_length` chars of the body |
    pub fn into_post(self, options: &IndexOptions<'_>, generated: &str) -> Result<Post> {
        let slug = slug_from_path(options.content, &self.path)?;
        let fm = &self.front_matter;

        let title = fm.text("title").unwrap_or_else(|| slug.clone());
        let date = fm.text("date").unwrap_or_else(|| generated.to_owned());
        let tags = fm.list("tags");
        let excerpt = fm
            .text("excerpt")
            .unwrap_or_else(|| derive_excerpt(&self.body, options.excerpt_length));
        let reading_time = reading_time(&self.body, options.words_per_minute);
        let file_path = to_slash(self.path.strip_prefix(options.base).unwrap_or(&self.path));

        Ok(Post {
            slug,
            title,
            date,
            tags,
            excerpt,
            content: self.body,
            reading_time,
            file_path,
        })
    }
}
