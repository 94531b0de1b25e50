//! Posts index builder.
//!
//! Walks the content tree, turns every markdown file into a [`Post`] and
//! writes the sorted collection as a single JSON artifact.
//!
//! # Architecture
//!
//! ```text
//! build_index()
//!     │
//!     ├── scan_posts()  ── walk content root, *.md only
//!     │       │
//!     │       └── Document::read() → into_post()
//!     │           (a failing file is logged and skipped)
//!     │
//!     ├── sort_posts()  ── stable, newest date first
//!     │
//!     └── PostsIndex { posts, lastGenerated }
//!
//! write_index() ── create output dir, pretty JSON
//! ```
//!
//! A missing content root is not an error: the build degrades to an empty
//! index so a fresh project can run the pipeline before writing any posts.

pub mod document;
pub mod frontmatter;

pub use document::Document;

use crate::{
    config::SiteConfig,
    data::{Post, PostsIndex},
    log,
    utils::{
        date::{parse_date, to_iso},
        slug::is_markdown,
    },
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use std::{cmp::Reverse, fs, path::Path};
use walkdir::WalkDir;

/// Inputs of an index build.
#[derive(Debug, Clone, Copy)]
pub struct IndexOptions<'a> {
    /// Content root; slugs are relative to it
    pub content: &'a Path,
    /// Directory `filePath` values are relative to (the project root)
    pub base: &'a Path,
    pub words_per_minute: usize,
    pub excerpt_length: usize,
}

impl<'a> IndexOptions<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            content: &config.build.content,
            base: config.get_root(),
            words_per_minute: config.build.words_per_minute,
            excerpt_length: config.build.excerpt_length,
        }
    }
}

/// Build the posts index for the content tree.
///
/// `now` is used both as `lastGenerated` and as the date of posts that do
/// not declare one.
pub fn build_index(options: &IndexOptions<'_>, now: DateTime<Utc>) -> PostsIndex {
    let generated = to_iso(now);
    let mut posts = scan_posts(options, &generated);
    sort_posts(&mut posts);
    warn_duplicate_slugs(&posts);

    PostsIndex {
        posts,
        last_generated: generated,
    }
}

/// Serialize the index as pretty-printed JSON, creating parent directories.
pub fn write_index(index: &PostsIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(index).context("Failed to serialize posts index")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read every markdown file under the content root into posts.
///
/// Files come back in walk order (sorted by file name per directory).
/// Symlinked files and directories are followed; a link loop is skipped.
fn scan_posts(options: &IndexOptions<'_>, generated: &str) -> Vec<Post> {
    let root = options.content;
    if !root.is_dir() {
        log!("warn"; "content directory not found: {}", root.display());
        return Vec::new();
    }

    let mut posts = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log!("skip"; "{err}");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        match Document::read(path).and_then(|doc| doc.into_post(options, generated)) {
            Ok(post) => {
                log!("index"; "{}", post.slug);
                posts.push(post);
            }
            Err(err) => log!("skip"; "{}: {err:#}", path.display()),
        }
    }

    posts
}

/// Stable sort by parsed date, newest first. Unparseable dates go last.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_key(|post| Reverse(parse_date(&post.date)));
}

fn warn_duplicate_slugs(posts: &[Post]) {
    let mut seen = FxHashSet::default();
    for post in posts {
        if !seen.insert(post.slug.as_str()) {
            log!("warn"; "duplicate slug `{}` ({})", post.slug, post.file_path);
        }
    }
}
