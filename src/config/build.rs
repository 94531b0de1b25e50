//! `[build]` section configuration.
//!
//! Contains index build settings: paths, reading speed, excerpt length and sitemap.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in inkdex.toml - index build configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "src/pages"         # Markdown source directory
/// output = "public"             # Output directory
/// index = "posts-index.json"    # Index file name inside `output`
///
/// [build.sitemap]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Posts index file, relative to `output`.
    #[serde(default = "defaults::build::index")]
    #[educe(Default = defaults::build::index())]
    pub index: PathBuf,

    /// Reading speed used for `readingTime`.
    #[serde(default = "defaults::build::words_per_minute")]
    #[educe(Default = defaults::build::words_per_minute())]
    pub words_per_minute: usize,

    /// Number of body characters used for a derived excerpt.
    #[serde(default = "defaults::build::excerpt_length")]
    #[educe(Default = defaults::build::excerpt_length())]
    pub excerpt_length: usize,

    /// Sitemap generation settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.sitemap]` section.
///
/// Sitemap generation runs in `build` mode when `enable` is set, and always
/// in `sitemap` mode.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Generate the sitemap after the index in `build` mode.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub enable: bool,

    /// Output path for the sitemap file, relative to `output`.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,

    /// URL segment under which post pages live: `/<post_prefix>/<slug>`.
    #[serde(default = "defaults::build::sitemap::post_prefix")]
    #[educe(Default = defaults::build::sitemap::post_prefix())]
    pub post_prefix: String,

    /// Non-post pages listed before the posts.
    #[serde(default = "defaults::build::sitemap::pages")]
    #[educe(Default = defaults::build::sitemap::pages())]
    pub pages: Vec<StaticPage>,
}

/// A fixed page entry for `[build.sitemap].pages`.
///
/// ```toml
/// pages = [{ loc = "/", priority = "1.0", changefreq = "weekly" }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    pub loc: String,
    pub priority: String,
    pub changefreq: String,
}

impl StaticPage {
    pub fn new(loc: &str, priority: &str, changefreq: &str) -> Self {
        Self {
            loc: loc.to_owned(),
            priority: priority.to_owned(),
            changefreq: changefreq.to_owned(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
