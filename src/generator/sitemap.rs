//! Sitemap generation.
//!
//! Reads the posts index written by the `index` step and lists the configured
//! static pages followed by one entry per post.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/post/frontend/react-hooks</loc>
//!     <lastmod>2024-01-15</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.9</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::{SiteConfig, SitemapConfig},
    data::{Post, PostsIndex},
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const POST_PRIORITY: &str = "0.9";
const POST_CHANGEFREQ: &str = "monthly";

// ============================================================================
// Public API
// ============================================================================

/// Generate the sitemap from the index on disk.
///
/// Fails when the index has not been built yet. Returns the number of URLs
/// written.
pub fn build_sitemap(config: &SiteConfig) -> Result<usize> {
    let index = read_index(&config.index_path())?;
    let base_url = config.require_url()?;

    let sitemap = Sitemap::new(base_url, &config.build.sitemap, &index.posts);
    let count = sitemap.urls.len();
    sitemap.write(&config.sitemap_path())?;

    log!("sitemap"; "generated {} with {} URL(s)", config.build.sitemap.path.display(), count);
    Ok(count)
}

fn read_index(path: &Path) -> Result<PostsIndex> {
    if !path.exists() {
        bail!("{} not found. Run `inkdex index` first.", path.display());
    }
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Post date as written in the index
    lastmod: Option<String>,
    changefreq: String,
    priority: String,
}

impl Sitemap {
    /// Static pages first, then posts in index order.
    fn new(base_url: &str, config: &SitemapConfig, posts: &[Post]) -> Self {
        let pages = config.pages.iter().map(|page| UrlEntry {
            loc: format!("{base_url}{}", page.loc),
            lastmod: None,
            changefreq: page.changefreq.clone(),
            priority: page.priority.clone(),
        });

        let posts = posts.iter().map(|post| UrlEntry {
            loc: post_url(base_url, &config.post_prefix, &post.slug),
            lastmod: Some(post.date.clone()).filter(|date| !date.is_empty()),
            changefreq: POST_CHANGEFREQ.to_owned(),
            priority: POST_PRIORITY.to_owned(),
        });

        Self {
            urls: pages.chain(posts).collect(),
        }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(&lastmod)));
            }
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                escape_xml(&entry.changefreq)
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", escape_xml(&entry.priority)));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(path, self.into_xml())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `<base>/<prefix>/<slug>` with every slug segment percent-encoded.
fn post_url(base_url: &str, prefix: &str, slug: &str) -> String {
    let path = slug
        .split('/')
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/");
    format!("{base_url}/{prefix}/{path}")
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
