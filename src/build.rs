//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_all()
//!     │
//!     ├── build_index_file() ──► <output>/posts-index.json
//!     │
//!     └── build_sitemap()    ──► <output>/sitemap.xml   (if enabled)
//! ```
//!
//! Every run is a full rebuild; nothing is carried over from a previous
//! artifact.

use crate::{
    config::SiteConfig,
    data::PostsIndex,
    generator::sitemap::build_sitemap,
    index::{IndexOptions, build_index, write_index},
    log,
};
use anyhow::Result;
use chrono::Utc;

/// Scan the content root and write the posts index artifact.
pub fn build_index_file(config: &SiteConfig) -> Result<PostsIndex> {
    let options = IndexOptions::from_config(config);
    let index = build_index(&options, Utc::now());

    let path = config.index_path();
    write_index(&index, &path)?;

    log!("index"; "generated {} with {} post(s)", config.build.index.display(), index.posts.len());
    log!("index"; "output: {}", path.display());
    Ok(index)
}

/// Build the index, then the sitemap when `[build.sitemap].enable` is set.
pub fn build_all(config: &SiteConfig) -> Result<()> {
    build_index_file(config)?;

    if config.build.sitemap.enable {
        build_sitemap(config)?;
    }
    Ok(())
}
