//! Artifacts derived from the posts index.

pub mod sitemap;
