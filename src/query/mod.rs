//! In-memory query engine over a posts index.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ── load() ──► Loading ──┬──► Ready   (collection held for the
//!                              │             engine's lifetime)
//!                              └──► Error   (no partial data)
//! ```
//!
//! `Ready` and `Error` are terminal: the index is fetched exactly once.
//!
//! The filtered view and the tag summary are pure functions of
//! `(posts, search_query, selected_tags)` (see [`filter`]); every mutator
//! re-derives them before returning, so readers never observe a stale view.

pub mod filter;
pub mod source;

pub use source::{IndexSource, open_source};

use crate::{
    data::{Post, PostsIndex, TagFrequency},
    log,
};
use std::{fmt, io, path::PathBuf, sync::Arc};
use thiserror::Error;

// ============================================================================
// Errors & Status
// ============================================================================

/// Failure while loading an index into the engine.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to read posts index `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("request for posts index `{0}` failed")]
    Request(String, #[source] reqwest::Error),

    #[error("`{url}` responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("posts index is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("posts index was already loaded")]
    AlreadyLoaded,
}

/// Load status of a [`QueryEngine`].
#[derive(Debug, Clone, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(Arc<QueryError>),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Ready => f.write_str("ready"),
            Self::Error(err) => write!(f, "error: {err}"),
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Holds one loaded posts index plus the current search and tag filters.
pub struct QueryEngine<S> {
    source: S,
    status: LoadStatus,
    index: Option<PostsIndex>,
    search_query: String,
    selected_tags: Vec<String>,
    /// Positions in `index.posts` passing the current filters
    filtered: Vec<usize>,
    tag_frequencies: Vec<TagFrequency>,
}

impl<S: IndexSource> QueryEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            status: LoadStatus::Idle,
            index: None,
            search_query: String::new(),
            selected_tags: Vec::new(),
            filtered: Vec::new(),
            tag_frequencies: Vec::new(),
        }
    }

    /// Fetch the index once and hold it.
    ///
    /// On failure the engine moves to [`LoadStatus::Error`] and the error is
    /// also returned. Calling this again after a fetch was attempted returns
    /// [`QueryError::AlreadyLoaded`] without touching the state.
    pub fn load(&mut self) -> Result<(), Arc<QueryError>> {
        if !matches!(self.status, LoadStatus::Idle) {
            return Err(Arc::new(QueryError::AlreadyLoaded));
        }

        self.status = LoadStatus::Loading;
        log!("query"; "loading {}", self.source.location());

        match self.source.fetch() {
            Ok(index) => {
                self.tag_frequencies = filter::tag_frequencies(&index.posts);
                self.index = Some(index);
                self.refilter();
                log!("query"; "loaded {} post(s)", self.posts().len());
                self.status = LoadStatus::Ready;
                Ok(())
            }
            Err(err) => {
                let err = Arc::new(err);
                self.status = LoadStatus::Error(Arc::clone(&err));
                Err(err)
            }
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Replace the free-text filter.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refilter();
    }

    /// Deselect `tag` if selected, otherwise append it to the selection.
    pub fn toggle_tag(&mut self, tag: &str) {
        match self.selected_tags.iter().position(|t| t == tag) {
            Some(pos) => {
                self.selected_tags.remove(pos);
            }
            None => self.selected_tags.push(tag.to_owned()),
        }
        self.refilter();
    }

    /// Reset both the search text and the tag selection.
    pub fn clear_filters(&mut self) {
        self.search_query.clear();
        self.selected_tags.clear();
        self.refilter();
    }

    /// Exact slug lookup over the full collection.
    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts().iter().find(|post| post.slug == slug)
    }

    /// Full collection, empty until loaded.
    pub fn posts(&self) -> &[Post] {
        self.index
            .as_ref()
            .map(|index| index.posts.as_slice())
            .unwrap_or_default()
    }

    /// Posts passing the current filters, in collection order.
    pub fn filtered_posts(&self) -> Vec<&Post> {
        let posts = self.posts();
        self.filtered.iter().map(|&i| &posts[i]).collect()
    }

    pub fn tag_frequencies(&self) -> &[TagFrequency] {
        &self.tag_frequencies
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn last_generated(&self) -> Option<&str> {
        self.index.as_ref().map(|index| index.last_generated.as_str())
    }

    fn refilter(&mut self) {
        self.filtered =
            filter::filter_indices(self.posts(), &self.search_query, &self.selected_tags);
    }
}

// ============================================================================
// Tests
// ============================================================================
