//! Content watcher for `inkdex serve`.
//!
//! Any relevant change under the content root re-runs the whole build. The
//! index is never patched in place.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────────────────┐
//! │ notify   │───▶│ Debouncer│───▶│ build_all() (full)    │
//! │ events   │    │ (300ms)  │    └───────────────────────┘
//! └──────────┘    └──────────┘
//! ```

use crate::{build::build_all, config::SiteConfig, log, utils::slug::is_markdown};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Markdown files and directories matter; a removed directory has no
/// extension, so extension-less paths are kept too.
fn is_relevant_path(path: &Path) -> bool {
    !is_temp_file(path) && (is_markdown(path) || path.extension().is_none())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events until the content tree has been quiet for
/// `DEBOUNCE_MS`.
/// Events arriving right after a rebuild are queued like any other.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        let before = self.pending.len();
        self.pending
            .extend(paths.into_iter().filter(|p| is_relevant_path(p)));
        if self.pending.len() > before {
            self.last_event = Some(Instant::now());
        }
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Rebuild
// =============================================================================

/// Rebuild everything after `paths` changed. Failures are logged.
fn rebuild(paths: &[PathBuf], config: &SiteConfig) {
    let content = &config.build.content;
    let trigger = match paths {
        [single] => single.strip_prefix(content).unwrap_or(single).display().to_string(),
        _ => format!("{} files", paths.len()),
    };
    log!("watch"; "{trigger} changed, rebuilding...");

    if let Err(err) = build_all(config) {
        log!("watch"; "build failed ({trigger})");
        log!("error"; "{err:#}");
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Watch the content root and rebuild on change. Blocks until the event
/// channel closes.
pub fn watch_for_changes_blocking(config: &SiteConfig) -> Result<()> {
    let content = &config.build.content;
    if !content.is_dir() {
        log!("watch"; "content directory not found, not watching: {}", content.display());
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    watcher
        .watch(content, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", content.display()))?;

    let root = config.get_root();
    log!("watch"; "{}/", content.strip_prefix(root).unwrap_or(content).display());

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => {
                debouncer.add(event.paths);
            }
            Ok(Err(err)) => log!("watch"; "error: {err}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                rebuild(&debouncer.take(), config);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
