//! Slug derivation and path utilities.
//!
//! Slugs are derived from a document's path relative to the content root,
//! joined with `/` regardless of host platform.

use anyhow::{Context, Result, anyhow};
use std::path::{Component, Path};

/// Markdown file extension recognised as a document
pub const MARKDOWN_EXT: &str = "md";

/// Derive a post slug from a markdown file path.
///
/// # Path Mapping Examples
///
/// | Root | Source | slug |
/// |------|--------|------|
/// | `src/pages` | `src/pages/hello.md` | `hello` |
/// | `src/pages` | `src/pages/frontend/react/useEffect.md` | `frontend/react/useEffect` |
/// | `C:\blog\pages` | `C:\blog\pages\notes\a.md` | `notes/a` |
pub fn slug_from_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;

    let joined = join_components(relative)
        .ok_or_else(|| anyhow!("Invalid path encoding: {}", path.display()))?;

    let slug = joined
        .strip_suffix(".md")
        .ok_or_else(|| anyhow!("Not a .md file: {}", path.display()))?;

    if slug.is_empty() || slug.ends_with('/') {
        return Err(anyhow!("Empty slug for {}", path.display()));
    }

    Ok(slug.to_owned())
}

/// Render a path with `/` separators, for values written to the index.
pub fn to_slash(path: &Path) -> String {
    join_components(path).unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"))
}

/// Check whether `path` names a markdown document.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXT)
}

/// Join normal path components with `/`.
///
/// Backslashes inside a component are normalized too, so a path built on
/// Windows and one built elsewhere yield the same string.
fn join_components(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.replace('\\', "/")),
            Component::CurDir => {}
            Component::RootDir => parts.push(String::new()),
            Component::ParentDir => parts.push("..".into()),
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_str()?.to_owned()),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_slug_top_level() {
        let slug = slug_from_path(Path::new("src/pages"), Path::new("src/pages/hello.md")).unwrap();
        assert_eq!(slug, "hello");
    }

    #[test]
    fn test_slug_nested_keeps_case() {
        let slug = slug_from_path(
            Path::new("src/pages"),
            Path::new("src/pages/frontend/react/useEffect.md"),
        )
        .unwrap();
        assert_eq!(slug, "frontend/react/useEffect");
    }

    #[test]
    fn test_slug_absolute_root() {
        let root = PathBuf::from("/blog/src/pages");
        let slug = slug_from_path(&root, &root.join("notes").join("a.md")).unwrap();
        assert_eq!(slug, "notes/a");
        assert!(!slug.starts_with('/'));
    }

    #[test]
    fn test_slug_backslash_normalized() {
        // a component carrying a literal backslash, as produced on Windows
        let slug = slug_from_path(Path::new("pages"), Path::new("pages/frontend\\react.md")).unwrap();
        assert_eq!(slug, "frontend/react");
        assert!(!slug.contains('\\'));
    }

    #[test]
    fn test_slug_only_strips_trailing_extension() {
        let slug = slug_from_path(Path::new("p"), Path::new("p/v1.md.md")).unwrap();
        assert_eq!(slug, "v1.md");
    }

    #[test]
    fn test_slug_rejects_non_markdown() {
        assert!(slug_from_path(Path::new("p"), Path::new("p/a.txt")).is_err());
    }

    #[test]
    fn test_slug_rejects_outside_root() {
        assert!(slug_from_path(Path::new("p"), Path::new("q/a.md")).is_err());
    }

    #[test]
    fn test_slug_unicode() {
        let slug = slug_from_path(Path::new("p"), Path::new("p/일기/첫글.md")).unwrap();
        assert_eq!(slug, "일기/첫글");
    }

    #[test]
    fn test_to_slash_relative() {
        assert_eq!(to_slash(Path::new("src/pages/a.md")), "src/pages/a.md");
        assert_eq!(to_slash(Path::new("./src/a.md")), "src/a.md");
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(!is_markdown(Path::new("a/b.mdx")));
        assert!(!is_markdown(Path::new("a/md")));
    }
}
