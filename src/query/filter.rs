//! Pure derivations over a loaded collection.
//!
//! Every function here is a function of its arguments only; the engine calls
//! them again whenever one of the inputs changes.

use crate::data::{Post, TagFrequency};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;

/// Indices of the posts passing both filters, in collection order.
///
/// Tag filter first, then text filter; both must pass.
pub fn filter_indices(posts: &[Post], search_query: &str, selected_tags: &[String]) -> Vec<usize> {
    let needle = normalize_query(search_query);
    posts
        .iter()
        .enumerate()
        .filter(|(_, post)| matches_tags(post, selected_tags))
        .filter(|(_, post)| needle.as_deref().is_none_or(|n| matches_text(post, n)))
        .map(|(i, _)| i)
        .collect()
}

/// A post passes when nothing is selected or it has ANY selected tag.
pub fn matches_tags(post: &Post, selected_tags: &[String]) -> bool {
    selected_tags.is_empty() || selected_tags.iter().any(|tag| post.has_tag(tag))
}

/// Case-insensitive substring match on title, content or any single tag.
///
/// `needle` must already be lower-cased (see [`normalize_query`]).
pub fn matches_text(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Lower-cased search needle, or `None` when the query is blank.
///
/// Blankness is judged on the trimmed query, but the needle itself keeps
/// its surrounding spaces.
pub fn normalize_query(search_query: &str) -> Option<String> {
    if search_query.trim().is_empty() {
        None
    } else {
        Some(search_query.to_lowercase())
    }
}

/// Count tag occurrences over the whole collection, most frequent first.
///
/// Equal counts keep the order in which tags were first seen.
pub fn tag_frequencies(posts: &[Post]) -> Vec<TagFrequency> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

    for tag in posts.iter().flat_map(|post| &post.tags) {
        let count = counts.entry(tag.as_str()).or_insert_with(|| {
            first_seen.push(tag.as_str());
            0
        });
        *count += 1;
    }

    let mut frequencies: Vec<TagFrequency> = first_seen
        .into_iter()
        .map(|tag| TagFrequency {
            tag: tag.to_owned(),
            count: counts[tag],
        })
        .collect();
    frequencies.sort_by_key(|f| Reverse(f.count));
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, content: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.into(),
            title: title.into(),
            date: "2024-01-01".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            excerpt: String::new(),
            content: content.into(),
            reading_time: 1,
            file_path: format!("src/pages/{slug}.md"),
        }
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn filter_posts<'a>(posts: &'a [Post], query: &str, selected: &[String]) -> Vec<&'a Post> {
        filter_indices(posts, query, selected)
            .into_iter()
            .map(|i| &posts[i])
            .collect()
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|p| p.slug.as_str()).collect()
    }

    fn abc() -> Vec<Post> {
        vec![
            post("a", "Alpha", "", &["x", "y"]),
            post("b", "Beta", "", &["y"]),
            post("c", "Gamma", "", &["z"]),
        ]
    }

    #[test]
    fn test_empty_filters_keep_everything_in_order() {
        let posts = abc();
        assert_eq!(slugs(filter_posts(&posts, "", &[])), vec!["a", "b", "c"]);
        assert_eq!(slugs(filter_posts(&posts, "   ", &[])), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tag_filter_is_any_of() {
        let posts = abc();
        assert_eq!(slugs(filter_posts(&posts, "", &tags(&["x", "z"]))), vec!["a", "c"]);
        assert_eq!(slugs(filter_posts(&posts, "", &tags(&["y"]))), vec!["a", "b"]);
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let posts = abc();
        assert!(filter_posts(&posts, "", &tags(&["X"])).is_empty());
    }

    #[test]
    fn test_text_filter_case_insensitive_title() {
        let posts = vec![post("r", "Learning react hooks", "", &[])];
        assert_eq!(slugs(filter_posts(&posts, "REACT", &[])), vec!["r"]);
    }

    #[test]
    fn test_text_filter_content_and_tags() {
        let posts = vec![
            post("content", "Untitled", "We talk about Borrowing here", &[]),
            post("tag", "Untitled", "", &["TypeScript"]),
            post("none", "Untitled", "nothing", &["misc"]),
        ];
        assert_eq!(slugs(filter_posts(&posts, "borrow", &[])), vec!["content"]);
        assert_eq!(slugs(filter_posts(&posts, "script", &[])), vec!["tag"]);
    }

    #[test]
    fn test_text_filter_keeps_inner_spaces_of_query() {
        let posts = vec![
            post("spaced", "react hooks", "", &[]),
            post("joined", "reacthooks", "", &[]),
        ];
        assert_eq!(slugs(filter_posts(&posts, "react hooks", &[])), vec!["spaced"]);
        // surrounding spaces are part of the needle
        assert!(filter_posts(&posts, " reacthooks", &[]).is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let posts = vec![
            post("both", "Rust traits", "", &["rust"]),
            post("tag-only", "Cooking", "", &["rust"]),
            post("text-only", "Rust macros", "", &["misc"]),
        ];
        assert_eq!(slugs(filter_posts(&posts, "rust", &tags(&["rust"]))), vec!["both", "tag-only"]);
        assert_eq!(slugs(filter_posts(&posts, "traits", &tags(&["rust"]))), vec!["both"]);
    }

    #[test]
    fn test_filter_indices_match_posts() {
        let posts = abc();
        assert_eq!(filter_indices(&posts, "", &tags(&["z"])), vec![2]);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query(" \t"), None);
        assert_eq!(normalize_query(" React "), Some(" react ".into()));
    }

    #[test]
    fn test_tag_frequencies_counts_full_collection() {
        let posts = vec![
            post("1", "", "", &["react", "js"]),
            post("2", "", "", &["rust", "react"]),
            post("3", "", "", &["react", "rust", "react"]),
            post("4", "", "", &[]),
        ];
        let freq = tag_frequencies(&posts);

        assert_eq!(
            freq,
            vec![
                TagFrequency { tag: "react".into(), count: 4 },
                TagFrequency { tag: "rust".into(), count: 2 },
                TagFrequency { tag: "js".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_tag_frequencies_ties_keep_first_seen_order() {
        let posts = vec![post("1", "", "", &["b", "a"]), post("2", "", "", &["c"])];
        let order: Vec<_> = tag_frequencies(&posts).into_iter().map(|f| f.tag).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_tag_frequencies_empty() {
        assert!(tag_frequencies(&[]).is_empty());
    }
}
