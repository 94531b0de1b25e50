//! Body text helpers: word counting, reading time and excerpts.

/// Characters replaced by spaces in a derived excerpt
const EXCERPT_STRIP: &[char] = &['#', '*', '`', '\n'];

/// Count words the way a whitespace-run split does.
///
/// Leading and trailing empty pieces count, so `""` is one word and
/// `" a "` is three. Reading time relies on this exact count.
pub fn word_count(content: &str) -> usize {
    let mut count = 1;
    let mut in_space = false;
    for c in content.chars() {
        let is_space = c.is_whitespace();
        if is_space && !in_space {
            count += 1;
        }
        in_space = is_space;
    }
    count
}

/// Reading time in whole minutes, rounded up.
pub fn reading_time(content: &str, words_per_minute: usize) -> u32 {
    let minutes = word_count(content).div_ceil(words_per_minute.max(1));
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Derive an excerpt from the first `max_chars` characters of a body.
///
/// Markdown control characters become spaces, then the result is trimmed.
pub fn derive_excerpt(body: &str, max_chars: usize) -> String {
    let head: String = body
        .chars()
        .take(max_chars)
        .map(|c| if EXCERPT_STRIP.contains(&c) { ' ' } else { c })
        .collect();
    head.trim().to_owned()
}

/// Format minutes for display: `5 min`, `2 h`, `1 h 30 min`.
pub fn format_reading_time(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {rest} min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_simple() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("one  \n\t two"), 2);
    }

    #[test]
    fn test_word_count_empty_is_one() {
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn test_word_count_counts_edge_pieces() {
        assert_eq!(word_count(" a "), 3);
        assert_eq!(word_count("a\n"), 2);
        assert_eq!(word_count("   "), 2);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let words = vec!["w"; 200].join(" ");
        assert_eq!(reading_time(&words, 200), 1);

        let words = vec!["w"; 201].join(" ");
        assert_eq!(reading_time(&words, 200), 2);
    }

    #[test]
    fn test_reading_time_empty_content() {
        assert_eq!(reading_time("", 200), 1);
    }

    #[test]
    fn test_reading_time_matches_formula() {
        let body = "lorem ipsum ".repeat(450);
        let expected = word_count(&body).div_ceil(200) as u32;
        assert_eq!(reading_time(&body, 200), expected);
        assert_eq!(expected, 5);
    }

    #[test]
    fn test_derive_excerpt_strips_markdown() {
        let body = "# Title\n\nSome **bold** and `code`.";
        assert_eq!(derive_excerpt(body, 150), "Title  Some   bold   and  code .");
    }

    #[test]
    fn test_derive_excerpt_truncates_by_chars() {
        let body = "가나다라마바사";
        assert_eq!(derive_excerpt(body, 3), "가나다");
    }

    #[test]
    fn test_derive_excerpt_trims_after_truncation() {
        assert_eq!(derive_excerpt("\n\nabc def", 6), "abc");
    }

    #[test]
    fn test_format_reading_time() {
        assert_eq!(format_reading_time(5), "5 min");
        assert_eq!(format_reading_time(60), "1 h");
        assert_eq!(format_reading_time(90), "1 h 30 min");
    }
}
