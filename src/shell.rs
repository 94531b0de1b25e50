//! Text front end for a loaded [`QueryEngine`].
//!
//! Renders the filtered listing, a single post or the tag summary, and in
//! interactive mode reads one command per line:
//!
//! | Input          | Effect                                  |
//! |----------------|-----------------------------------------|
//! | `#react`       | toggle the `react` tag                  |
//! | `:post <slug>` | show one post                           |
//! | `:tags`        | tag frequency summary                   |
//! | `:clear`       | drop search text and selected tags      |
//! | `:q`           | quit                                    |
//! | anything else  | replace the search text (empty clears)  |

use crate::{
    data::Post,
    query::{IndexSource, QueryEngine},
    utils::{
        date::{format_ymd, relative_time},
        text::format_reading_time,
    },
};
use chrono::{DateTime, Utc};
use std::io::{self, BufRead, Write};

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Search(&'a str),
    ToggleTag(&'a str),
    Post(&'a str),
    Tags,
    Clear,
    Quit,
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if let Some(tag) = trimmed.strip_prefix('#')
        && !tag.is_empty()
    {
        return Command::ToggleTag(tag);
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((":post", slug)) => Command::Post(slug.trim()),
        _ => match trimmed {
            ":tags" => Command::Tags,
            ":clear" => Command::Clear,
            ":q" | ":quit" => Command::Quit,
            _ => Command::Search(line.trim_end_matches(['\r', '\n'])),
        },
    }
}

/// Select each of `tags` once; a tag repeated on the command line stays
/// selected instead of toggling back off.
pub fn select_tags<S: IndexSource>(engine: &mut QueryEngine<S>, tags: &[String]) {
    for tag in tags {
        if !engine.selected_tags().contains(tag) {
            engine.toggle_tag(tag);
        }
    }
}

// ============================================================================
// Interactive loop
// ============================================================================

/// Apply commands from `input` until `:q` or end of input, printing the
/// listing after every filter change.
pub fn run_shell<S: IndexSource>(
    engine: &mut QueryEngine<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    write_prompt(engine, out)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Command::Quit => break,
            Command::Tags => write_tag_summary(engine, out)?,
            Command::Post(slug) => write_lookup(engine, slug, out)?,
            Command::Clear => {
                engine.clear_filters();
                write_listing(engine, Utc::now(), out)?;
            }
            Command::ToggleTag(tag) => {
                engine.toggle_tag(tag);
                write_listing(engine, Utc::now(), out)?;
            }
            Command::Search(text) => {
                engine.set_search_query(text);
                write_listing(engine, Utc::now(), out)?;
            }
        }
        write_prompt(engine, out)?;
    }

    Ok(())
}

fn write_prompt<S: IndexSource>(engine: &QueryEngine<S>, out: &mut impl Write) -> io::Result<()> {
    let tags: String = engine.selected_tags().iter().map(|t| format!(" #{t}")).collect();
    write!(out, "[{}{}]> ", engine.search_query(), tags)?;
    out.flush()
}

// ============================================================================
// Rendering
// ============================================================================

/// Filtered posts, one block per post, followed by a count line.
pub fn write_listing<S: IndexSource>(
    engine: &QueryEngine<S>,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> io::Result<()> {
    let filtered = engine.filtered_posts();

    for post in &filtered {
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", post.tags.join(", "))
        };
        writeln!(
            out,
            "{}  {}  ({}, {}){}",
            format_ymd(&post.date),
            post.title,
            format_reading_time(post.reading_time),
            relative_time(&post.date, now),
            tags
        )?;
        writeln!(out, "            {}", post.slug)?;
    }

    writeln!(out, "{} of {} post(s)", filtered.len(), engine.posts().len())
}

/// Tag summary, most used first.
pub fn write_tag_summary<S: IndexSource>(
    engine: &QueryEngine<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    for freq in engine.tag_frequencies() {
        writeln!(out, "{:>4}  {}", freq.count, freq.tag)?;
    }
    Ok(())
}

/// A single post by slug, or a not-found line.
pub fn write_lookup<S: IndexSource>(
    engine: &QueryEngine<S>,
    slug: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    match engine.get_by_slug(slug) {
        Some(post) => write_post(post, out),
        None => writeln!(out, "post not found: {slug}"),
    }
}

fn write_post(post: &Post, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", post.title)?;
    writeln!(out, "slug:     {}", post.slug)?;
    writeln!(out, "date:     {}", format_ymd(&post.date))?;
    writeln!(out, "reading:  {}", format_reading_time(post.reading_time))?;
    if !post.tags.is_empty() {
        writeln!(out, "tags:     {}", post.tags.join(", "))?;
    }
    if !post.file_path.is_empty() {
        writeln!(out, "file:     {}", post.file_path)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", post.excerpt)
}
