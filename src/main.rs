//! inkdex - posts index builder and query tool for markdown blogs.

mod build;
mod cli;
mod config;
mod data;
mod generator;
mod index;
mod logger;
mod query;
mod serve;
mod shell;
mod utils;
mod watch;

use anyhow::{Context, Result};
use build::{build_all, build_index_file};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, QueryArgs};
use config::SiteConfig;
use generator::sitemap::build_sitemap;
use query::{QueryEngine, open_source};
use serve::serve_site;
use shell::{run_shell, select_tags, write_listing, write_lookup, write_tag_summary};
use std::{io, path::Path};
use utils::date::relative_time;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match cli.command() {
        Commands::Index => build_index_file(config).map(|_| ()),
        Commands::Sitemap => build_sitemap(config).map(|_| ()),
        Commands::Build { .. } => build_all(config),
        Commands::Query { args } => run_query(config, &args),
        Commands::Serve { .. } => {
            build_all(config)?;
            serve_site(config)
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file falls back to defaults.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

// ============================================================================
// Query
// ============================================================================

/// Load the index into a query engine and print the requested view.
fn run_query(config: &SiteConfig, args: &QueryArgs) -> Result<()> {
    let location = args
        .source
        .clone()
        .unwrap_or_else(|| config.index_path().display().to_string());

    let mut engine = QueryEngine::new(open_source(&location));
    select_tags(&mut engine, &args.tags);
    if let Some(search) = &args.search {
        engine.set_search_query(search.as_str());
    }

    let loaded = engine.load();
    log!("query"; "{}: {}", location, engine.status());
    loaded.with_context(|| format!("Failed to load posts index from {location}"))?;

    let mut out = io::stdout().lock();
    if let Some(slug) = &args.slug {
        write_lookup(&engine, slug, &mut out)?;
    } else if args.tag_summary {
        write_tag_summary(&engine, &mut out)?;
    } else {
        write_listing(&engine, Utc::now(), &mut out)?;
        if let Some(generated) = engine.last_generated() {
            log!("query"; "index generated {}", relative_time(generated, Utc::now()));
        }
    }

    if args.interactive {
        run_shell(&mut engine, io::stdin().lock(), &mut out)?;
    }
    Ok(())
}
