//! Site configuration management for `inkdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site metadata (title, url)                     |
//! | `[build]`   | Content/output paths, index and sitemap knobs  |
//! | `[serve]`   | Static server (port, interface, watch)         |
//!
//! A missing config file is not an error: every field has a default, so a
//! fresh checkout can build its index with no setup.
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! url = "https://example.com"
//!
//! [build]
//! content = "src/pages"
//! output = "public"
//!
//! [build.sitemap]
//! enable = true
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;

pub use build::{SitemapConfig, StaticPage};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing inkdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Static server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute path of the posts index artifact.
    pub fn index_path(&self) -> PathBuf {
        self.build.output.join(&self.build.index)
    }

    /// Absolute path of the sitemap file.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(cli, &root);

        match &cli.command {
            Some(Commands::Build { sitemap }) => {
                Self::update_option(&mut self.build.sitemap.enable, sitemap.as_ref());
            }
            Some(Commands::Serve {
                interface,
                port,
                watch,
            }) => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.build.words_per_minute == 0 {
            bail!(ConfigError::Validation(
                "[build.words_per_minute] must be greater than 0".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        self.serve.ip()?;

        if self.build.sitemap.post_prefix.contains('/') {
            bail!(ConfigError::Validation(
                "[build.sitemap.post_prefix] must be a single path segment".into()
            ));
        }

        Ok(())
    }

    /// Base URL without trailing slash, required by the sitemap step.
    pub fn require_url(&self) -> Result<&str> {
        match self.base.url.as_deref() {
            Some(url) => Ok(url.trim_end_matches('/')),
            None => bail!(ConfigError::Validation(
                "[base.url] is required for sitemap generation".into()
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str(
            r#"
            [base]
            title = "My Blog"
            [build]
            content = "posts"
        "#,
        )
        .unwrap();

        assert_eq!(config.base.title, "My Blog");
        assert_eq!(config.build.content, PathBuf::from("posts"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[base\ntitle = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/inkdex.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_update_with_cli_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = parse_cli(&["inkdex", "--root", root, "--content", "notes", "index"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.content, root.join("notes"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.index_path(), root.join("public/posts-index.json"));
    }

    #[test]
    fn test_update_with_cli_serve_overrides() {
        let cli = parse_cli(&["inkdex", "serve", "--port", "8080", "--watch", "false"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);

        assert_eq!(config.serve.port, 8080);
        assert!(!config.serve.watch);
        assert_eq!(config.serve.interface, "127.0.0.1");
    }

    #[test]
    fn test_update_with_cli_build_sitemap() {
        let cli = parse_cli(&["inkdex", "build", "--sitemap"]);

        let mut config = SiteConfig::default();
        assert!(!config.build.sitemap.enable);
        config.update_with_cli(&cli);
        assert!(config.build.sitemap.enable);
    }

    #[test]
    fn test_validate_defaults_ok() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_words_per_minute() {
        let config = SiteConfig::from_str("[build]\nwords_per_minute = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_url() {
        let config = SiteConfig::from_str("[base]\nurl = \"example.com\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_interface() {
        let config = SiteConfig::from_str("[serve]\ninterface = \"localhost\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[serve.interface]"));
    }

    #[test]
    fn test_require_url() {
        let config = SiteConfig::default();
        assert!(config.require_url().is_err());

        let config = SiteConfig::from_str("[base]\nurl = \"https://a.github.io/\"").unwrap();
        assert_eq!(config.require_url().unwrap(), "https://a.github.io");
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = SiteConfig::from_str("[deploy]\nprovider = \"github\"");
        assert!(result.is_err());
    }
}
