//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{lexicon, search};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to the scanner's lexicon JSON, if one was found
    pub lexicon_path: Option<PathBuf>,
    /// Optional log file; the TUI owns stdout so logs go here or nowhere
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive used when logging is enabled
    pub log_level: String,
    /// Minimum fuzzy score for bank search hits
    pub search_min_score: i64,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            lexicon_path: None,
            log_file: None,
            log_level: "info".to_string(),
            search_min_score: search::DEFAULT_MIN_SCORE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Explicit lexicon path wins; otherwise look in the usual places
        config.lexicon_path = env::var("CLIPPINGS_LEXICON").ok().map_or_else(
            detect_lexicon_path,
            |path| Some(expand(&path)),
        );

        config.log_file = env::var("CLIPPINGS_LOG").ok().map(|path| expand(&path));

        if let Ok(level) = env::var("CLIPPINGS_LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log_level = level;
            }
        }

        if let Ok(score) = env::var("CLIPPINGS_SEARCH_MIN_SCORE") {
            if let Ok(score) = score.parse::<i64>() {
                config.search_min_score = score;
            }
        }

        Ok(config)
    }

    /// The lexicon path, or an error explaining how to provide one.
    pub fn require_lexicon_path(&self) -> Result<&Path> {
        self.lexicon_path.as_deref().ok_or_else(|| {
            Error::config(
                "no lexicon file found",
                "Set CLIPPINGS_LEXICON to the JSON written by the clipping scanner",
            )
        })
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Look for a lexicon next to the site sources, then in the user data dir.
fn detect_lexicon_path() -> Option<PathBuf> {
    let local = PathBuf::from(lexicon::SITE_RELATIVE_PATH);
    if local.is_file() {
        return Some(local);
    }

    dirs::data_dir()
        .map(|d| d.join(lexicon::DATA_DIR_NAME).join(lexicon::FILE_NAME))
        .filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_search_threshold_constant() {
        let config = Config::default();
        assert_eq!(config.search_min_score, search::DEFAULT_MIN_SCORE);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.app_name(), "clippings");
    }

    #[test]
    fn missing_lexicon_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(config.require_lexicon_path(), Err(Error::Config { .. })));
    }

    #[test]
    fn expand_keeps_plain_paths() {
        assert_eq!(expand("data/lexicon.json"), PathBuf::from("data/lexicon.json"));
    }
}
