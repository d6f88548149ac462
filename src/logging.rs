//! File-backed `tracing` setup.
//!
//! The terminal UI draws over stdout, so log lines only go somewhere when a
//! log file is configured.

use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::error::{Error, Result};

/// Install a subscriber writing to `config.log_file`, if set.
///
/// Returns `false` when logging stays disabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(e, path.clone()))?;

    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    tracing::info!("{} {} logging to {}", config.app_name(), config.app_version(), path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn no_log_file_means_no_subscriber() {
        let config = Config::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clippings.log");
        let mut config = Config::default();
        config.log_file = Some(path.clone());

        assert!(init(&config).unwrap());
        assert!(path.exists());
    }
}
