//! Common test utilities: tracing setup and permutation checks.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code with tracing::info!, tracing::debug!, etc.
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `gearshuffle=debug,gearshuffle::context=trace`)
//! - `GEARSHUFFLE_LOG_DIR`: Log directory (default: `logs/`)
//! - `GEARSHUFFLE_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! Library events are only emitted when the tests run with
//! `--features tracing`.
//!
//! # Log Files
//!
//! Logs are written to `logs/gearshuffle.jsonl` as newline-delimited JSON.
//!
//! ```bash
//! # Every fallback to 0 on an invalid domain
//! cat logs/gearshuffle.jsonl | jq 'select(.level == "WARN")'
//!
//! # Cache misses of one tier
//! cat logs/gearshuffle.jsonl | jq 'select(.fields.tier == "large")'
//! ```

#![allow(dead_code)]

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing();
    });
}

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log file name.
    pub log_file: String,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: "gearshuffle.jsonl".to_string(),
            console_enabled: true,
            default_level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("GEARSHUFFLE_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if env::var("GEARSHUFFLE_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

#[expect(clippy::expect_used)]
fn setup_tracing() {
    let config = TracingConfig::from_env();

    std::fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

    let log_path = config.log_dir.join(&config.log_file);

    // Append: each test binary is its own process.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let console_layer = if config.console_enabled {
        Some(
            tracing_subscriber::fmt::layer()
                .with_thread_names(true)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .compact()
                .with_filter(make_filter(config.default_level)),
        )
    } else {
        None
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_filter(make_filter(config.default_level));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// ============================================================================
//  Permutation helpers
// ============================================================================

/// True when `values` holds every integer of `0..n` exactly once.
pub fn is_permutation(values: &[u64], n: u64) -> bool {
    if values.len() as u64 != n {
        return false;
    }

    let mut seen = vec![false; values.len()];
    for &v in values {
        let Some(slot) = seen.get_mut(v as usize) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}

/// Order-sensitive fingerprint of a sequence of outputs.
///
/// Pinned checksums in the regression suite are computed with this fold.
pub fn checksum(values: impl IntoIterator<Item = u64>) -> u64 {
    values
        .into_iter()
        .fold(0u64, |acc, v| acc.rotate_left(7).wrapping_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init() {
        init_tracing();
        tracing::info!("Tracing initialized successfully");
        tracing::debug!(tier = "standard", n = 52, "Debug event");
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[2, 0, 0], 3));
        assert!(!is_permutation(&[3, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }
}
