// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the gh-comment CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on stderr.
//! The `log_level` setting picks the default level; `RUST_LOG` replaces the
//! whole filter when set.
//!
//! # Examples
//!
//! ```bash
//! # Default: info level for gh-comment, errors only for octocrab
//! gh-comment --message "Build passed"
//!
//! # Debug output for troubleshooting pagination
//! RUST_LOG=gh_comment_core=debug gh-comment --message "Build passed" --update
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directives for our crates at `level`.
fn default_directives(level: &str) -> String {
    format!("gh_comment={level},gh_comment_core={level},octocrab=error,hyper=error")
}

/// Initialize the logging subsystem.
///
/// An unknown `level` falls back to `info`.
pub fn init_logging(level: &str) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(EnvFilter::try_new(default_directives("loud")).is_err());
    }
}
