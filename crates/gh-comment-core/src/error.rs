// SPDX-License-Identifier: Apache-2.0

//! Error types for gh-comment.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while posting or updating a comment.
#[derive(Error, Debug)]
pub enum CommentError {
    /// Settings are missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The pipeline was not triggered by a pull request.
    #[error("Event not supported: {event} (only pull_request events can be commented on)")]
    UnsupportedEvent {
        /// Pipeline event name as reported by the CI system.
        event: String,
    },

    /// A request to the GitHub API failed.
    #[error("GitHub API error while trying to {operation} on {target}")]
    Transport {
        /// Operation that failed, e.g. `list comments`.
        operation: &'static str,
        /// Target of the operation, e.g. `octocat/hello#42`.
        target: String,
        /// Underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// The deadline elapsed or the run was interrupted.
    #[error("Cancelled while trying to {operation}")]
    Cancelled {
        /// Operation that was in flight.
        operation: &'static str,
    },
}

impl CommentError {
    /// Shorthand for a [`CommentError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        CommentError::Config {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for CommentError {
    fn from(err: config::ConfigError) -> Self {
        CommentError::Config {
            message: err.to_string(),
        }
    }
}
