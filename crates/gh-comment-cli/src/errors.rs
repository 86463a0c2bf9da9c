// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `CommentError` and adds hints pointing at the
//! plugin settings that usually cause each kind of failure.

use anyhow::Error;
use gh_comment_core::CommentError;

/// Formats an error for CLI display with helpful hints.
///
/// Errors that are not a `CommentError` are shown with their full context chain.
pub fn format_error(error: &Error) -> String {
    let Some(comment_err) = error.downcast_ref::<CommentError>() else {
        return format!("{error:#}");
    };

    match comment_err {
        CommentError::Config { .. } => format!(
            "{comment_err}\n\nTip: Check the plugin settings (flags, PLUGIN_* or GITHUB_COMMENT_* variables)."
        ),
        CommentError::UnsupportedEvent { .. } => format!(
            "{comment_err}\n\nTip: Restrict this step to pull request pipelines."
        ),
        CommentError::Transport { source, .. } => format!(
            "{comment_err}: {source:#}\n\nTip: Check that the api-key can access the repository and that base-url points at the GitHub REST API."
        ),
        CommentError::Cancelled { .. } => format!(
            "{comment_err}\n\nTip: Increase --timeout (PLUGIN_TIMEOUT_SECONDS) if the API is slow to respond."
        ),
    }
}
