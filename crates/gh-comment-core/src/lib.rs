// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # gh-comment core
//!
//! Core library for posting idempotent pull request comments from CI.
//!
//! Every comment carries a hidden marker derived from a key. With `update`
//! enabled, later runs find the comment holding the same marker and edit it
//! instead of adding another one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gh_comment_core::{CommentRequest, GitHubCommentApi, create_client, reconcile};
//! use secrecy::SecretString;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = SecretString::from("ghp_xxx".to_string());
//! let client = create_client("https://api.github.com/", &token, None)?;
//! let api = GitHubCommentApi::new(client);
//!
//! let request = CommentRequest::builder()
//!     .owner("octocat".to_string())
//!     .repo("hello".to_string())
//!     .issue_number(42)
//!     .message("Build passed".to_string())
//!     .key("build-status".to_string())
//!     .update(true)
//!     .build();
//!
//! let result = reconcile(&api, &request, &CancellationToken::new()).await?;
//! println!("{} comment {}", result.action, result.comment.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`marker`] - Marker encoding and matching
//! - [`locator`] - Paginated lookup of a keyed comment
//! - [`reconciler`] - Create-or-update decision
//! - [`api`] - Remote API abstraction
//! - [`github`] - Octocrab-backed GitHub implementation
//! - [`config`] - Settings and pipeline metadata
//! - [`setup`] - Input validation and resolution
//! - [`error`] - Error types

// ============================================================================
// Error Handling
// ============================================================================

pub use error::CommentError;

/// Convenience Result type for gh-comment operations.
///
/// This is equivalent to `std::result::Result<T, CommentError>`.
pub type Result<T> = std::result::Result<T, CommentError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{PipelineMetadata, Settings, SettingsOverrides, load_pipeline, load_settings};
pub use setup::{RunPlan, prepare};

// ============================================================================
// Reconciliation
// ============================================================================

pub use api::{CommentApi, CommentPage, CommentRequest, RemoteComment};
pub use locator::find_comment;
pub use reconciler::{Action, Reconciled, reconcile};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{DEFAULT_BASE_URL, GitHubCommentApi, create_client};

// ============================================================================
// Modules
// ============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod locator;
pub mod marker;
pub mod reconciler;
pub mod setup;

#[cfg(test)]
mod testing;
