// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Builds the authenticated octocrab client and adapts it to [`CommentApi`].
//!
//! [`CommentApi`]: crate::api::CommentApi

use std::time::Duration;

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::error::CommentError;

pub mod comments;

pub use comments::GitHubCommentApi;

/// Default GitHub REST API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Creates an authenticated Octocrab client for `base_url`.
///
/// `timeout` bounds connecting to and reading from the API; `None` keeps the
/// transport defaults.
///
/// # Errors
///
/// Returns [`CommentError::Config`] if the base URL is rejected or the client
/// cannot be built.
#[instrument(skip(token))]
pub fn create_client(
    base_url: &str,
    token: &SecretString,
    timeout: Option<Duration>,
) -> Result<Octocrab, CommentError> {
    let client = Octocrab::builder()
        .base_uri(base_url)
        .map_err(|e| CommentError::config(format!("Invalid base URL '{base_url}': {e}")))?
        .personal_token(token.expose_secret().to_string())
        .set_connect_timeout(timeout)
        .set_read_timeout(timeout)
        .build()
        .map_err(|e| CommentError::config(format!("Failed to build GitHub client: {e}")))?;

    debug!("Created authenticated GitHub client");
    Ok(client)
}
