// SPDX-License-Identifier: Apache-2.0

//! Remote comment API abstraction.
//!
//! The reconciler only needs three capabilities from the hosting platform:
//! listing the comments of an issue page by page, creating a comment, and
//! editing a comment. [`CommentApi`] captures exactly those so tests can
//! substitute an in-memory double for the GitHub client.

use std::future::Future;

use anyhow::Result;
use async_trait::async_trait;
use bon::Builder;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::CommentError;

/// Everything needed to reconcile one comment.
#[derive(Debug, Clone, Builder)]
pub struct CommentRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request (or issue) number.
    pub issue_number: u64,
    /// Comment text without the marker.
    pub message: String,
    /// Idempotency key for the marker.
    pub key: String,
    /// Edit a previous comment carrying the same key instead of always creating one.
    #[builder(default)]
    pub update: bool,
}

impl CommentRequest {
    /// Human-readable target used in logs and errors (`owner/repo#number`).
    #[must_use]
    pub fn target(&self) -> String {
        issue_target(&self.owner, &self.repo, self.issue_number)
    }
}

/// A comment as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteComment {
    /// Remote comment identifier.
    pub id: u64,
    /// Comment body (empty if the API returned none).
    pub body: String,
    /// Link to the comment in the web UI, if known.
    pub html_url: Option<String>,
}

/// One page of an issue's comment list.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    /// Comments in the order returned by the API.
    pub comments: Vec<RemoteComment>,
    /// Page number to request next, `None` on the last page.
    pub next_page: Option<u32>,
}

/// Capabilities required from the hosting platform.
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Fetches one page (1-based) of the comments on an issue.
    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        page: u32,
    ) -> Result<CommentPage>;

    /// Creates a comment on an issue.
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<RemoteComment>;

    /// Replaces the body of an existing comment.
    async fn edit_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<RemoteComment>;
}

pub(crate) fn issue_target(owner: &str, repo: &str, number: u64) -> String {
    format!("{owner}/{repo}#{number}")
}

/// Runs a remote call, dropping it as soon as `cancel` fires.
///
/// Failures are wrapped as [`CommentError::Transport`] tagged with `operation`
/// and `target`.
pub(crate) async fn call<T, F>(
    cancel: &CancellationToken,
    operation: &'static str,
    target: &str,
    fut: F,
) -> Result<T, CommentError>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CommentError::Cancelled { operation }),
        result = fut => result.map_err(|source| CommentError::Transport {
            operation,
            target: target.to_string(),
            source,
        }),
    }
}
