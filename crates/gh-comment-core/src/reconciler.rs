// SPDX-License-Identifier: Apache-2.0

//! Create-or-update decision for a keyed comment.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::api::{CommentApi, CommentRequest, RemoteComment, call, issue_target};
use crate::error::CommentError;
use crate::locator::find_comment;
use crate::marker;

/// Write performed by [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A new comment was posted.
    Created,
    /// An existing comment carrying the key was edited.
    Updated,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Created => write!(f, "created"),
            Action::Updated => write!(f, "updated"),
        }
    }
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciled {
    /// Which write was issued.
    pub action: Action,
    /// The comment as returned by the API after the write.
    pub comment: RemoteComment,
}

impl Reconciled {
    /// Final body of the comment.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.comment.body
    }
}

/// Posts `request.message` tagged with `request.key`, editing the previous
/// comment with the same key when `request.update` is set.
///
/// Issues exactly one write. When updating, the whole comment list is scanned
/// first; a failed scan aborts without writing so an unreliable search never
/// produces a duplicate comment.
///
/// # Errors
///
/// Returns [`CommentError::Transport`] if listing, creating or editing fails,
/// and [`CommentError::Cancelled`] if `cancel` fires first.
#[instrument(skip_all, fields(target = %request.target(), update = request.update))]
pub async fn reconcile(
    api: &dyn CommentApi,
    request: &CommentRequest,
    cancel: &CancellationToken,
) -> Result<Reconciled, CommentError> {
    let body = marker::encode(&request.message, &request.key);

    let existing = if request.update {
        find_comment(
            api,
            &request.owner,
            &request.repo,
            request.issue_number,
            &request.key,
            cancel,
        )
        .await?
    } else {
        None
    };

    if let Some(existing) = existing {
        let target = format!(
            "{}/{} comment {}",
            request.owner, request.repo, existing.id
        );
        let comment = call(
            cancel,
            "edit comment",
            &target,
            api.edit_comment(&request.owner, &request.repo, existing.id, &body),
        )
        .await?;

        info!(id = comment.id, "Updated existing comment");
        return Ok(Reconciled {
            action: Action::Updated,
            comment,
        });
    }

    let target = issue_target(&request.owner, &request.repo, request.issue_number);
    let comment = call(
        cancel,
        "create comment",
        &target,
        api.create_comment(&request.owner, &request.repo, request.issue_number, &body),
    )
    .await?;

    info!(id = comment.id, "Created comment");
    Ok(Reconciled {
        action: Action::Created,
        comment,
    })
}
