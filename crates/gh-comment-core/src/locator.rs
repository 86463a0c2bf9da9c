// SPDX-License-Identifier: Apache-2.0

//! Finds a previously posted comment by its marker.

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::api::{CommentApi, RemoteComment, call, issue_target};
use crate::error::CommentError;
use crate::marker;

/// Returns the first comment on the issue whose body carries the marker for `key`.
///
/// All pages are fetched before scanning so the match is always the earliest
/// one in API order. `Ok(None)` means no comment carries the marker.
///
/// # Errors
///
/// Returns [`CommentError::Transport`] if any page fails to load; pages fetched
/// before the failure are discarded. Returns [`CommentError::Cancelled`] if
/// `cancel` fires mid-scan.
#[instrument(skip(api, cancel), fields(owner = %owner, repo = %repo, number = issue_number))]
pub async fn find_comment(
    api: &dyn CommentApi,
    owner: &str,
    repo: &str,
    issue_number: u64,
    key: &str,
    cancel: &CancellationToken,
) -> Result<Option<RemoteComment>, CommentError> {
    let target = issue_target(owner, repo, issue_number);
    let mut comments = Vec::new();
    let mut page = 1;

    loop {
        let fetched = call(
            cancel,
            "list comments",
            &target,
            api.list_comments(owner, repo, issue_number, page),
        )
        .await?;

        debug!(
            page,
            count = fetched.comments.len(),
            next_page = ?fetched.next_page,
            "Fetched comment page"
        );
        comments.extend(fetched.comments);

        match fetched.next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }

    let found = comments
        .into_iter()
        .find(|comment| marker::matches(&comment.body, key));

    match &found {
        Some(comment) => debug!(id = comment.id, "Found comment with matching marker"),
        None => debug!("No comment with matching marker"),
    }

    Ok(found)
}
