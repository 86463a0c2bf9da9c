// SPDX-License-Identifier: Apache-2.0

//! Runs one validated plan against the GitHub API.

use std::time::Duration;

use anyhow::Result;
use gh_comment_core::{GitHubCommentApi, RunPlan, create_client, reconcile};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::output::CommentResult;

/// Returns a token cancelled on ctrl-c or, unless `timeout` is zero, once it elapses.
pub fn cancel_on_deadline(timeout: Duration) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        let deadline = async {
            if timeout.is_zero() {
                std::future::pending().await
            } else {
                tokio::time::sleep(timeout).await;
            }
        };

        tokio::select! {
            () = trigger.cancelled() => return,
            () = deadline => warn!(timeout_seconds = timeout.as_secs(), "Deadline elapsed, cancelling"),
            Ok(()) = tokio::signal::ctrl_c() => warn!("Interrupted, cancelling"),
        }
        trigger.cancel();
    });

    cancel
}

/// Creates or updates the comment described by `plan`.
pub async fn run(
    plan: RunPlan,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<CommentResult> {
    let target = plan.request.target();

    if let Some(reason) = plan.skip_reason {
        info!(target = %target, "Comment skipped: {reason}");
        return Ok(CommentResult::Skipped {
            target,
            reason: reason.to_string(),
        });
    }

    let timeout = (!timeout.is_zero()).then_some(timeout);
    let client = create_client(&plan.base_url, &plan.token, timeout)?;
    let api = GitHubCommentApi::new(client);
    debug!(base_url = %plan.base_url, "Using GitHub API");

    let result = reconcile(&api, &plan.request, cancel).await?;

    Ok(CommentResult::Posted {
        target,
        key: plan.request.key,
        result,
    })
}
