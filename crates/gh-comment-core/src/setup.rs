// SPDX-License-Identifier: Apache-2.0

//! Turns settings and pipeline metadata into a validated [`RunPlan`].

use std::io::ErrorKind;
use std::path::Path;

use secrecy::SecretString;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::api::CommentRequest;
use crate::config::{PipelineMetadata, Settings};
use crate::error::CommentError;

/// The only pipeline event that has a pull request to comment on.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Inputs longer than this are never treated as file paths.
const MAX_PATH_LEN: usize = 255;

/// Text resolved from a setting that may name a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    /// Literal input or file contents.
    pub text: String,
    /// Whether the input named an existing file.
    pub from_file: bool,
}

/// A validated run, ready for reconciliation.
#[derive(Debug)]
pub struct RunPlan {
    /// Comment to reconcile.
    pub request: CommentRequest,
    /// Normalized API base URL (ends with exactly one `/`).
    pub base_url: String,
    /// API token.
    pub token: SecretString,
    /// Set when the run must not touch the API.
    pub skip_reason: Option<&'static str>,
}

/// Reads `input` as a file if it names one, otherwise returns it verbatim.
///
/// # Errors
///
/// Returns an error if `input` names a file that cannot be read.
pub fn read_string_or_file(input: &str) -> std::io::Result<ResolvedText> {
    let literal = || ResolvedText {
        text: input.to_string(),
        from_file: false,
    };

    if input.is_empty() || input.len() > MAX_PATH_LEN {
        return Ok(literal());
    }

    match std::fs::metadata(Path::new(input)) {
        Ok(_) => {}
        // Anything that cannot name a file here is plain text.
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::NotFound
                    | ErrorKind::NotADirectory
                    | ErrorKind::InvalidInput
                    | ErrorKind::InvalidFilename
            ) =>
        {
            return Ok(literal());
        }
        Err(e) => return Err(e),
    }

    let text = std::fs::read_to_string(input)?;
    Ok(ResolvedText {
        text,
        from_file: true,
    })
}

/// Derives a stable key for an issue: hex SHA-256 of `owner/repo/number`.
#[must_use]
pub fn default_key(owner: &str, repo: &str, number: u64) -> String {
    let digest = Sha256::digest(format!("{owner}/{repo}/{number}").as_bytes());
    hex::encode(digest)
}

/// Ensures `base_url` ends with exactly one `/` and is an absolute URL.
///
/// # Errors
///
/// Returns [`CommentError::Config`] if the URL has no scheme or host.
pub fn normalize_base_url(base_url: &str) -> Result<String, CommentError> {
    let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));

    let uri: http::Uri = normalized
        .parse()
        .map_err(|e| CommentError::config(format!("Failed to parse base URL '{base_url}': {e}")))?;

    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(CommentError::config(format!(
            "Failed to parse base URL '{base_url}': expected an absolute URL such as {}",
            crate::github::DEFAULT_BASE_URL
        )));
    }

    Ok(normalized)
}

/// Validates settings against the pipeline and resolves message, key and URL.
///
/// # Errors
///
/// Returns [`CommentError::UnsupportedEvent`] outside pull request pipelines
/// and [`CommentError::Config`] for missing or unreadable inputs.
#[instrument(skip_all, fields(event = %pipeline.pipeline_event))]
pub fn prepare(settings: &Settings, pipeline: &PipelineMetadata) -> Result<RunPlan, CommentError> {
    if pipeline.pipeline_event != PULL_REQUEST_EVENT {
        return Err(CommentError::UnsupportedEvent {
            event: pipeline.pipeline_event.clone(),
        });
    }

    let token = settings
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| CommentError::config("api-key is required"))?;

    let message_input = settings
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| CommentError::config("message is required"))?;
    let message = read_string_or_file(message_input).map_err(|e| {
        CommentError::config(format!("Error while reading {message_input}: {e}"))
    })?;
    debug!(from_file = message.from_file, "Resolved message");

    let base_url = normalize_base_url(&settings.base_url)?;

    if pipeline.repo_owner.is_empty() || pipeline.repo_name.is_empty() {
        return Err(CommentError::config(
            "repository owner and name are required (CI_REPO_OWNER, CI_REPO_NAME)",
        ));
    }
    let number = pipeline
        .commit_pull_request
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            CommentError::config("pull request number is required (CI_COMMIT_PULL_REQUEST)")
        })?;

    let key_input = match settings.key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => default_key(&pipeline.repo_owner, &pipeline.repo_name, number),
    };
    let key = read_string_or_file(&key_input)
        .map_err(|e| CommentError::config(format!("Error while reading {key_input}: {e}")))?;

    let skip_reason = (settings.skip_missing && !message.from_file).then_some(
        "'message' is not a valid path or file does not exist while 'skip-missing' is enabled",
    );

    let request = CommentRequest::builder()
        .owner(pipeline.repo_owner.clone())
        .repo(pipeline.repo_name.clone())
        .issue_number(number)
        .message(message.text)
        .key(key.text)
        .update(settings.update)
        .build();

    Ok(RunPlan {
        request,
        base_url,
        token: SecretString::from(token.to_string()),
        skip_reason,
    })
}
