// SPDX-License-Identifier: Apache-2.0

//! Configuration management for gh-comment.
//!
//! Provides layered settings from an optional file, environment variables and
//! command-line overrides.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command-line flags
//! 2. Plugin settings (prefix: `PLUGIN_`, as exported by Woodpecker)
//! 3. Environment variables (prefix: `GITHUB_COMMENT_`)
//! 4. Config file passed with `--config`
//! 5. Built-in defaults
//!
//! Pipeline metadata is read from the `CI_` variables of the CI system.
//!
//! # Examples
//!
//! ```bash
//! PLUGIN_API_KEY=ghp_xxx PLUGIN_MESSAGE=report.md PLUGIN_UPDATE=true gh-comment
//! ```

use std::path::Path;

use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;

use crate::error::CommentError;
use crate::github::DEFAULT_BASE_URL;

/// Plugin settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Personal access token for the GitHub API.
    pub api_key: Option<String>,
    /// API base URL (GitHub Enterprise instances use `https://host/api/v3/`).
    pub base_url: String,
    /// Unique identifier assigned to the comment (literal or path to a file).
    pub key: Option<String>,
    /// Comment text (literal or path to a file).
    pub message: Option<String>,
    /// Update an existing comment carrying the same key.
    pub update: bool,
    /// Skip commenting if the message file does not exist.
    pub skip_missing: bool,
    /// Deadline for the whole run, in seconds.
    pub timeout_seconds: u64,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            key: None,
            message: None,
            update: false,
            skip_missing: false,
            timeout_seconds: 60,
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("key", &self.key)
            .field("message", &self.message)
            .field("update", &self.update)
            .field("skip_missing", &self.skip_missing)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    /// `--api-key`
    pub api_key: Option<String>,
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--key`
    pub key: Option<String>,
    /// `--message`
    pub message: Option<String>,
    /// `--update`
    pub update: Option<bool>,
    /// `--skip-missing`
    pub skip_missing: Option<bool>,
    /// `--timeout`
    pub timeout_seconds: Option<u64>,
    /// `--log-level`
    pub log_level: Option<String>,
}

/// Metadata describing the pipeline that invoked the plugin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineMetadata {
    /// Event that triggered the pipeline (`CI_PIPELINE_EVENT`).
    pub pipeline_event: String,
    /// Repository owner (`CI_REPO_OWNER`).
    pub repo_owner: String,
    /// Repository name (`CI_REPO_NAME`).
    pub repo_name: String,
    /// Pull request number (`CI_COMMIT_PULL_REQUEST`).
    pub commit_pull_request: Option<u64>,
}

/// Load plugin settings from the process environment.
///
/// # Errors
///
/// Returns `CommentError::Config` if the config file is invalid or a value
/// has the wrong type.
pub fn load_settings(
    config_file: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, CommentError> {
    build_settings(config_file, None, overrides)
}

/// Load pipeline metadata from the process environment.
///
/// # Errors
///
/// Returns `CommentError::Config` if a `CI_` variable has the wrong type.
pub fn load_pipeline() -> Result<PipelineMetadata, CommentError> {
    build_pipeline(None)
}

// Values stay strings so keys like `007` keep their spelling; typed fields
// (`update`, `timeout_seconds`, ...) are converted on deserialization.
fn environment(prefix: &str, source: Option<&Map<String, String>>) -> Environment {
    Environment::with_prefix(prefix)
        .ignore_empty(true)
        .source(source.cloned())
}

pub(crate) fn build_settings(
    config_file: Option<&Path>,
    env: Option<&Map<String, String>>,
    overrides: &SettingsOverrides,
) -> Result<Settings, CommentError> {
    let mut builder = Config::builder();

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let config = builder
        .add_source(environment("GITHUB_COMMENT", env))
        .add_source(environment("PLUGIN", env))
        .set_override_option("api_key", overrides.api_key.clone())?
        .set_override_option("base_url", overrides.base_url.clone())?
        .set_override_option("key", overrides.key.clone())?
        .set_override_option("message", overrides.message.clone())?
        .set_override_option("update", overrides.update)?
        .set_override_option("skip_missing", overrides.skip_missing)?
        .set_override_option("timeout_seconds", overrides.timeout_seconds)?
        .set_override_option("log_level", overrides.log_level.clone())?
        .build()?;

    Ok(config.try_deserialize()?)
}

pub(crate) fn build_pipeline(
    env: Option<&Map<String, String>>,
) -> Result<PipelineMetadata, CommentError> {
    let config = Config::builder()
        .add_source(environment("CI", env))
        .build()?;

    Ok(config.try_deserialize()?)
}
