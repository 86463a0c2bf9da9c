// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for gh-comment.
//!
//! Every flag is optional: in a pipeline the same settings usually arrive as
//! `PLUGIN_*` variables, which the configuration layer picks up.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gh_comment_core::SettingsOverrides;

/// Extended help listing the environment variables that mirror each flag.
const ENVIRONMENT_HELP: &str = r"ENVIRONMENT

  Settings (PLUGIN_* wins over GITHUB_COMMENT_*, flags win over both):
    PLUGIN_API_KEY, PLUGIN_BASE_URL, PLUGIN_KEY, PLUGIN_MESSAGE,
    PLUGIN_UPDATE, PLUGIN_SKIP_MISSING, PLUGIN_TIMEOUT_SECONDS, PLUGIN_LOG_LEVEL

  Pipeline metadata:
    CI_PIPELINE_EVENT, CI_REPO_OWNER, CI_REPO_NAME, CI_COMMIT_PULL_REQUEST

  Logging:
    RUST_LOG overrides --log-level, e.g. RUST_LOG=gh_comment_core=debug
";

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
}

/// Global output configuration passed to commands.
#[derive(Clone, Copy)]
pub struct OutputContext {
    /// Output format (text, json, yaml)
    pub format: OutputFormat,
}

/// gh-comment - Add comments to GitHub pull requests from CI.
///
/// Posts the message as a new comment, or with --update edits the comment
/// previously posted with the same key.
#[derive(Parser)]
#[command(name = "gh-comment")]
#[command(version, about, long_about = None, after_help = ENVIRONMENT_HELP)]
pub struct Cli {
    /// Output format (text, json, yaml)
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// TOML file with settings (lowest priority after built-in defaults)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Personal access token to access the GitHub API
    #[arg(long, value_name = "TOKEN")]
    pub api_key: Option<String>,

    /// API URL [default: https://api.github.com/]
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Unique identifier to assign to a comment (string or path to a file)
    #[arg(long)]
    pub key: Option<String>,

    /// Path to file or string that contains the comment text
    #[arg(long)]
    pub message: Option<String>,

    /// Enable update of an existing comment that matches the key
    #[arg(long)]
    pub update: bool,

    /// Skip comment creation if the given message file does not exist
    #[arg(long)]
    pub skip_missing: bool,

    /// Abort if the run takes longer than this many seconds (0 disables)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Settings given on the command line, taking precedence over the environment.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            key: self.key.clone(),
            message: self.message.clone(),
            update: self.update.then_some(true),
            skip_missing: self.skip_missing.then_some(true),
            timeout_seconds: self.timeout,
            log_level: self.log_level.clone(),
        }
    }
}
