// SPDX-License-Identifier: Apache-2.0

//! Output rendering for the CLI.
//!
//! Supports text, JSON, and YAML formats. The command returns data; this
//! module handles presentation on stdout.

use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;
use gh_comment_core::{Action, Reconciled};
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;
}

/// Generic render function - handles JSON/YAML via serde, delegates text to trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_saphyr::to_string(result).context("Failed to serialize to YAML")?;
            println!("{yaml}");
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Result of one plugin run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentResult {
    /// A comment was created or updated.
    Posted {
        /// `owner/repo#number`
        target: String,
        /// Key embedded in the marker.
        key: String,
        /// Write performed and resulting comment.
        #[serde(flatten)]
        result: Reconciled,
    },
    /// The run was skipped before contacting the API.
    Skipped {
        /// `owner/repo#number`
        target: String,
        /// Why nothing was posted.
        reason: String,
    },
}

impl Renderable for CommentResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        match self {
            CommentResult::Posted { target, result, .. } => {
                let heading = match result.action {
                    Action::Created => "Comment Created",
                    Action::Updated => "Comment Updated",
                };
                writeln!(w, "{}", style(heading).green().bold())?;
                writeln!(w, "  Target: {}", style(target).cyan())?;
                writeln!(w, "  Comment: {}", style(result.comment.id).cyan())?;
                if let Some(url) = &result.comment.html_url {
                    writeln!(w, "  URL: {}", style(url).cyan().underlined())?;
                }
            }
            CommentResult::Skipped { target, reason } => {
                writeln!(w, "{}", style("Comment Skipped").yellow().bold())?;
                writeln!(w, "  Target: {}", style(target).cyan())?;
                writeln!(w, "  Reason: {reason}")?;
            }
        }
        Ok(())
    }
}
