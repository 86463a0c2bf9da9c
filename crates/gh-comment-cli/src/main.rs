// SPDX-License-Identifier: Apache-2.0

//! gh-comment - Add comments to GitHub pull requests from CI.
//!
//! A pipeline step that posts a message to the pull request under test and,
//! with `--update`, keeps editing the same comment on every run.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gh_comment_core::{load_pipeline, load_settings, prepare};
use tracing::debug;

use crate::cli::{Cli, OutputContext};

async fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref(), &cli.overrides());
    logging::init_logging(
        settings
            .as_ref()
            .map_or("info", |settings| settings.log_level.as_str()),
    );
    let settings = settings?;
    debug!(?settings, "Settings loaded");

    let pipeline = load_pipeline()?;
    debug!(?pipeline, "Pipeline metadata loaded");

    let plan = prepare(&settings, &pipeline)?;

    let timeout = Duration::from_secs(settings.timeout_seconds);
    let cancel = commands::cancel_on_deadline(timeout);
    let result = commands::run(plan, timeout, &cancel).await;
    cancel.cancel();

    let output_ctx = OutputContext { format: cli.output };
    output::render(&result?, &output_ctx)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match execute(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            Err(e)
        }
    }
}
