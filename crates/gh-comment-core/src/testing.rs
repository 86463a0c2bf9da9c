// SPDX-License-Identifier: Apache-2.0

//! In-memory [`CommentApi`] double that records every call.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::api::{CommentApi, CommentPage, RemoteComment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List { page: u32 },
    Create { issue_number: u64, body: String },
    Edit { comment_id: u64, body: String },
}

#[derive(Default)]
pub(crate) struct FakeApi {
    pages: Vec<Vec<RemoteComment>>,
    fail_on_page: Option<u32>,
    fail_writes: bool,
    cancel_on_page: Option<(u32, CancellationToken)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub(crate) fn with_pages(pages: Vec<Vec<RemoteComment>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub(crate) fn failing_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Cancels `cancel` while serving `page`, after the page itself succeeds.
    pub(crate) fn cancelling_on_page(mut self, page: u32, cancel: &CancellationToken) -> Self {
        self.cancel_on_page = Some((page, cancel.clone()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List { .. }))
            .count()
    }

    pub(crate) fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn comment(id: u64, body: &str) -> RemoteComment {
    RemoteComment {
        id,
        body: body.to_string(),
        html_url: None,
    }
}

#[async_trait]
impl CommentApi for FakeApi {
    async fn list_comments(
        &self,
        _owner: &str,
        _repo: &str,
        _issue_number: u64,
        page: u32,
    ) -> Result<CommentPage> {
        self.record(Call::List { page });
        if self.fail_on_page == Some(page) {
            anyhow::bail!("502 Bad Gateway");
        }
        if let Some((_, cancel)) = self.cancel_on_page.as_ref().filter(|(p, _)| *p == page) {
            cancel.cancel();
        }

        let index = usize::try_from(page).unwrap() - 1;
        let comments = self.pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < self.pages.len()).then_some(page + 1);
        Ok(CommentPage {
            comments,
            next_page,
        })
    }

    async fn create_comment(
        &self,
        _owner: &str,
        _repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<RemoteComment> {
        self.record(Call::Create {
            issue_number,
            body: body.to_string(),
        });
        if self.fail_writes {
            anyhow::bail!("500 Internal Server Error");
        }
        Ok(comment(999, body))
    }

    async fn edit_comment(
        &self,
        _owner: &str,
        _repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<RemoteComment> {
        self.record(Call::Edit {
            comment_id,
            body: body.to_string(),
        });
        if self.fail_writes {
            anyhow::bail!("500 Internal Server Error");
        }
        Ok(comment(comment_id, body))
    }
}
