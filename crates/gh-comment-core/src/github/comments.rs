// SPDX-License-Identifier: Apache-2.0

//! Issue comment endpoints backed by octocrab.

use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::{CommentApi, CommentPage, RemoteComment};

/// Comments fetched per list request (GitHub maximum).
const PER_PAGE: u8 = 100;

/// Subset of the GitHub issue comment payload that reconciliation needs.
#[derive(Debug, Deserialize)]
struct CommentPayload {
    id: u64,
    body: Option<String>,
    html_url: Option<String>,
}

impl From<CommentPayload> for RemoteComment {
    fn from(payload: CommentPayload) -> Self {
        RemoteComment {
            id: payload.id,
            body: payload.body.unwrap_or_default(),
            html_url: payload.html_url,
        }
    }
}

#[derive(Serialize)]
struct ListParams {
    page: u32,
    per_page: u8,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// [`CommentApi`] implementation for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubCommentApi {
    client: Octocrab,
}

impl GitHubCommentApi {
    /// Wraps an authenticated client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

/// Extracts the `page` query parameter from a pagination link.
fn page_number(uri: &http::Uri) -> Option<u32> {
    uri.query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|page| *page > 0)
}

#[async_trait]
impl CommentApi for GitHubCommentApi {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = issue_number))]
    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        page: u32,
    ) -> Result<CommentPage> {
        let route = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
        let params = ListParams {
            page,
            per_page: PER_PAGE,
        };

        let response: Page<CommentPayload> = self
            .client
            .get(&route, Some(&params))
            .await
            .with_context(|| format!("Failed to list comments on issue #{issue_number}"))?;

        let next_page = response.next.as_ref().and_then(page_number);
        debug!(count = response.items.len(), next_page = ?next_page, "Listed comments");

        Ok(CommentPage {
            comments: response.items.into_iter().map(Into::into).collect(),
            next_page,
        })
    }

    #[instrument(skip(self, body), fields(owner = %owner, repo = %repo, number = issue_number))]
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<RemoteComment> {
        debug!("Posting comment");

        let route = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
        let comment: CommentPayload = self
            .client
            .post(&route, Some(&CommentBody { body }))
            .await
            .with_context(|| format!("Failed to post comment to issue #{issue_number}"))?;

        debug!(id = comment.id, "Comment posted successfully");
        Ok(comment.into())
    }

    #[instrument(skip(self, body), fields(owner = %owner, repo = %repo, comment_id = comment_id))]
    async fn edit_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<RemoteComment> {
        debug!("Editing comment");

        let route = format!("/repos/{owner}/{repo}/issues/comments/{comment_id}");
        let comment: CommentPayload = self
            .client
            .patch(&route, Some(&CommentBody { body }))
            .await
            .with_context(|| format!("Failed to edit comment {comment_id}"))?;

        debug!(id = comment.id, "Comment edited successfully");
        Ok(comment.into())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::github::create_client;

    fn api_for(server: &MockServer) -> GitHubCommentApi {
        let token = SecretString::from("test-token".to_string());
        let client = create_client(&format!("{}/", server.uri()), &token, None).unwrap();
        GitHubCommentApi::new(client)
    }

    fn comment_json(id: u64, body: &str) -> serde_json::Value {
        json!({
            "id": id,
            "node_id": "IC_kwDOA",
            "body": body,
            "html_url": format!("https://github.com/octocat/hello/pull/1#issuecomment-{id}"),
            "user": {"login": "ci-bot", "id": 1},
            "created_at": "2024-01-15T10:30:00Z"
        })
    }

    #[test]
    fn test_page_number_from_link() {
        let uri: http::Uri = "https://api.github.com/repositories/1/issues/1/comments?per_page=100&page=3"
            .parse()
            .unwrap();
        assert_eq!(page_number(&uri), Some(3));

        let uri: http::Uri = "https://api.github.com/x?per_page=100".parse().unwrap();
        assert_eq!(page_number(&uri), None);
    }

    #[tokio::test]
    async fn test_list_comments_follows_link_header() {
        let server = MockServer::start().await;
        let next = format!(
            "<{}/repos/octocat/hello/issues/1/comments?page=2&per_page=100>; rel=\"next\"",
            server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/1/comments"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", next.as_str())
                    .set_body_json(json!([comment_json(11, "first"), comment_json(12, "second")])),
            )
            .mount(&server)
            .await;

        let page = api_for(&server)
            .list_comments("octocat", "hello", 1, 1)
            .await
            .unwrap();

        assert_eq!(page.next_page, Some(2));
        let ids: Vec<u64> = page.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(page.comments[0].body, "first");
    }

    #[tokio::test]
    async fn test_list_comments_last_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues/1/comments"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 13, "body": null}])),
            )
            .mount(&server)
            .await;

        let page = api_for(&server)
            .list_comments("octocat", "hello", 1, 2)
            .await
            .unwrap();

        assert_eq!(page.next_page, None);
        assert_eq!(page.comments[0].body, "");
    }

    #[tokio::test]
    async fn test_create_comment_posts_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues/1/comments"))
            .and(body_json(json!({"body": "hi\n<!-- id: k -->\n"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(comment_json(21, "hi\n<!-- id: k -->\n")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let comment = api_for(&server)
            .create_comment("octocat", "hello", 1, "hi\n<!-- id: k -->\n")
            .await
            .unwrap();

        assert_eq!(comment.id, 21);
        assert!(comment.html_url.unwrap().ends_with("issuecomment-21"));
    }

    #[tokio::test]
    async fn test_edit_comment_patches_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/repos/octocat/hello/issues/comments/77"))
            .and(body_json(json!({"body": "new"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(77, "new")))
            .expect(1)
            .mount(&server)
            .await;

        let comment = api_for(&server)
            .edit_comment("octocat", "hello", 77, "new")
            .await
            .unwrap();

        assert_eq!(comment.id, 77);
        assert_eq!(comment.body, "new");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues/1/comments"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "internal server error",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .create_comment("octocat", "hello", 1, "x")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to post comment to issue #1"));
    }
}
