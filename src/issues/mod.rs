//! Issues filed against repositories

mod types;

use log::debug;

use crate::error::Result;
use crate::fetch::{Fetch, HttpClient};
use crate::page::Page;

pub use types::*;

/// Client for `/repos/{repo}/issues`
#[derive(Debug, Clone)]
pub struct IssuesClient {
    http: HttpClient,
}

impl IssuesClient {
    /// Create a new IssuesClient
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List the issues of a repository, newest first, optionally by status
    pub async fn list(
        &self,
        repo_id: u64,
        status: Option<IssueStatus>,
        page: Page,
    ) -> Result<IssueList> {
        let url = self.collection_url(repo_id)?;
        Fetch::get(&self.http, url)
            .query_opt("status", status)
            .page(page)
            .execute()
            .await
    }

    /// Get an issue by id
    pub async fn get(&self, repo_id: u64, issue_id: u64) -> Result<Issue> {
        let url = self.item_url(repo_id, issue_id)?;
        Fetch::get(&self.http, url).execute().await
    }

    /// File an issue
    pub async fn create(&self, repo_id: u64, data: &IssueCreate) -> Result<Issue> {
        data.validate()?;
        let url = self.collection_url(repo_id)?;
        let issue: Issue = Fetch::post(&self.http, url).json(data)?.execute().await?;
        debug!("created issue #{} on repository {}", issue.id, repo_id);
        Ok(issue)
    }

    /// Update the supplied fields of an issue
    pub async fn update(&self, repo_id: u64, issue_id: u64, data: &IssueUpdate) -> Result<Issue> {
        let url = self.item_url(repo_id, issue_id)?;
        Fetch::put(&self.http, url).json(data)?.execute().await
    }

    /// Delete an issue
    pub async fn delete(&self, repo_id: u64, issue_id: u64) -> Result<()> {
        let url = self.item_url(repo_id, issue_id)?;
        Fetch::delete(&self.http, url).execute_empty().await
    }

    fn collection_url(&self, repo_id: u64) -> Result<url::Url> {
        self.http.url(&["repos", &repo_id.to_string(), "issues"])
    }

    fn item_url(&self, repo_id: u64, issue_id: u64) -> Result<url::Url> {
        self.http.url(&[
            "repos",
            &repo_id.to_string(),
            "issues",
            &issue_id.to_string(),
        ])
    }
}
