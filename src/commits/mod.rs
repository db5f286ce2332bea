//! Commits. Created once, never updated or deleted.

mod types;

use crate::error::Result;
use crate::fetch::{Fetch, HttpClient};
use crate::page::Page;

pub use types::*;

/// Client for `/repos/{repo}/commits`
#[derive(Debug, Clone)]
pub struct CommitsClient {
    http: HttpClient,
}

impl CommitsClient {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List the commits of a repository
    pub async fn list(&self, repo_id: u64, page: Page) -> Result<CommitList> {
        let url = self.http.url(&["repos", &repo_id.to_string(), "commits"])?;
        Fetch::get(&self.http, url).page(page).execute().await
    }

    /// Get a commit by id
    pub async fn get(&self, repo_id: u64, commit_id: u64) -> Result<Commit> {
        let url = self.http.url(&[
            "repos",
            &repo_id.to_string(),
            "commits",
            &commit_id.to_string(),
        ])?;
        Fetch::get(&self.http, url).execute().await
    }

    /// Record a commit
    pub async fn create(&self, repo_id: u64, data: &CommitCreate) -> Result<Commit> {
        data.validate()?;
        let url = self.http.url(&["repos", &repo_id.to_string(), "commits"])?;
        Fetch::post(&self.http, url).json(data)?.execute().await
    }
}
