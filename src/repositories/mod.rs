//! Repositories and their star relation

mod types;

use log::debug;

use crate::error::Result;
use crate::fetch::{Fetch, HttpClient};
use crate::page::Page;
use crate::stars::StarsClient;

pub use types::*;

/// Client for the `/repos` resource
#[derive(Debug, Clone)]
pub struct RepositoriesClient {
    http: HttpClient,
}

impl RepositoriesClient {
    /// Create a new RepositoriesClient
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List public repositories
    pub async fn list(&self, page: Page) -> Result<RepositoryList> {
        let url = self.http.url(&["repos"])?;
        Fetch::get(&self.http, url).page(page).execute().await
    }

    /// Get a repository by id
    pub async fn get(&self, id: u64) -> Result<Repository> {
        let url = self.http.url(&["repos", &id.to_string()])?;
        Fetch::get(&self.http, url).execute().await
    }

    /// List repositories owned by a user
    pub async fn list_by_owner(&self, owner_id: u64, page: Page) -> Result<RepositoryList> {
        let url = self.http.url(&["repos", "user", &owner_id.to_string()])?;
        Fetch::get(&self.http, url).page(page).execute().await
    }

    /// Create a repository
    pub async fn create(&self, data: &RepositoryCreate) -> Result<Repository> {
        data.validate()?;
        let url = self.http.url(&["repos"])?;
        let repo: Repository = Fetch::post(&self.http, url).json(data)?.execute().await?;
        debug!("created repository {} ({})", repo.id, repo.name);
        Ok(repo)
    }

    /// Update the supplied fields of a repository
    pub async fn update(&self, id: u64, data: &RepositoryUpdate) -> Result<Repository> {
        let url = self.http.url(&["repos", &id.to_string()])?;
        Fetch::put(&self.http, url).json(data)?.execute().await
    }

    /// Delete a repository
    pub async fn delete(&self, id: u64) -> Result<()> {
        let url = self.http.url(&["repos", &id.to_string()])?;
        Fetch::delete(&self.http, url).execute_empty().await
    }

    /// Star `repo_id` on behalf of `user_id`
    pub async fn star(&self, repo_id: u64, user_id: u64) -> Result<()> {
        self.stars().star(user_id, repo_id).await
    }

    /// Remove the star `user_id` placed on `repo_id`
    pub async fn unstar(&self, repo_id: u64, user_id: u64) -> Result<()> {
        self.stars().unstar(user_id, repo_id).await
    }

    /// Repositories starred by a user
    pub async fn starred_by(&self, user_id: u64, page: Page) -> Result<RepositoryList> {
        self.stars().starred(user_id, page).await
    }

    fn stars(&self) -> StarsClient {
        StarsClient::new(self.http.clone())
    }
}
