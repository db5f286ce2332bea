//! The many-to-many star relation between users and repositories
//!
//! Whether starring twice or unstarring an unstarred repository is a no-op or
//! an error is decided by the backend. Nothing here deduplicates.
//!
//! The backend mounts star and unstar under `/repos/{repo}/star` and the starred
//! listing under `/repos/user/{user}/starred`. The membership check and the
//! count are derived from those and from the repository record.

use crate::error::Result;
use crate::fetch::{Fetch, HttpClient};
use crate::page::{Page, DEFAULT_LIMIT};
use crate::repositories::{Repository, RepositoryList};

/// Client for the star endpoints of `/repos`
#[derive(Debug, Clone)]
pub struct StarsClient {
    http: HttpClient,
}

impl StarsClient {
    /// Create a new StarsClient
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Star a repository
    pub async fn star(&self, user_id: u64, repo_id: u64) -> Result<()> {
        let url = self.star_url(repo_id)?;
        Fetch::post(&self.http, url)
            .query("user_id", user_id)
            .execute_empty()
            .await
    }

    /// Unstar a repository
    pub async fn unstar(&self, user_id: u64, repo_id: u64) -> Result<()> {
        let url = self.star_url(repo_id)?;
        Fetch::delete(&self.http, url)
            .query("user_id", user_id)
            .execute_empty()
            .await
    }

    /// One page of the repositories a user has starred
    pub async fn starred(&self, user_id: u64, page: Page) -> Result<RepositoryList> {
        let url = self
            .http
            .url(&["repos", "user", &user_id.to_string(), "starred"])?;
        Fetch::get(&self.http, url).page(page).execute().await
    }

    /// Whether `user_id` currently stars `repo_id`.
    ///
    /// Walks the user's starred listing page by page until the repository
    /// shows up or the listing runs out.
    pub async fn is_starred(&self, user_id: u64, repo_id: u64) -> Result<bool> {
        let mut page = Page::first(DEFAULT_LIMIT);
        loop {
            let list = self.starred(user_id, page).await?;
            if list.repositories.iter().any(|repo| repo.id == repo_id) {
                return Ok(true);
            }
            let seen = u64::from(page.skip) + list.repositories.len() as u64;
            if list.repositories.is_empty() || seen >= list.total {
                return Ok(false);
            }
            page = page.next();
        }
    }

    /// Number of stars on a repository, as reported on the repository record
    pub async fn count(&self, repo_id: u64) -> Result<u64> {
        let url = self.http.url(&["repos", &repo_id.to_string()])?;
        let repo: Repository = Fetch::get(&self.http, url).execute().await?;
        Ok(repo.stars_count)
    }

    fn star_url(&self, repo_id: u64) -> Result<url::Url> {
        self.http.url(&["repos", &repo_id.to_string(), "star"])
    }
}
