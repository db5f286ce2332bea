//! User accounts

mod types;

use log::debug;

use crate::error::Result;
use crate::fetch::{Fetch, HttpClient};
use crate::page::Page;

pub use types::*;

/// Client for the `/users` resource
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: HttpClient,
}

impl UsersClient {
    /// Create a new UsersClient
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List users
    pub async fn list(&self, page: Page) -> Result<UserList> {
        let url = self.http.url(&["users"])?;
        Fetch::get(&self.http, url).page(page).execute().await
    }

    /// Get a user by id
    pub async fn get(&self, id: u64) -> Result<User> {
        let url = self.http.url(&["users", &id.to_string()])?;
        Fetch::get(&self.http, url).execute().await
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        let url = self.http.url(&["users", "username", username])?;
        Fetch::get(&self.http, url).execute().await
    }

    /// Create a user
    pub async fn create(&self, data: &UserCreate) -> Result<User> {
        data.validate()?;
        let url = self.http.url(&["users"])?;
        let user: User = Fetch::post(&self.http, url).json(data)?.execute().await?;
        debug!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Update the supplied fields of a user
    pub async fn update(&self, id: u64, data: &UserUpdate) -> Result<User> {
        let url = self.http.url(&["users", &id.to_string()])?;
        Fetch::put(&self.http, url).json(data)?.execute().await
    }

    /// Delete a user
    pub async fn delete(&self, id: u64) -> Result<()> {
        let url = self.http.url(&["users", &id.to_string()])?;
        Fetch::delete(&self.http, url).execute_empty().await
    }
}
