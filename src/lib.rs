//! Codehub Rust Client Library
//!
//! A typed client for the Codehub source-hosting API (repositories, commits,
//! issues, users, stars, search), plus the view-state containers that drive a
//! front-end from it.

pub mod commits;
pub mod config;
pub mod error;
pub mod fetch;
pub mod issues;
pub mod page;
pub mod render;
pub mod repositories;
pub mod search;
pub mod stars;
pub mod time;
pub mod users;
pub mod views;

use crate::commits::CommitsClient;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::issues::IssuesClient;
use crate::page::Page;
use crate::repositories::RepositoriesClient;
use crate::search::SearchClient;
use crate::stars::StarsClient;
use crate::users::UsersClient;

/// The main entry point for the Codehub client
///
/// Cloning is cheap: clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Codehub {
    http: HttpClient,
    options: ClientOptions,
}

impl Codehub {
    /// Create a new client for the backend at `api_url`
    ///
    /// # Example
    ///
    /// ```
    /// use codehub::Codehub;
    ///
    /// let codehub = Codehub::new("http://localhost:8000").unwrap();
    /// ```
    pub fn new(api_url: &str) -> Result<Self> {
        Self::new_with_options(ClientOptions::default().with_api_url(api_url))
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use codehub::{Codehub, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_api_url("http://localhost:8000")
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let codehub = Codehub::new_with_options(options).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        let http = HttpClient::from_options(&options)?;
        Ok(Self { http, options })
    }

    /// Create a client from `CODEHUB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// Options the client was built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// First page at the configured page size
    pub fn default_page(&self) -> Page {
        Page::first(self.options.page_size)
    }

    /// Client for user accounts
    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.http.clone())
    }

    /// Client for repositories
    pub fn repositories(&self) -> RepositoriesClient {
        RepositoriesClient::new(self.http.clone())
    }

    /// Client for commits
    pub fn commits(&self) -> CommitsClient {
        CommitsClient::new(self.http.clone())
    }

    /// Client for issues
    pub fn issues(&self) -> IssuesClient {
        IssuesClient::new(self.http.clone())
    }

    /// Client for the star relation
    pub fn stars(&self) -> StarsClient {
        StarsClient::new(self.http.clone())
    }

    /// Client for search
    pub fn search(&self) -> SearchClient {
        SearchClient::new(self.http.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::page::Page;
    pub use crate::views::{View, ViewState};
    pub use crate::Codehub;
}
