//! Free-text search over users and repositories

mod types;

use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpClient};
use crate::page::Page;

pub use types::*;

/// Client for `/search`
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: HttpClient,
}

impl SearchClient {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Search users and/or repositories.
    ///
    /// The backend rejects empty queries, so a blank query fails with
    /// [`Error::Validation`] before any request is made.
    pub async fn search(&self, query: &str, kind: SearchKind, page: Page) -> Result<SearchResults> {
        if query.trim().is_empty() {
            return Err(Error::validation("Search query is required"));
        }
        let url = self.http.url(&["search"])?;
        Fetch::get(&self.http, url)
            .query("q", query)
            .query("type", kind)
            .page(page)
            .execute()
            .await
    }
}
