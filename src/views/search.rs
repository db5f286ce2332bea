use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::page::{Page, DEFAULT_SEARCH_LIMIT};
use crate::search::{SearchKind, SearchResults};
use crate::Codehub;

use super::{Slot, View, ViewState};

/// Results together with the criteria that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub kind: SearchKind,
    pub results: SearchResults,
}

/// Search page
pub struct SearchView {
    codehub: Codehub,
    page: Page,
    criteria: RwLock<Option<(String, SearchKind)>>,
    outcome: Slot<SearchOutcome>,
}

impl SearchView {
    pub fn new(codehub: Codehub) -> Self {
        Self {
            codehub,
            page: Page::first(DEFAULT_SEARCH_LIMIT),
            criteria: RwLock::new(None),
            outcome: Slot::new("search"),
        }
    }

    /// Submit a search. Blank queries are ignored: no request is made and the
    /// current state is kept. Returns whether a search was started.
    pub async fn search(&self, query: &str, kind: SearchKind) -> bool {
        let query = query.trim();
        if query.is_empty() {
            debug!("search: blank query ignored");
            return false;
        }
        *self.criteria.write().await = Some((query.to_string(), kind));
        self.run(query.to_string(), kind).await;
        true
    }

    async fn run(&self, query: String, kind: SearchKind) {
        let ticket = self.outcome.begin().await;
        let result = self
            .codehub
            .search()
            .search(&query, kind, self.page)
            .await
            .map(|results| SearchOutcome {
                query,
                kind,
                results,
            });
        self.outcome.settle(ticket, result).await;
    }
}

#[async_trait]
impl View for SearchView {
    type Snapshot = SearchOutcome;

    /// Repeat the most recent search, if there was one
    async fn load(&self) {
        let criteria = self.criteria.read().await.clone();
        if let Some((query, kind)) = criteria {
            self.run(query, kind).await;
        }
    }

    async fn snapshot(&self) -> ViewState<SearchOutcome> {
        self.outcome.snapshot().await
    }

    fn unmount(&self) {
        self.outcome.unmount();
    }
}
