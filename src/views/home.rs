use async_trait::async_trait;

use crate::page::Page;
use crate::repositories::RepositoryList;
use crate::Codehub;

use super::{Slot, View, ViewState};

/// Number of repositories shown on the landing page
pub const HOME_PAGE_SIZE: u32 = 20;

/// Landing page: the public repository listing
pub struct HomeView {
    codehub: Codehub,
    page: Page,
    repositories: Slot<RepositoryList>,
}

impl HomeView {
    pub fn new(codehub: Codehub) -> Self {
        Self {
            codehub,
            page: Page::first(HOME_PAGE_SIZE),
            repositories: Slot::new("home"),
        }
    }

    /// Show a different window of the listing
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn page(&self) -> Page {
        self.page
    }
}

#[async_trait]
impl View for HomeView {
    type Snapshot = RepositoryList;

    async fn load(&self) {
        let ticket = self.repositories.begin().await;
        let result = self.codehub.repositories().list(self.page).await;
        self.repositories.settle(ticket, result).await;
    }

    async fn snapshot(&self) -> ViewState<RepositoryList> {
        self.repositories.snapshot().await
    }

    fn unmount(&self) {
        self.repositories.unmount();
    }
}
