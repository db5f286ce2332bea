use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::repositories::Repository;
use crate::users::{User, UserUpdate};
use crate::Codehub;

use super::{Alert, Slot, View, ViewState};

/// A user together with the repositories they own and star
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user: User,
    pub repositories: Vec<Repository>,
    pub repositories_total: u64,
    pub starred: Vec<Repository>,
    pub starred_total: u64,
}

/// Profile page, looked up by username
pub struct ProfileView {
    codehub: Codehub,
    username: RwLock<String>,
    profile: Slot<Profile>,
    last_error: Alert,
}

impl ProfileView {
    pub fn new(codehub: Codehub, username: &str) -> Self {
        Self {
            codehub,
            username: RwLock::new(username.to_string()),
            profile: Slot::new("profile"),
            last_error: Alert::default(),
        }
    }

    pub async fn username(&self) -> String {
        self.username.read().await.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.get().await
    }

    async fn fetch(&self) -> Result<Profile> {
        let username = self.username().await;
        let user = self.codehub.users().get_by_username(&username).await?;

        let page = self.codehub.default_page();
        let repositories = self.codehub.repositories();
        let (owned, starred) = tokio::join!(
            repositories.list_by_owner(user.id, page),
            repositories.starred_by(user.id, page)
        );
        let owned = owned?;
        let starred = starred?;

        Ok(Profile {
            user,
            repositories: owned.repositories,
            repositories_total: owned.total,
            starred: starred.repositories,
            starred_total: starred.total,
        })
    }

    /// Save profile changes, then refetch the page.
    ///
    /// A changed username becomes the lookup key for the refetch.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User> {
        self.last_error.clear().await;
        let result = match self.profile.data().await {
            Some(profile) => self.codehub.users().update(profile.user.id, update).await,
            None => Err(Error::validation("Profile is not loaded")),
        };

        match result {
            Ok(user) => {
                *self.username.write().await = user.username.clone();
                self.load().await;
                Ok(user)
            }
            Err(err) => {
                self.last_error.set(&err).await;
                Err(err)
            }
        }
    }
}

#[async_trait]
impl View for ProfileView {
    type Snapshot = Profile;

    async fn load(&self) {
        let ticket = self.profile.begin().await;
        let result = self.fetch().await;
        self.profile.settle(ticket, result).await;
    }

    async fn snapshot(&self) -> ViewState<Profile> {
        self.profile.snapshot().await
    }

    fn unmount(&self) {
        self.profile.unmount();
    }
}
