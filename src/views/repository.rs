use std::sync::atomic::AtomicBool;

use async_trait::async_trait;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::commits::Commit;
use crate::error::{Error, Result};
use crate::issues::{Issue, IssueCreate};
use crate::render;
use crate::repositories::{Repository, RepositoryUpdate};
use crate::Codehub;

use super::{Alert, Busy, Slot, View, ViewState};

/// Everything the repository page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDetail {
    pub repository: Repository,
    pub commits: Vec<Commit>,
    pub commits_total: u64,
    pub issues: Vec<Issue>,
    pub issues_total: u64,
    /// Whether the acting user has starred the repository. `None` when no
    /// acting user is configured or the check could not be made.
    pub starred: Option<bool>,
}

impl RepositoryDetail {
    pub fn open_issue_count(&self) -> usize {
        render::open_issue_count(&self.issues)
    }
}

/// Input for filing an issue from the repository page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    /// Falls back to the configured acting user
    pub creator_id: Option<u64>,
    pub title: String,
    pub description: Option<String>,
}

impl IssueDraft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_creator(mut self, creator_id: u64) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Repository page: the repository with its commits and issues
pub struct RepositoryView {
    codehub: Codehub,
    repository_id: u64,
    detail: Slot<RepositoryDetail>,
    last_error: Alert,
    toggling: AtomicBool,
}

impl RepositoryView {
    pub fn new(codehub: Codehub, repository_id: u64) -> Self {
        Self {
            codehub,
            repository_id,
            detail: Slot::new("repository"),
            last_error: Alert::default(),
            toggling: AtomicBool::new(false),
        }
    }

    pub fn repository_id(&self) -> u64 {
        self.repository_id
    }

    /// Message left by the last failed update or issue creation
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.get().await
    }

    async fn fetch(&self) -> Result<RepositoryDetail> {
        let id = self.repository_id;
        let page = self.codehub.default_page();
        let repositories = self.codehub.repositories();
        let commits = self.codehub.commits();
        let issues = self.codehub.issues();
        let stars = self.codehub.stars();
        let actor = self.codehub.options().actor_id;

        // The star check never fails the page.
        let starred = async {
            let user_id = actor?;
            match stars.is_starred(user_id, id).await {
                Ok(starred) => Some(starred),
                Err(err) => {
                    warn!("star check for repository {} failed: {}", id, err);
                    None
                }
            }
        };

        // Every call runs to completion; the first failure wins.
        let (repository, commits, issues, starred) = tokio::join!(
            repositories.get(id),
            commits.list(id, page),
            issues.list(id, None, page),
            starred
        );

        let repository = repository?;
        let commits = commits?;
        let issues = issues?;

        Ok(RepositoryDetail {
            repository,
            commits: commits.commits,
            commits_total: commits.total,
            issues: issues.issues,
            issues_total: issues.total,
            starred,
        })
    }

    /// Star or unstar the repository as the acting user.
    ///
    /// The star flag and count change only after the backend call resolves.
    /// Failures, including a missing acting user, are logged and leave the
    /// snapshot unchanged. Returns the starred flag now shown, if any.
    pub async fn toggle_star(&self) -> Option<bool> {
        let user_id = match self.codehub.options().actor_id {
            Some(user_id) => user_id,
            None => {
                let err = Error::validation("An acting user is required to star repositories");
                error!("cannot toggle star on repository {}: {}", self.repository_id, err);
                return None;
            }
        };

        let _busy = match Busy::acquire(&self.toggling) {
            Some(busy) => busy,
            None => {
                info!("star toggle for repository {} already in flight", self.repository_id);
                return None;
            }
        };

        let starred = self.detail.data().await?.starred.unwrap_or(false);
        let repositories = self.codehub.repositories();
        let result = if starred {
            repositories.unstar(self.repository_id, user_id).await
        } else {
            repositories.star(self.repository_id, user_id).await
        };

        match result {
            Ok(()) => {
                self.detail
                    .update_ready(|detail| {
                        detail.starred = Some(!starred);
                        let count = &mut detail.repository.stars_count;
                        *count = if starred {
                            count.saturating_sub(1)
                        } else {
                            *count + 1
                        };
                    })
                    .await;
                Some(!starred)
            }
            Err(err) => {
                error!("failed to toggle star on repository {}: {}", self.repository_id, err);
                Some(starred)
            }
        }
    }

    /// Save changes to name, description or visibility, then refetch the page.
    ///
    /// An update with no fields set is rejected without a request.
    pub async fn update_details(&self, update: &RepositoryUpdate) -> Result<Repository> {
        self.last_error.clear().await;
        let result = if update.is_empty() {
            Err(Error::validation("Nothing to update"))
        } else {
            self.codehub
                .repositories()
                .update(self.repository_id, update)
                .await
        };
        match result {
            Ok(updated) => {
                self.load().await;
                Ok(updated)
            }
            Err(err) => {
                self.last_error.set(&err).await;
                Err(err)
            }
        }
    }

    /// File an issue against the repository, then refetch the page
    pub async fn open_issue(&self, draft: IssueDraft) -> Result<Issue> {
        self.last_error.clear().await;
        let result = self.create_issue(draft).await;
        match result {
            Ok(issue) => {
                self.load().await;
                Ok(issue)
            }
            Err(err) => {
                self.last_error.set(&err).await;
                Err(err)
            }
        }
    }

    async fn create_issue(&self, draft: IssueDraft) -> Result<Issue> {
        let creator_id = draft
            .creator_id
            .or(self.codehub.options().actor_id)
            .ok_or_else(|| Error::validation("Creator is required"))?;

        let mut data = IssueCreate::new(creator_id, &draft.title);
        if let Some(description) = draft.description.as_deref().filter(|d| !d.trim().is_empty()) {
            data = data.with_description(description);
        }

        self.codehub
            .issues()
            .create(self.repository_id, &data)
            .await
    }
}

#[async_trait]
impl View for RepositoryView {
    type Snapshot = RepositoryDetail;

    async fn load(&self) {
        let ticket = self.detail.begin().await;
        let result = self.fetch().await;
        self.detail.settle(ticket, result).await;
    }

    async fn snapshot(&self) -> ViewState<RepositoryDetail> {
        self.detail.snapshot().await
    }

    fn unmount(&self) {
        self.detail.unmount();
    }
}
