use std::sync::atomic::AtomicBool;

use async_trait::async_trait;
use log::{error, info};

use crate::issues::{Issue, IssueStatus, IssueUpdate};
use crate::Codehub;

use super::{Busy, Slot, View, ViewState};

/// Single issue page
pub struct IssueView {
    codehub: Codehub,
    repository_id: u64,
    issue_id: u64,
    issue: Slot<Issue>,
    toggling: AtomicBool,
}

impl IssueView {
    pub fn new(codehub: Codehub, repository_id: u64, issue_id: u64) -> Self {
        Self {
            codehub,
            repository_id,
            issue_id,
            issue: Slot::new("issue"),
            toggling: AtomicBool::new(false),
        }
    }

    /// Flip the issue between open and closed.
    ///
    /// The snapshot is replaced with the issue the backend returns once the
    /// update resolves. Failures are logged and leave the snapshot as it was.
    /// Returns the status now shown, if any.
    pub async fn toggle_status(&self) -> Option<IssueStatus> {
        let _busy = match Busy::acquire(&self.toggling) {
            Some(busy) => busy,
            None => {
                info!("status toggle for issue {} already in flight", self.issue_id);
                return None;
            }
        };

        let current = self.issue.data().await?;
        let update = IssueUpdate::status(current.status.toggled());

        match self
            .codehub
            .issues()
            .update(self.repository_id, current.id, &update)
            .await
        {
            Ok(updated) => {
                let status = updated.status;
                self.issue.update_ready(|issue| *issue = updated).await;
                Some(status)
            }
            Err(err) => {
                error!("failed to update issue {}: {}", current.id, err);
                Some(current.status)
            }
        }
    }
}

#[async_trait]
impl View for IssueView {
    type Snapshot = Issue;

    async fn load(&self) {
        let ticket = self.issue.begin().await;
        let result = self
            .codehub
            .issues()
            .get(self.repository_id, self.issue_id)
            .await;
        self.issue.settle(ticket, result).await;
    }

    async fn snapshot(&self) -> ViewState<Issue> {
        self.issue.snapshot().await
    }

    fn unmount(&self) {
        self.issue.unmount();
    }
}
