//! Types for commit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::iso8601;
use crate::users::UserSummary;

/// An immutable commit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: u64,
    pub repository_id: u64,
    pub author_id: u64,
    #[serde(default)]
    pub author: Option<UserSummary>,
    pub message: String,
    pub hash: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitCreate {
    pub author_id: u64,
    pub message: String,

    /// Assigned by the backend when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl CommitCreate {
    pub fn new(author_id: u64, message: &str) -> Self {
        Self {
            author_id,
            message: message.to_string(),
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = Some(hash.to_string());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(Error::validation("Commit message is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitList {
    pub commits: Vec<Commit>,
    pub total: u64,
}
