//! Types for repository records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::iso8601;
use crate::users::UserSummary;

/// A hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: u64,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    pub is_public: bool,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,

    /// Derived from the star relation on the backend, never set directly
    #[serde(default)]
    pub stars_count: u64,
}

impl Repository {
    /// `owner/name`, falling back to "Unknown" when the owner was not embedded
    pub fn full_name(&self) -> String {
        let owner = self
            .owner
            .as_ref()
            .map(|o| o.username.as_str())
            .unwrap_or("Unknown");
        format!("{}/{}", owner, self.name)
    }
}

/// Payload for creating a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: u64,

    /// Backend default is public
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl RepositoryCreate {
    pub fn new(name: &str, owner_id: u64) -> Self {
        Self {
            name: name.to_string(),
            owner_id,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Presence check for the required fields
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Repository name is required"));
        }
        Ok(())
    }
}

/// Partial update. Fields left as `None` are not sent and stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl RepositoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_public.is_none()
    }
}

/// One page of repositories plus the total across all pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryList {
    pub repositories: Vec<Repository>,
    pub total: u64,
}
