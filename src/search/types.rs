//! Types for search requests and results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::repositories::Repository;
use crate::users::User;

/// Which kinds of entity a search covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    All,
    Users,
    Repositories,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::All => "all",
            SearchKind::Users => "users",
            SearchKind::Repositories => "repositories",
        }
    }

    pub fn includes_users(&self) -> bool {
        matches!(self, SearchKind::All | SearchKind::Users)
    }

    pub fn includes_repositories(&self) -> bool {
        matches!(self, SearchKind::All | SearchKind::Repositories)
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchKind::All),
            "users" => Ok(SearchKind::Users),
            "repositories" | "repos" => Ok(SearchKind::Repositories),
            other => Err(Error::validation(format!("unknown search type: {}", other))),
        }
    }
}

/// Matches partitioned by kind. Each total counts only its own kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub users_total: u64,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub repositories_total: u64,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.repositories.is_empty()
    }
}
