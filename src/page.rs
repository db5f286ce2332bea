//! Pagination input shared by every list operation

use serde::{Deserialize, Serialize};

/// Default number of rows requested by list operations.
pub const DEFAULT_LIMIT: u32 = 100;

/// Default number of rows requested by search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Offset-based page request. The backend caps `limit` on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// First page of `limit` rows
    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    /// The page after this one
    pub fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_LIMIT)
    }
}
