//! View-state containers
//!
//! Each container owns the transient state of one page: a [`ViewState`] per
//! data dependency, built from one or more service calls. Containers never
//! share state with each other; the backend is the only shared resource.
//!
//! Loads are fenced. Every load takes a sequence number when it starts and a
//! settling response is applied only if no newer load has already been applied,
//! so a slow, older response can never overwrite a newer one.

mod form;
mod home;
mod issue;
mod profile;
mod repository;
mod search;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::error::{Error, ErrorKind, Result};

pub use form::*;
pub use home::*;
pub use issue::*;
pub use profile::*;
pub use repository::*;
pub use search::*;

/// The error indicator a container keeps for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}

impl From<&Error> for ViewError {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Load state of one data dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(ViewError),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    /// The snapshot, if the last load succeeded
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Common surface of every page container
#[async_trait]
pub trait View: Send + Sync {
    /// What the container displays once ready
    type Snapshot: Clone + Send + Sync;

    /// Enter `Loading`, run the page's fetches and settle into `Ready` or `Failed`
    async fn load(&self);

    /// Copy of the current state
    async fn snapshot(&self) -> ViewState<Self::Snapshot>;

    /// Stop applying responses; in-flight requests still run to completion
    fn unmount(&self);

    /// Manual retry after a failure
    async fn retry(&self) {
        self.load().await
    }
}

/// Sequence number handed out when a load starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

struct SlotInner<T> {
    state: ViewState<T>,
    applied: u64,
}

/// One fenced piece of container state
pub(crate) struct Slot<T> {
    name: &'static str,
    inner: RwLock<SlotInner<T>>,
    issued: AtomicU64,
    mounted: AtomicBool,
}

impl<T: Clone + Send + Sync> Slot<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(SlotInner {
                state: ViewState::Idle,
                applied: 0,
            }),
            issued: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        }
    }

    /// Start a load: take the next sequence number and enter `Loading`.
    ///
    /// The number is taken under the state lock, so a newer load can never
    /// be overwritten by the `Loading` of an older one.
    pub(crate) async fn begin(&self) -> Ticket {
        let mut inner = self.inner.write().await;
        let ticket = Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        if self.is_mounted() {
            inner.state = ViewState::Loading;
        }
        drop(inner);
        debug!("{}: load #{} started", self.name, ticket.0);
        ticket
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Returns whether the outcome became the visible state.
    pub(crate) async fn settle(&self, ticket: Ticket, result: Result<T>) -> bool {
        if !self.is_mounted() {
            debug!("{}: load #{} settled after unmount, discarded", self.name, ticket.0);
            return false;
        }

        let mut inner = self.inner.write().await;
        if ticket.0 <= inner.applied {
            warn!(
                "{}: load #{} settled after newer load #{}, discarded",
                self.name, ticket.0, inner.applied
            );
            return false;
        }

        inner.applied = ticket.0;
        inner.state = match result {
            Ok(data) => ViewState::Ready(data),
            Err(err) => {
                debug!("{}: load #{} failed: {}", self.name, ticket.0, err);
                ViewState::Failed(ViewError::from(&err))
            }
        };
        true
    }

    /// Patch the snapshot in place. Does nothing unless the slot is `Ready`.
    pub(crate) async fn update_ready<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        if !self.is_mounted() {
            return false;
        }
        let mut inner = self.inner.write().await;
        match &mut inner.state {
            ViewState::Ready(data) => {
                f(data);
                true
            }
            _ => false,
        }
    }

    pub(crate) async fn snapshot(&self) -> ViewState<T> {
        self.inner.read().await.state.clone()
    }

    pub(crate) async fn data(&self) -> Option<T> {
        self.inner.read().await.state.data().cloned()
    }

    pub(crate) fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

/// Message kept on a container after a failed create/update, cleared on the
/// next attempt.
#[derive(Default)]
pub(crate) struct Alert {
    message: Mutex<Option<String>>,
}

impl Alert {
    pub(crate) async fn set(&self, err: &Error) {
        *self.message.lock().await = Some(err.user_message());
    }

    pub(crate) async fn clear(&self) {
        *self.message.lock().await = None;
    }

    pub(crate) async fn get(&self) -> Option<String> {
        self.message.lock().await.clone()
    }
}

/// Guard for toggles that must not overlap. Released on drop.
pub(crate) struct Busy<'a>(&'a AtomicBool);

impl<'a> Busy<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Busy(flag))
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
