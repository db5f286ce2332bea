use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::repositories::{Repository, RepositoryCreate};
use crate::Codehub;

const CREATE_FAILED: &str = "Failed to create repository";

/// Editable fields of the new-repository form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFields {
    pub name: String,
    pub description: String,
    /// Falls back to the configured acting user when unset
    pub owner_id: Option<u64>,
    pub is_public: bool,
}

impl Default for RepositoryFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            owner_id: None,
            is_public: true,
        }
    }
}

/// Submission state of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FormStatus {
    Editing,
    Submitting,
    /// The form stays open with this message shown
    Failed(String),
    Created(Repository),
}

/// Serializable copy of the whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub fields: RepositoryFields,
    pub status: FormStatus,
}

struct FormInner {
    fields: RepositoryFields,
    status: FormStatus,
}

/// The create-repository form
pub struct NewRepositoryForm {
    codehub: Codehub,
    inner: RwLock<FormInner>,
}

impl NewRepositoryForm {
    pub fn new(codehub: Codehub) -> Self {
        Self {
            codehub,
            inner: RwLock::new(FormInner {
                fields: RepositoryFields::default(),
                status: FormStatus::Editing,
            }),
        }
    }

    pub async fn set_fields(&self, fields: RepositoryFields) {
        self.inner.write().await.fields = fields;
    }

    /// Edit the fields in place
    pub async fn edit<F>(&self, f: F)
    where
        F: FnOnce(&mut RepositoryFields),
    {
        f(&mut self.inner.write().await.fields);
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.read().await;
        FormSnapshot {
            fields: inner.fields.clone(),
            status: inner.status.clone(),
        }
    }

    pub async fn error(&self) -> Option<String> {
        match &self.inner.read().await.status {
            FormStatus::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub async fn is_submitting(&self) -> bool {
        matches!(self.inner.read().await.status, FormStatus::Submitting)
    }

    /// Validate and submit the form.
    ///
    /// A missing name fails with [`Error::Validation`] before any request is
    /// made. On success the created repository is returned; callers show it by
    /// fetching it afresh rather than trusting this copy.
    pub async fn submit(&self) -> Result<Repository> {
        let data = {
            let mut inner = self.inner.write().await;
            if inner.status == FormStatus::Submitting {
                return Err(Error::validation("Repository creation already in progress"));
            }

            match self.payload(&inner.fields) {
                Ok(data) => {
                    inner.status = FormStatus::Submitting;
                    data
                }
                Err(err) => {
                    debug!("new repository form rejected: {}", err);
                    inner.status = FormStatus::Failed(err.user_message());
                    return Err(err);
                }
            }
        };

        let result = self.codehub.repositories().create(&data).await;

        let mut inner = self.inner.write().await;
        match result {
            Ok(repository) => {
                info!("created repository {} ({})", repository.name, repository.id);
                inner.status = FormStatus::Created(repository.clone());
                Ok(repository)
            }
            Err(err) => {
                inner.status = FormStatus::Failed(failure_message(&err));
                Err(err)
            }
        }
    }

    fn payload(&self, fields: &RepositoryFields) -> Result<RepositoryCreate> {
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Repository name is required"));
        }
        let owner_id = fields
            .owner_id
            .or(self.codehub.options().actor_id)
            .ok_or_else(|| Error::validation("Owner is required"))?;

        let mut data = RepositoryCreate::new(name, owner_id).with_public(fields.is_public);
        if !fields.description.trim().is_empty() {
            data = data.with_description(&fields.description);
        }
        Ok(data)
    }
}

/// Backend-supplied detail when there is one, a generic message otherwise
fn failure_message(err: &Error) -> String {
    match err {
        Error::Status { .. } | Error::NotFound { .. } | Error::Validation(_) => err.user_message(),
        _ => CREATE_FAILED.to_string(),
    }
}
