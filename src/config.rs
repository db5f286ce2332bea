//! Configuration options for the Codehub client

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Base address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration options for the Codehub client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The base address of the backend API
    pub api_url: String,

    /// The request timeout. Requests are fire-once with no timeout by default.
    pub request_timeout: Option<Duration>,

    /// Page size used by list operations when the caller does not pick one
    pub page_size: u32,

    /// Identity used for actions that need an acting user (starring).
    ///
    /// There is no authenticated session, so this is whatever the operator
    /// configures. `None` means such actions are rejected client-side.
    pub actor_id: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            page_size: 100,
            actor_id: None,
        }
    }
}

impl ClientOptions {
    /// Set the base address of the backend API
    pub fn with_api_url(mut self, value: &str) -> Self {
        self.api_url = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the default page size
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }

    /// Set the acting user id
    pub fn with_actor_id(mut self, value: Option<u64>) -> Self {
        self.actor_id = value;
        self
    }

    /// Load options from `CODEHUB_*` environment variables.
    ///
    /// * `CODEHUB_API_URL` - backend base address
    /// * `CODEHUB_TIMEOUT_SECS` - request timeout in seconds
    /// * `CODEHUB_PAGE_SIZE` - default list page size
    /// * `CODEHUB_ACTOR_ID` - acting user id
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(url) = env::var("CODEHUB_API_URL") {
            options.api_url = url;
        }
        if let Some(secs) = parse_var::<u64>("CODEHUB_TIMEOUT_SECS")? {
            options.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(size) = parse_var::<u32>("CODEHUB_PAGE_SIZE")? {
            options.page_size = size;
        }
        options.actor_id = parse_var::<u64>("CODEHUB_ACTOR_ID")?;

        options.validate()?;
        Ok(options)
    }

    /// Check the options and return the parsed base address.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "api url {} cannot be used as a base address",
                self.api_url
            )));
        }
        if self.page_size == 0 {
            return Err(Error::config("page size must be greater than zero"));
        }
        Ok(url)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::config(format!("{} has invalid value {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
