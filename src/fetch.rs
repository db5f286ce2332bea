//! HTTP client adapter shared by every service

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::page::Page;

/// Shared transport: one connection pool plus the configured base address.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Wrap an existing reqwest client
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Build the transport described by `options`
    pub fn from_options(options: &ClientOptions) -> Result<Self> {
        let base_url = options.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::new(client, base_url))
    }

    /// Resolve path segments against the base address.
    ///
    /// Each segment is percent-encoded on its own, so identifiers such as
    /// usernames can never escape their position in the path.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::config("api url cannot be used as a base address"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

/// Helper for building and executing a single request
pub struct FetchBuilder<'a> {
    http: &'a HttpClient,
    url: Url,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(http: &'a HttpClient, url: Url, method: Method) -> Self {
        Self {
            http,
            url,
            method,
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add one query parameter
    pub fn query<V: ToString>(mut self, key: &str, value: V) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add `skip` and `limit`
    pub fn page(self, page: Page) -> Self {
        self.query("skip", page.skip).query("limit", page.limit)
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(Error::decode)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> RequestBuilder {
        let mut url = self.url.clone();

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.http.client.request(self.method.clone(), url);
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        req
    }

    /// Send the request and turn non-2xx responses into errors
    async fn send(&self) -> Result<Response> {
        debug!("{} {}", self.method, self.url);
        let response = self.build().send().await?;
        let status = response.status();
        debug!("{} {} -> {}", self.method, self.url, status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status, &text));
        }

        Ok(response)
    }

    /// Execute the request and decode the response body as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        let text = response.text().await?;

        serde_json::from_str::<T>(&text).map_err(|e| {
            Error::decode(format!(
                "{} {}: {} (body: {})",
                self.method,
                self.url.path(),
                e,
                truncate(&text, 200)
            ))
        })
    }

    /// Execute a request whose success response carries nothing of interest
    pub async fn execute_empty(&self) -> Result<()> {
        let response = self.send().await?;
        // Drain the body so the connection goes back to the pool.
        let _ = response.bytes().await?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get(http: &HttpClient, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(http, url, Method::GET)
    }

    /// Create a POST request
    pub fn post(http: &HttpClient, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(http, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put(http: &HttpClient, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(http, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete(http: &HttpClient, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(http, url, Method::DELETE)
    }
}
