//! Blocking byte retrieval over HTTP

use crate::constants::USER_AGENT;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single response body
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),
    #[error("Response from {url} exceeds {limit} bytes")]
    TooLarge { limit: u64, url: String },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

/// Retrieves the bytes behind a URL.
pub trait ByteFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: ByteFetcher + ?Sized> ByteFetcher for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

/// `ureq`-backed fetcher. Never retries.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl ByteFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "*/*")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => FetchError::Status {
                    status,
                    url: url.to_string(),
                },
                ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
            })?;

        read_limited(response.into_reader(), MAX_BODY_BYTES, url)
    }
}

/// Read a whole body, failing instead of truncating once it passes `limit`.
fn read_limited(reader: impl Read, limit: u64, url: &str) -> Result<Vec<u8>, FetchError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(FetchError::TooLarge {
            limit,
            url: url.to_string(),
        });
    }
    Ok(bytes)
}
