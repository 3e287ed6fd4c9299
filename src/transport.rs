//! HTTP GET behind a small trait so the engine can run against fakes.

use crate::config::Config;
use std::io::{self, Read};

/// Status and body of a completed GET.
pub struct Fetched {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for Fetched {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetched")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Fetched {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait Transport {
    /// Issue a GET. Connection-level failures come back as `Err`; any HTTP
    /// status, including 404, is a successful `Fetched`.
    fn get(&self, url: &str) -> io::Result<Fetched>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("sgeext/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> io::Result<Fetched> {
        let response = self.client.get(url).send().map_err(io::Error::other)?;
        Ok(Fetched {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}
