//! HTTP fetching behind an injectable abstraction.
//!
//! Steps and resources never touch `ureq` directly; they go through a
//! [`Fetcher`] carried by the step context so tests can script responses
//! without a network.

pub mod github;

use std::io::Read as _;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};

/// Number of download attempts before giving up.
const RETRY_COUNT: u32 = 3;

/// Delay between download attempts.
const RETRY_DELAY: Duration = Duration::from_secs(2);

const USER_AGENT: &str = concat!("bootstrap-cli/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP GET abstraction.
pub trait Fetcher {
    /// Fetch `url` and return the response body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the body
    /// is not valid UTF-8.
    fn get_text(&self, url: &str) -> Result<String>;

    /// Fetch `url` and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production [`Fetcher`] backed by `ureq`, with fixed-backoff retries.
#[derive(Debug)]
pub struct HttpFetcher {
    attempts: u32,
    delay: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: RETRY_COUNT,
            delay: RETRY_DELAY,
        }
    }
}

impl Fetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        with_retries(url, self.attempts, self.delay, || {
            let mut response = ureq::get(url).header("user-agent", USER_AGENT).call()?;
            Ok(response.body_mut().read_to_string()?)
        })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        with_retries(url, self.attempts, self.delay, || {
            let mut response = ureq::get(url).header("user-agent", USER_AGENT).call()?;
            let mut data = Vec::new();
            response
                .body_mut()
                .as_reader()
                .read_to_end(&mut data)
                .context("reading response body")?;
            Ok(data)
        })
    }
}

/// Run `op` up to `attempts` times, sleeping `delay` between attempts.
fn with_retries<T>(
    url: &str,
    attempts: u32,
    delay: Duration,
    mut op: impl FnMut() -> Result<T>,
) -> Result<T> {
    let mut last_err = None;
    for attempt in 1..=attempts.max(1) {
        if attempt > 1 {
            tracing::debug!("retry {attempt}/{attempts}: {url}");
            std::thread::sleep(delay);
        }
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err
        .unwrap_or_else(|| anyhow!("request failed"))
        .context(format!("GET {url} failed after {attempts} attempts")))
}
