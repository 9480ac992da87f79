//! Single-request HTTP source built on reqwest.

use std::error::Error as _;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use super::{Result, TextSource, parse_url, resource_label};
use crate::error::FetchError;
use crate::models::config::SourceConfig;

/// Downloads text with one GET request. No retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    timeout: Duration,
    user_agent: String,
    system_proxy: bool,
}

impl HttpSource {
    /// Create a source for `url` with the given timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: parse_url(url)?,
            timeout,
            user_agent: concat!("numtally/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        })
    }

    /// Create a source from configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(config.timeout_secs).map_err(|e| {
            FetchError::Client(format!("invalid timeout {}: {}", config.timeout_secs, e))
        })?;
        let source = Self::new(&config.url, timeout)?.with_user_agent(&config.user_agent);
        Ok(if config.system_proxy {
            source
        } else {
            source.without_proxy()
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn without_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: self.url.to_string(),
                secs: self.timeout.as_secs_f64(),
            }
        } else {
            FetchError::Transport {
                url: self.url.to_string(),
                reason: error_chain(&e),
            }
        }
    }
}

impl TextSource for HttpSource {
    async fn fetch_text(&self) -> Result<String> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout);
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(error_chain(&e)))?;

        info!("Fetching {}", self.url);
        let response = client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        debug!("{} responded with {}", self.url, status);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("Received {} bytes", text.len());
        Ok(text)
    }

    fn describe(&self) -> String {
        resource_label(&self.url)
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
