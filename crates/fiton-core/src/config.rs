use crate::wait::WaitPolicy;
use crate::{Error, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://localhost:4403";

/// Settings shared by every scenario in a run
#[derive(Debug, Clone)]
pub struct RunConfig {
    base_url: Url,
    pub wait: WaitPolicy,
}

impl RunConfig {
    /// Create a config for the application at `base_url` with the default wait policy
    pub fn new(base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| Error::InvalidConfig(format!("base URL '{}': {}", base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidConfig(format!(
                "base URL '{}' must use http or https",
                base_url
            )));
        }

        // Paths are resolved relative to the base, so keep it directory-like
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            wait: WaitPolicy::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        self.wait.poll_interval = interval;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an application path such as `/measurements`
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidConfig(format!("path '{}': {}", path, e)))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            wait: WaitPolicy::default(),
        }
    }
}
