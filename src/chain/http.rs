use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{Chain, strip_newline};
use crate::consts::DEFAULT_TIMEOUT;
use crate::question::ValidatedQuestion;

/// Posts the question to a remote endpoint and returns the response body.
///
/// The request body is the question as a bare JSON string. The response is
/// not parsed; a successful body is returned as text.
pub struct HttpChain {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl HttpChain {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let raw = url.into();
        let url = reqwest::Url::parse(&raw).with_context(|| format!("invalid chain url `{raw}`"))?;
        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            bail!("chain url must be an http:// or https:// address, got `{raw}`");
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait]
impl Chain for HttpChain {
    type Output = String;

    async fn process(&self, question: ValidatedQuestion) -> Result<String> {
        debug!(url = %self.url, "posting question to chain endpoint");

        let resp = self
            .client
            .post(self.url.clone())
            .json(&question)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("chain endpoint error ({}): {}", status, text);
        }

        let text = resp
            .text()
            .await
            .with_context(|| format!("failed to read response from {}", self.url))?;
        Ok(strip_newline(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_urls() {
        assert!(HttpChain::new("ftp://example.com").is_err());
        assert!(HttpChain::new("example.com").is_err());
    }

    #[test]
    fn rejects_url_without_host() {
        assert!(HttpChain::new("http://").is_err());
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let chain = HttpChain::new("HTTP://Example.com/ask").unwrap();
        assert_eq!(chain.url(), "http://example.com/ask");
    }

    #[test]
    fn accepts_http_and_https() {
        assert_eq!(
            HttpChain::new("http://localhost:8080/ask").unwrap().url(),
            "http://localhost:8080/ask"
        );
        assert!(HttpChain::new("https://example.com").is_ok());
    }
}
