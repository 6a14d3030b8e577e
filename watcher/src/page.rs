use anyhow::{Context, Result};
use async_trait::async_trait;
use log::*;

/// The watched page: a current path plus the reload side effect.
///
/// This is the only side-effect surface the watcher touches.
#[async_trait]
pub trait Page: Send + Sync {
    /// Path of the page being kept fresh, e.g. `/` or `/materials/42`.
    fn path(&self) -> &str;

    /// Perform a full re-fetch of the page.
    async fn reload(&self) -> Result<()>;
}

/// A dashboard page addressed as base URL + fixed path, reloaded by
/// re-fetching it over HTTP.
pub struct HttpPage {
    client: reqwest::Client,
    base_url: String,
    path: String,
    session_cookie: Option<String>,
}

impl HttpPage {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            path: path.into(),
            session_cookie: None,
        }
    }

    /// Send the dashboard session cookie with each re-fetch.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

#[async_trait]
impl Page for HttpPage {
    fn path(&self) -> &str {
        &self.path
    }

    async fn reload(&self) -> Result<()> {
        let url = self.url();

        let mut request = self.client.get(&url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", format!("session={cookie}"));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to re-fetch {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Re-fetch of {url} returned {}", response.status());
        }

        debug!("Re-fetched {url}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let page = HttpPage::new("http://localhost:5000", "/materials/42");
        assert_eq!(page.url(), "http://localhost:5000/materials/42");
    }

    #[test]
    fn url_drops_trailing_slash_on_base() {
        let page = HttpPage::new("http://localhost:5000/", "/");
        assert_eq!(page.url(), "http://localhost:5000/");
    }
}
