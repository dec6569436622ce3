use crate::{Error, GithubClient, RateCache, Result};
use reqwest::header::HeaderValue;
use reqwest::{Client, ClientBuilder};
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com/";
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("github-core/", env!("CARGO_PKG_VERSION"));

/// Configures a [`GithubClient`].
///
/// Authentication is not handled here: pass a [`Client`] whose default headers (or middleware)
/// already authenticate requests with [`with_http_client`](Self::with_http_client).
pub struct GithubClientBuilder {
    http_client: Option<Client>,
    github_url: String,
    upload_url: String,
    user_agent: HeaderValue,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        Self {
            http_client: None,
            github_url: DEFAULT_GITHUB_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
        }
    }
}

impl GithubClientBuilder {
    pub fn with_http_client(mut self, client: Client) -> GithubClientBuilder {
        self.http_client = Some(client);
        self
    }

    /// Base URL for API requests. Must end with `/`, e.g. `https://github.example.com/api/v3/`.
    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    /// Base URL for uploads. Must end with `/`.
    pub fn with_upload_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.upload_url = url.as_ref().to_string();
        self
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(mut self, user_agent: STR) -> Result<GithubClientBuilder> {
        self.user_agent = HeaderValue::from_str(user_agent.as_ref())?;
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let http = match self.http_client {
            Some(client) => client,
            None => ClientBuilder::new().build()?,
        };
        Ok(GithubClient {
            http,
            base_url: base_url(&self.github_url)?,
            upload_url: base_url(&self.upload_url)?,
            user_agent: self.user_agent,
            rate: RateCache::default(),
        })
    }
}

fn base_url(url: &str) -> Result<Url> {
    let url = Url::parse(url)?;
    if !url.path().ends_with('/') {
        return Err(Error::BaseUrl(url));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_point_at_github() {
        let client = GithubClientBuilder::default().build().unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_GITHUB_URL);
        assert_eq!(client.upload_url().as_str(), DEFAULT_UPLOAD_URL);
        assert!(client.rate().is_none());
    }

    #[rstest]
    #[case::api("https://github.example.com/api/v3", "https://uploads.github.com/")]
    #[case::upload("https://api.github.com/", "https://github.example.com/api/uploads")]
    fn base_without_trailing_slash_is_rejected(#[case] github_url: &str, #[case] upload_url: &str) {
        let result = GithubClientBuilder::default()
            .with_github_url(github_url)
            .with_upload_url(upload_url)
            .build();
        assert!(matches!(result, Err(Error::BaseUrl(_))));
    }

    #[test]
    fn unparseable_base_is_rejected() {
        let result = GithubClientBuilder::default().with_github_url("not a url").build();
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn user_agent_must_be_a_header_value() {
        let result = GithubClientBuilder::default().try_with_user_agent("bad\nagent");
        assert!(matches!(result, Err(Error::Header(_))));
    }
}
