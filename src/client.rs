use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;

use crate::app::App;

pub const DEFAULT_BASE_URL: &str = "https://api.appcenter.ms/";

/// Authenticated App Center API client.
///
/// Every request issued through this client carries the `x-api-token` header
/// and the JSON content type; both are installed on the underlying transport
/// once, so no call site sets them. Cloning is cheap and clones share the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) debug: bool,
}

impl Client {
    /// Creates a client authenticated with an App Center API token. With
    /// `debug` enabled, raw requests and responses are emitted as `tracing`
    /// debug events under the `appcenter::http` target.
    pub fn new(token: &str, debug: bool) -> Result<Self> {
        let mut token_value =
            HeaderValue::from_str(token).context("API token is not a valid header value")?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-token", token_value);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let http = reqwest::Client::builder()
            .user_agent("appcenter/0.1")
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Ok(Self {
            http,
            base_url,
            debug,
        })
    }

    /// Overrides the base URL for API requests. Useful for tests with a mock server.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns a handle on the app identified by `owner` and `name`.
    pub fn apps(&self, owner: &str, name: &str) -> App {
        App {
            client: self.clone(),
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid request path: {path}"))
    }
}
