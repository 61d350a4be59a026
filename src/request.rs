use std::path::Path;

use anyhow::{anyhow, Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::Client;

impl Client {
    /// Issues a JSON API request and returns the response status with the raw
    /// body text. Callers compare the status against the code their endpoint
    /// documents before decoding the body.
    pub(crate) async fn json_request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<(StatusCode, String)> {
        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.body(serde_json::to_string(body)?);
        }
        let request = builder.build()?;

        if self.debug {
            debug!(
                target: "appcenter::http",
                "> {} {}\n> headers: {:?}\n> body: {}",
                request.method(),
                request.url(),
                request.headers(),
                body.map(|b| b.to_string()).unwrap_or_default(),
            );
        }

        let response = self
            .http
            .execute(request)
            .await
            .with_context(|| format!("request failed: {method} {url}"))?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {method} {url}"))?;

        if self.debug {
            debug!(
                target: "appcenter::http",
                "< {status}\n< headers: {headers:?}\n< body: {text}",
            );
        }

        Ok((status, text))
    }

    /// Uploads a local file to `url` as a multipart form carrying a single
    /// file field. Pre-signed upload URLs live on a separate host; the
    /// multipart boundary content type replaces the default JSON one.
    pub(crate) async fn upload_request(
        &self,
        url: &str,
        field: &str,
        path: &Path,
    ) -> Result<StatusCode> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let part = Part::bytes(bytes).file_name(path.display().to_string());
        let form = Form::new().part(field.to_string(), part);

        if self.debug {
            debug!(target: "appcenter::http", "> POST {url} (multipart {field}: {})", path.display());
        }

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("upload failed: POST {url}"))?;
        Ok(response.status())
    }
}

/// Decodes a JSON response body, carrying the raw text in the error so an
/// unexpected payload can be diagnosed.
pub(crate) fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|err| anyhow!("failed to decode response: {err}, body: {text}"))
}
