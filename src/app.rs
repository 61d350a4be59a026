use std::path::Path;

use anyhow::{bail, Result};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::Client;
use crate::release::{Release, ReleaseOptions};
use crate::request::decode_json;

const RELEASE_FORM_FIELD: &str = "ipa";
const SYMBOL_FORM_FIELD: &str = "dsym";

/// Handle on one App Center application, scoped by owner and app name.
#[derive(Debug, Clone)]
pub struct App {
    pub(crate) client: Client,
    pub(crate) owner: String,
    pub(crate) name: String,
}

/// A named set of testers a release can be distributed to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub is_public: bool,
}

/// An external publishing destination a release can be pushed to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub track: String,
}

/// Symbol archive flavors accepted by the symbol upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolType {
    Apple,
    AndroidProguard,
    Breakpad,
    JavaScript,
    #[serde(rename = "UWP")]
    Uwp,
}

#[derive(Debug, Deserialize)]
struct ReleaseUploadSlot {
    upload_id: String,
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct CommittedReleaseUpload {
    release_id: String,
}

#[derive(Debug, Deserialize)]
struct SymbolUploadSlot {
    symbol_upload_id: String,
    upload_url: String,
}

impl App {
    /// Uploads a build artifact and returns the committed release.
    ///
    /// Three fixed steps: create an upload slot, push the file to the
    /// pre-signed URL, commit the slot; the new release is then fetched by
    /// id. The first transport error or unexpected status aborts the whole
    /// sequence, and a slot created before a later failure is left behind
    /// on the server.
    pub async fn new_release(
        &self,
        file_path: &Path,
        options: Option<ReleaseOptions>,
    ) -> Result<Release> {
        let post_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/release_uploads",
            self.owner, self.name
        ))?;
        let body = options.map(serde_json::to_value).transpose()?;
        let (status, text) = self
            .client
            .json_request(Method::POST, post_url.clone(), body.as_ref())
            .await?;
        if status != StatusCode::CREATED {
            bail!("invalid status code: {status}, url: {post_url}, body: {text}");
        }
        let slot: ReleaseUploadSlot = decode_json(&text)?;

        let status = self
            .client
            .upload_request(&slot.upload_url, RELEASE_FORM_FIELD, file_path)
            .await?;
        if status != StatusCode::NO_CONTENT {
            bail!("invalid status code: {status}, url: {}", slot.upload_url);
        }

        let patch_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/release_uploads/{}",
            self.owner, self.name, slot.upload_id
        ))?;
        let (status, text) = self
            .client
            .json_request(
                Method::PATCH,
                patch_url.clone(),
                Some(&json!({"status": "committed"})),
            )
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {patch_url}, body: {text}");
        }
        let committed: CommittedReleaseUpload = decode_json(&text)?;

        self.release_by_id(&committed.release_id).await
    }

    /// Fetches a release by its server-assigned id.
    pub async fn release(&self, id: i64) -> Result<Release> {
        self.release_by_id(&id.to_string()).await
    }

    async fn release_by_id(&self, id: &str) -> Result<Release> {
        let get_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/releases/{}",
            self.owner, self.name, id
        ))?;
        let (status, text) = self
            .client
            .json_request(Method::GET, get_url.clone(), None)
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {get_url}, body: {text}");
        }
        let mut release: Release = decode_json(&text)?;
        release.app = Some(self.clone());
        Ok(release)
    }

    /// Fetches a distribution group by name.
    pub async fn group(&self, name: &str) -> Result<Group> {
        let get_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/distribution_groups/{}",
            self.owner, self.name, name
        ))?;
        let (status, text) = self
            .client
            .json_request(Method::GET, get_url.clone(), None)
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {get_url}, body: {text}");
        }
        decode_json(&text)
    }

    /// Fetches a distribution store by name.
    pub async fn store(&self, name: &str) -> Result<Store> {
        let get_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/distribution_stores/{}",
            self.owner, self.name, name
        ))?;
        let (status, text) = self
            .client
            .json_request(Method::GET, get_url.clone(), None)
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {get_url}, body: {text}");
        }
        decode_json(&text)
    }

    /// Uploads a debug-symbol archive through the same slot/transfer/commit
    /// sequence as a release. `build` and `version` are required for Android
    /// symbols and optional for iOS.
    pub async fn upload_symbols(
        &self,
        file_path: &Path,
        build: &str,
        version: &str,
        symbol_type: SymbolType,
    ) -> Result<()> {
        let post_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/symbol_uploads",
            self.owner, self.name
        ))?;
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let body = json!({
            "symbol_type": symbol_type,
            "client_callback": "",
            "file_name": file_name,
            "build": build,
            "version": version,
        });
        let (status, text) = self
            .client
            .json_request(Method::POST, post_url.clone(), Some(&body))
            .await?;
        if status != StatusCode::CREATED {
            bail!("invalid status code: {status}, url: {post_url}, body: {text}");
        }
        let slot: SymbolUploadSlot = decode_json(&text)?;

        let status = self
            .client
            .upload_request(&slot.upload_url, SYMBOL_FORM_FIELD, file_path)
            .await?;
        if status != StatusCode::NO_CONTENT {
            bail!("invalid status code: {status}, url: {}", slot.upload_url);
        }

        let patch_url = self.client.url(&format!(
            "v0.1/apps/{}/{}/symbol_uploads/{}",
            self.owner, self.name, slot.symbol_upload_id
        ))?;
        let (status, _) = self
            .client
            .json_request(
                Method::PATCH,
                patch_url.clone(),
                Some(&json!({"status": "committed"})),
            )
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {patch_url}");
        }
        Ok(())
    }
}
