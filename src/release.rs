use anyhow::{anyhow, bail, Result};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::app::{App, Group, Store};

/// Optional parameters tying a release upload to a specific build. Unset
/// fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_id: Option<i64>,
}

/// One distributable build registered with the service, populated from the
/// server's release record. The owning [`App`] handle is retained so the
/// mutation calls can build their URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Release {
    #[serde(skip)]
    pub(crate) app: Option<App>,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub short_version: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub uploaded_at: String,
    #[serde(default)]
    pub destination_type: String,
    #[serde(default)]
    pub distribution_groups: Vec<ReleaseGroup>,
    #[serde(default)]
    pub distribution_stores: Vec<ReleaseStore>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub build: BuildInfo,
    #[serde(default)]
    pub is_external_build: bool,
}

/// Distribution-group entry on a release record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_latest: bool,
}

/// Distribution-store entry on a release record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseStore {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub publishing_status: String,
    #[serde(default)]
    pub is_latest: bool,
}

/// Combined destination entry (group or store) on a release record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub destination_type: String,
    #[serde(default)]
    pub publishing_status: String,
    #[serde(default)]
    pub is_latest: bool,
}

/// Build metadata attached to a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub commit_hash: String,
    #[serde(default)]
    pub commit_message: String,
}

impl Release {
    fn app(&self) -> Result<&App> {
        self.app
            .as_ref()
            .ok_or_else(|| anyhow!("release {} is not bound to an app", self.id))
    }

    /// Makes the release available to a distribution group. The in-memory
    /// record is not refreshed; re-fetch the release to observe the change.
    pub async fn set_group(
        &self,
        group: &Group,
        mandatory_update: bool,
        notify_testers: bool,
    ) -> Result<()> {
        let app = self.app()?;
        let post_url = app.client.url(&format!(
            "v0.1/apps/{}/{}/releases/{}/groups",
            app.owner, app.name, self.id
        ))?;
        let body = json!({
            "id": &group.id,
            "mandatory_update": mandatory_update,
            "notify_testers": notify_testers,
        });
        let (status, _) = app
            .client
            .json_request(Method::POST, post_url.clone(), Some(&body))
            .await?;
        if status != StatusCode::CREATED {
            bail!("invalid status code: {status}, url: {post_url}");
        }
        Ok(())
    }

    /// Pushes the release to a distribution store.
    pub async fn set_store(&self, store: &Store) -> Result<()> {
        let app = self.app()?;
        let post_url = app.client.url(&format!(
            "v0.1/apps/{}/{}/releases/{}/stores",
            app.owner, app.name, self.id
        ))?;
        let body = json!({"id": &store.id});
        let (status, _) = app
            .client
            .json_request(Method::POST, post_url.clone(), Some(&body))
            .await?;
        if status != StatusCode::CREATED {
            bail!("invalid status code: {status}, url: {post_url}");
        }
        Ok(())
    }

    /// Replaces the release notes.
    pub async fn set_release_note(&self, release_note: &str) -> Result<()> {
        let app = self.app()?;
        let put_url = app.client.url(&format!(
            "v0.1/apps/{}/{}/releases/{}",
            app.owner, app.name, self.id
        ))?;
        let body = json!({"release_notes": release_note});
        let (status, _) = app
            .client
            .json_request(Method::PUT, put_url.clone(), Some(&body))
            .await?;
        if status != StatusCode::OK {
            bail!("invalid status code: {status}, url: {put_url}");
        }
        Ok(())
    }
}
