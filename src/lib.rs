//! App Center release-distribution client.
//!
//! Wraps the App Center REST API for uploading build artifacts and debug
//! symbols and for assigning releases to distribution groups and stores.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use appcenter::Client;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Client::new("token", false)?;
//! let app = client.apps("my-org", "my-app");
//!
//! let release = app.new_release(Path::new("build/app.ipa"), None).await?;
//! let group = app.group("Beta Testers").await?;
//! release.set_group(&group, false, true).await?;
//! release.set_release_note("Fixed crash on launch").await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod client;
pub mod release;
mod request;

pub use app::{App, Group, Store, SymbolType};
pub use client::{Client, DEFAULT_BASE_URL};
pub use release::{BuildInfo, Destination, Release, ReleaseGroup, ReleaseOptions, ReleaseStore};
