use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::app::SymbolType;
use crate::client::Client;
use crate::release::ReleaseOptions;

#[derive(Parser, Debug)]
#[command(name = "appcenter", version, about = "App Center distribution CLI in Rust", long_about = None)]
pub struct Cli {
    /// Dump raw API requests and responses
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a build artifact and optionally distribute it
    Distribute {
        /// App in owner/name form
        #[arg(short, long)]
        app: String,
        /// Path to the build artifact (.ipa, .apk)
        #[arg(short, long)]
        file: PathBuf,
        /// Distribution group to release to
        #[arg(short, long)]
        group: Option<String>,
        /// Distribution store to publish to
        #[arg(short, long)]
        store: Option<String>,
        /// Release notes text
        #[arg(long)]
        release_notes: Option<String>,
        /// Mark the release as a mandatory update
        #[arg(long)]
        mandatory: bool,
        /// Notify testers in the group
        #[arg(long)]
        notify: bool,
        /// Build version the upload belongs to
        #[arg(long)]
        build_version: Option<String>,
        /// Build number the upload belongs to
        #[arg(long)]
        build_number: Option<String>,
    },
    /// Upload a debug-symbol archive
    Symbols {
        /// App in owner/name form
        #[arg(short, long)]
        app: String,
        /// Path to the symbol archive (.dSYM zip, mapping.txt)
        #[arg(short, long)]
        file: PathBuf,
        /// Symbol flavor: apple, android-proguard, breakpad, javascript, uwp
        #[arg(short = 't', long, value_parser = parse_symbol_type, default_value = "apple")]
        symbol_type: SymbolType,
        /// Build the symbols belong to (required for Android)
        #[arg(long, default_value = "")]
        build: String,
        /// Version the symbols belong to (required for Android)
        #[arg(long, default_value = "")]
        version: String,
    },
    /// Show a distribution group
    Group {
        /// App in owner/name form
        #[arg(short, long)]
        app: String,
        /// Group name
        #[arg(short, long)]
        name: String,
    },
    /// Show a distribution store
    Store {
        /// App in owner/name form
        #[arg(short, long)]
        app: String,
        /// Store name
        #[arg(short, long)]
        name: String,
    },
    /// Show a release by id
    ReleaseInfo {
        /// App in owner/name form
        #[arg(short, long)]
        app: String,
        /// Release ID
        #[arg(short, long)]
        release: i64,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("appcenter=debug"))
            .init();
    }
    let token = env::var("APPCENTER_TOKEN")
        .context("Missing env APPCENTER_TOKEN (App Center API token)")?;
    let client = Client::new(&token, cli.debug)?;

    match cli.command {
        Commands::Distribute {
            app,
            file,
            group,
            store,
            release_notes,
            mandatory,
            notify,
            build_version,
            build_number,
        } => {
            let options = if build_version.is_some() || build_number.is_some() {
                Some(ReleaseOptions {
                    build_version,
                    build_number,
                    release_id: None,
                })
            } else {
                None
            };
            distribute_cmd(
                &client,
                &app,
                &file,
                options,
                group.as_deref(),
                store.as_deref(),
                release_notes.as_deref(),
                mandatory,
                notify,
            )
            .await?
        }
        Commands::Symbols {
            app,
            file,
            symbol_type,
            build,
            version,
        } => symbols_cmd(&client, &app, &file, symbol_type, &build, &version).await?,
        Commands::Group { app, name } => group_cmd(&client, &app, &name).await?,
        Commands::Store { app, name } => store_cmd(&client, &app, &name).await?,
        Commands::ReleaseInfo { app, release } => release_info_cmd(&client, &app, release).await?,
    }

    Ok(())
}

fn parse_symbol_type(s: &str) -> Result<SymbolType, String> {
    match s.to_ascii_lowercase().as_str() {
        "apple" => Ok(SymbolType::Apple),
        "android-proguard" | "androidproguard" | "proguard" => Ok(SymbolType::AndroidProguard),
        "breakpad" => Ok(SymbolType::Breakpad),
        "javascript" => Ok(SymbolType::JavaScript),
        "uwp" => Ok(SymbolType::Uwp),
        other => Err(format!("unknown symbol type: {other}")),
    }
}

fn split_app(app: &str) -> Result<(&str, &str)> {
    app.split_once('/')
        .ok_or_else(|| anyhow!("app must be in owner/name form, got: {app}"))
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg.to_string());
    pb
}

#[allow(clippy::too_many_arguments)]
async fn distribute_cmd(
    client: &Client,
    app: &str,
    file: &Path,
    options: Option<ReleaseOptions>,
    group: Option<&str>,
    store: Option<&str>,
    release_notes: Option<&str>,
    mandatory: bool,
    notify: bool,
) -> Result<()> {
    let (owner, name) = split_app(app)?;
    let app = client.apps(owner, name);

    let pb = spinner(&format!("Uploading {}...", file.display()));
    let release = app.new_release(file, options).await;
    pb.finish_and_clear();
    let release = release?;
    println!(
        "Release {} created ({} {})",
        release.id, release.short_version, release.version
    );

    if let Some(group_name) = group {
        let pb = spinner("Resolving distribution group...");
        let found = app.group(group_name).await;
        pb.finish_and_clear();
        let found = found?;

        let pb = spinner("Assigning release to group...");
        let res = release.set_group(&found, mandatory, notify).await;
        pb.finish_and_clear();
        res?;
        println!("Release {} distributed to group {}", release.id, found.name);
    }

    if let Some(store_name) = store {
        let pb = spinner("Resolving distribution store...");
        let found = app.store(store_name).await;
        pb.finish_and_clear();
        let found = found?;

        let pb = spinner("Submitting release to store...");
        let res = release.set_store(&found).await;
        pb.finish_and_clear();
        res?;
        println!("Release {} submitted to store {}", release.id, found.name);
    }

    if let Some(notes) = release_notes {
        let pb = spinner("Setting release notes...");
        let res = release.set_release_note(notes).await;
        pb.finish_and_clear();
        res?;
        println!("Release notes updated");
    }

    Ok(())
}

async fn symbols_cmd(
    client: &Client,
    app: &str,
    file: &Path,
    symbol_type: SymbolType,
    build: &str,
    version: &str,
) -> Result<()> {
    let (owner, name) = split_app(app)?;
    let app = client.apps(owner, name);

    let pb = spinner(&format!("Uploading symbols {}...", file.display()));
    let res = app.upload_symbols(file, build, version, symbol_type).await;
    pb.finish_and_clear();
    res?;
    println!("Symbols uploaded");
    Ok(())
}

async fn group_cmd(client: &Client, app: &str, name: &str) -> Result<()> {
    let (owner, app_name) = split_app(app)?;
    let pb = spinner("Loading group...");
    let group = client.apps(owner, app_name).group(name).await;
    pb.finish_and_clear();
    println!("{}", serde_json::to_string_pretty(&group?)?);
    Ok(())
}

async fn store_cmd(client: &Client, app: &str, name: &str) -> Result<()> {
    let (owner, app_name) = split_app(app)?;
    let pb = spinner("Loading store...");
    let store = client.apps(owner, app_name).store(name).await;
    pb.finish_and_clear();
    println!("{}", serde_json::to_string_pretty(&store?)?);
    Ok(())
}

async fn release_info_cmd(client: &Client, app: &str, release_id: i64) -> Result<()> {
    let (owner, app_name) = split_app(app)?;
    let pb = spinner("Loading release...");
    let release = client.apps(owner, app_name).release(release_id).await;
    pb.finish_and_clear();
    println!("{}", serde_json::to_string_pretty(&release?)?);
    Ok(())
}
