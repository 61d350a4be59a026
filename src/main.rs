use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    appcenter::cli::run_cli().await
}
