use anyhow::Result;
use voice_scheduling::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
