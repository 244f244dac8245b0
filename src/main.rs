use anyhow::Result;
use clap::Parser;
use nimbus_weather::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    nimbus_weather::run(cli).await
}
