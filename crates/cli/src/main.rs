use anyhow::Result;
use clap::Parser;
use market_cli::{commands, logging, CliArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.json_logs)?;
    commands::execute(args).await
}
