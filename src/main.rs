use anyhow::Result;
use commitscore::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli.execute().await
}
