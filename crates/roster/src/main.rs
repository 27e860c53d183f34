use anyhow::Result;
use clap::Parser;
use roster::args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    roster::init_tracing(&config.log_filter);
    roster::serve(config).await
}
