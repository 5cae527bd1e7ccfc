use clap::Parser;
use tracing_subscriber::EnvFilter;

use subsweep::{run, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    run(args).await
}
