use campus_kart::cli::{self, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("campus_kart=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
