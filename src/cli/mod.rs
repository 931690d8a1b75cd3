use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::database::{Backend, DatabaseManager};
use crate::server;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "campus-kart")]
#[command(about = "Campus Kart - campus marketplace and lost-and-found API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Interface to bind, overrides HOST")]
        host: Option<String>,

        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the store schema and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    info!("Starting Campus Kart in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let store = DatabaseManager::connect(&config.database).await?;
            server::serve(AppState::new(config, store)?).await
        }
        Commands::Migrate => {
            if DatabaseManager::backend(&config.database.url)? == Backend::Memory {
                info!("In-memory store has no schema to migrate");
                return Ok(());
            }
            let store = DatabaseManager::connect(&config.database).await?;
            store.close().await;
            info!("Schema is up to date");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["campus-kart"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_host_and_port() {
        let cli = Cli::try_parse_from(["campus-kart", "serve", "--host", "127.0.0.1", "--port", "8080"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("127.0.0.1".to_string()),
                port: Some(8080)
            })
        );
    }

    #[test]
    fn migrate_parses() {
        let cli = Cli::try_parse_from(["campus-kart", "migrate"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Migrate));
    }
}
