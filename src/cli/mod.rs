pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "bookmarks-api")]
#[command(about = "Bookmarks API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Migrate => commands::migrate::handle(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["bookmarks-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_port() {
        let cli = Cli::try_parse_from(["bookmarks-api", "serve", "--port", "4000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(4000) })));
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::try_parse_from(["bookmarks-api", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Migrate)));
    }
}
