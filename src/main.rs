//! CLI entry point for realty-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "realty-site")]
#[command(version)]
#[command(about = "Marketing site server for a real-estate acquisition business", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides config)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List property listings
    List,

    /// Scaffold a new property listing
    New {
        /// Title of the new listing
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "realty_site=debug,tower_http=debug,info"
    } else {
        "realty_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    match cli.command {
        Commands::Serve { port, ip } => {
            let mut site = realty_site::Site::new(&base_dir)?;
            if let Some(port) = port {
                site.config.server.port = port;
            }
            if let Some(ip) = ip {
                site.config.server.ip = ip;
            }

            let store = realty_site::store::Store::open(&site.data_dir)?;
            tracing::info!(
                "Starting server at http://{}:{}",
                site.config.server.ip,
                site.config.server.port
            );
            realty_site::server::start(site, store).await?;
        }

        Commands::List => {
            let site = realty_site::Site::new(&base_dir)?;
            realty_site::commands::list::run(&site)?;
        }

        Commands::New { title } => {
            let site = realty_site::Site::new(&base_dir)?;
            realty_site::commands::new::run(&site, &title)?;
        }
    }

    Ok(())
}
