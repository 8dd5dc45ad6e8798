use anyhow::Result;
use clap::{Parser, Subcommand};
use prepdesk_core::ServiceConfig;
use prepdesk_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "prepdesk")]
#[command(about = "Sales prep-room backend: intake, rep assignment, meetings and game plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Defaults to PREPDESK_PORT, then 3000
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Keep everything in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Create or update the PostgreSQL schema
    Migrate,
    /// Add a sales rep to the roster
    SeedRep {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List sales reps
    Reps,
    /// Print meeting and prospect counters
    Stats,
}

/// Connect to PostgreSQL, or build an in-memory store when asked to.
pub(crate) async fn open_storage(config: &ServiceConfig, in_memory: bool) -> Result<StorageBackend> {
    if in_memory {
        tracing::warn!("using in-memory storage, data is lost on exit");
        return Ok(StorageBackend::new_memory());
    }
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set (or pass --in-memory to serve)"))?;
    let storage =
        StorageBackend::new_postgres(url, config.pg_max_connections, config.store_timeout).await?;
    Ok(storage)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::from_env();

    match cli.command {
        Commands::Serve { port, host, in_memory } => {
            commands::serve::run(config, host, port, in_memory).await?;
        },
        Commands::Migrate => commands::migrate::run(&config).await?,
        Commands::SeedRep { name, email } => commands::admin::seed_rep(&config, name, email).await?,
        Commands::Reps => commands::admin::list_reps(&config).await?,
        Commands::Stats => commands::admin::stats(&config).await?,
    }

    Ok(())
}
