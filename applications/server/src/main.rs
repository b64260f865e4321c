/// Kikoeru Server - voice work media server
use clap::{Parser, Subcommand};
use kikoeru_scanner::DirectoryTrackLister;
use kikoeru_server::{config::ServerConfig, create_router, state::AppState};
use kikoeru_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kikoeru-server")]
#[command(about = "Kikoeru voice work media server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "KIKOERU_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Load and validate the configuration, then list the root folders
    CheckConfig {
        /// Configuration file path
        #[arg(short, long, env = "KIKOERU_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kikoeru_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::CheckConfig { config } => {
            check_config(config)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Kikoeru Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    for folder in &config.media.root_folders {
        tracing::info!("Root folder {}: {}", folder.name, folder.path.display());
    }
    if config.media.offload_media {
        tracing::info!(
            "Offloading media to {} (stream) and {} (download)",
            config.media.offload_stream_path,
            config.media.offload_download_path
        );
    }

    // Initialize database
    ensure_database_dir(&config.storage.database_url)?;
    let pool = kikoeru_storage::create_pool(&config.storage.database_url).await?;
    kikoeru_storage::run_migrations(&pool).await?;
    let db = Arc::new(LocalStorageContext::new(pool));
    tracing::info!("Database connected");

    // Build application state
    let app_state = AppState::new(
        db.clone(),
        db,
        Arc::new(DirectoryTrackLister::new()),
        &config.media,
    );

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the parent directory of a file-backed `SQLite` database
fn ensure_database_dir(database_url: &str) -> std::io::Result<()> {
    let Some(location) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = location.split('?').next().unwrap_or(location);
    if file.is_empty() || file.contains(":memory:") {
        return Ok(());
    }

    match std::path::Path::new(file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn check_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    println!("Configuration OK");
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Database: {}", config.storage.database_url);
    println!("Root folders:");
    for folder in &config.media.root_folders {
        let status = if folder.path.is_dir() { "ok" } else { "missing" };
        println!("  {} - {} ({})", folder.name, folder.path.display(), status);
    }
    println!(
        "Offload: {}",
        if config.media.offload_media { "on" } else { "off" }
    );

    Ok(())
}
