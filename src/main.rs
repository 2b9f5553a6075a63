use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use channel_origins::{config::Config, context::AppContext, database::Database, web::WebServer};

#[derive(Parser)]
#[command(name = "channel-origins")]
#[command(version)]
#[command(about = "Origin server registry and program migration service for virtual TV channels")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("channel_origins={},tower_http=trace", cli.log_level)
    } else {
        format!("channel_origins={},tower_http=info", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting channel-origins v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }

    info!("Using database: {}", config.database.url);
    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    let context = AppContext::new(config.clone(), database);
    let server = WebServer::new(&config, context)?;
    info!("Web server listening on {}:{}", server.host(), server.port());

    server.serve().await
}
