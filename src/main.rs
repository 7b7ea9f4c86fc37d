//! rowsearch - paginated substring search over a single SQL table
//!
//! Discovers the backing table at startup, then serves search queries as
//! JSON pages with a condensed navigation page bar. Startup failures
//! (unreachable database, no searchable table) are fatal.

use anyhow::Result;
use clap::Parser;
use sqlx::sqlite::SqlitePool;
use tracing::{error, info};

use rowsearch::db::RowStore;
use rowsearch::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "rowsearch", version, about = "Paginated substring search over a single SQL table")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://rowsearch.db")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting rowsearch v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let pool = match SqlitePool::connect(&args.database_url).await {
        Ok(pool) => {
            info!("✓ Connected to {}", args.database_url);
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let store = match RowStore::discover(pool).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to discover search table: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(store);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("rowsearch listening on http://0.0.0.0:{}", args.port);
    info!("Health check: http://0.0.0.0:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
