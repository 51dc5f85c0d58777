use anyhow::Result;
use discojanice::{api, config::Config, db, suggestion::SuggestionService};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "discojanice=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables if .env exists
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing::info!("Initializing database at {}", config.database_path);

    let pool = db::create_pool(&config.database_path)?;
    db::init_database(&pool)?;

    if let Some(username) = &config.discogs_username {
        db::seed_username(&pool, username)?;
    }

    let service = SuggestionService::from_config(&config)?;
    tracing::info!(
        "Using Discogs at {} and iTunes at {}",
        config.discogs_api_url,
        config.itunes_api_url
    );

    let app = api::create_router(pool, service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
