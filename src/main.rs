use castdesk::api::build_router;
use castdesk::bootstrap;
use castdesk::config::Config;
use castdesk::database::Database;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "castdesk=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Apply schema
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    // Initialize admin agent
    if let Err(e) = bootstrap::initialize_admin(&db, &config).await {
        tracing::error!("Failed to initialize admin agent: {}", e);
        return Err(std::io::Error::other(e).into());
    }

    // Build application state and start background cleanup
    bootstrap::start_session_cleanup(db.clone());
    let state = bootstrap::build_app_state(db, &config);

    // Build router
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
