use presensi::api::build_router;
use presensi::bootstrap;
use presensi::config::Config;
use presensi::store::SqliteStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presensi=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize document store
    let store = SqliteStore::connect(&config.database_url).await?;
    store.init_schema().await?;
    tracing::info!("Document store ready");

    // Build application state, then seed permissions/role/admin user
    let store: Arc<dyn presensi::store::DocumentStore> = Arc::new(store);
    let state = bootstrap::build_app_state(store, &config);
    if let Err(e) = bootstrap::initialize_admin(
        state.store.as_ref(),
        state.identity.as_ref(),
        &config,
    )
    .await
    {
        tracing::error!("Failed to initialize admin user: {}", e);
        return Err(e.into());
    }

    // Build router
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
