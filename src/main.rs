use autopark::{
    config::{database, settings},
    errors::{Error, Result},
    web::{self, AppState},
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Server settings, defaults when config.toml is absent
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    // 4. Database connection and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve until Ctrl+C
    let bind_addr = settings.server.bind_addr.clone();
    let app = web::router(AppState::new(db, settings));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .inspect_err(|e| error!("Cannot bind {}: {}", bind_addr, e))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::from)?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
