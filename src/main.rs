use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use melon_chart::{
    HttpTransport, ServerConfig, SystemClock,
    api::{self, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melon_chart=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ServerConfig::from_env();
    let provider_config = config.provider_config();
    provider_config.validate()?;
    tracing::info!("Starting Melon Chart API");
    tracing::info!("Chart base URL: {}", provider_config.url);
    tracing::info!("Cut line: {}", provider_config.cut_line);

    // Create shared state
    let state = Arc::new(AppState {
        config: Arc::new(provider_config),
        transport: Arc::new(HttpTransport::new(config.http_timeout)?),
        clock: Arc::new(SystemClock),
    });

    // Create router
    let app = api::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
