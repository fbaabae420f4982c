use anyhow::Context;
use sustainability_chatbot::{
    config::{AppConfig, display_addr},
    routes,
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sustainability_chatbot=info,tower_http=info")),
        )
        .init();

    let state = AppState::shared(&config.relay).context("failed to build HTTP client")?;
    let app = routes::create_router(&config.static_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        url = %display_addr(&addr),
        endpoint = %config.relay.endpoint,
        static_dir = %config.static_dir.display(),
        "sustainability chatbot listening"
    );
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
