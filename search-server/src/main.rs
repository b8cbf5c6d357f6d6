use clap::Parser;
use search_server::{dataset::XmlFileProvider, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_server=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    let listener = TcpListener::bind(config.listen).await?;
    info!(
        listen = %config.listen,
        dataset = %config.dataset.display(),
        "search server listening"
    );

    let state = AppState::new(config.access_token, XmlFileProvider::new(config.dataset));
    search_server::run(listener, state).await
}
