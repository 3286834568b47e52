mod board;
mod command;
mod config;
mod mcp;
mod miro;
mod routes;
mod rpc;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    if config.miro.access_token.is_none() {
        tracing::warn!("MIRO_ACCESS_TOKEN not set; board operations will fail until it is configured");
    }

    let client = miro::MiroClient::new(&config.miro).expect("http client init failed");
    let fetcher = miro::BoardFetcher::new(Arc::new(client), config.miro.access_token.clone(), config.miro.page_limit);
    let service = board::BoardService::new(fetcher);

    let port = config.port;
    let state = state::AppState::new(service, config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "miro board reader listening");
    axum::serve(listener, app).await.expect("server failed");
}
