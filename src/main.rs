use std::{error::Error, sync::Arc};

use axum::serve;
use session_viewer::{
    provider::LiveProvider,
    routes::{init_tracing, make_app},
    utils::{config::Config, state::AppState},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Initializing application...");
    let config = Config::init();
    info!(seasons = ?config.seasons, "Configuration loaded successfully");

    let http_client = reqwest::Client::new();
    let provider = LiveProvider::new(&config, http_client);
    info!("External clients initialized successfully");

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, Arc::new(provider)));
    let app = make_app(state);

    let listener = TcpListener::bind(bind_addr.as_str()).await?;
    info!("Listening on http://{}", bind_addr);
    serve(listener, app).await?;

    Ok(())
}
