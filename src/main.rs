use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fashion_tryon_proxy::{api, Config};

#[tokio::main]
async fn main() {
    Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::new();
    config.print_env_vars();
    if !config.has_token() {
        tracing::warn!("REPLICATE_API_TOKEN is not set, /generate will fail until it is");
    }

    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();

    let state = match api::AppState::from_config(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialise service: {}", e);
            std::process::exit(1);
        }
    };
    let app = api::router(state);

    // Run our application with safe parsing
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 0.0.0.0", host_str);
        std::net::IpAddr::from([0, 0, 0, 0])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid PORT '{}', falling back to 8000", port_str);
        8000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    if let Err(e) = axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
