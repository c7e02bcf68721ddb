//! Foliochat HTTP server
//!
//! Starts an Axum web server exposing the portfolio chat endpoints.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use clap::Parser;
use tower_http::trace::TraceLayer;

use foliochat::cli::{Cli, Command, generate_config_template};
use foliochat::config::Config;
use foliochat::handlers::{self, AppState};
use foliochat::middleware::client_id::ClientIdExtractor;
use foliochat::middleware::{client_id_middleware, forwarded_for_or_peer, request_id_middleware};
use foliochat::{portfolio, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    if let Some(Command::Config { output }) = args.command {
        match output {
            Some(path) => {
                std::fs::write(&path, generate_config_template())?;
                println!("Wrote configuration template to {}", path);
            }
            None => print!("{}", generate_config_template()),
        }
        return Ok(());
    }

    let config = Config::from_file(&args.config)?;

    telemetry::init(&config.observability.log_level);

    tracing::info!(
        "Starting Foliochat server on {}:{}",
        config.server.host,
        config.server.port
    );

    let portfolio = portfolio::load(Path::new(&config.chat.portfolio_path))?;

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = AppState::new(config, portfolio);

    let extractor: ClientIdExtractor = Arc::new(forwarded_for_or_peer);

    let app = Router::new()
        .route("/api/chat", post(handlers::chat::handler))
        .route("/api/chat/suggestions", get(handlers::chat::suggestions))
        .route("/health", get(handlers::health::handler))
        .layer(middleware::from_fn_with_state(extractor, client_id_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from((
        host.parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        port,
    ));

    tracing::info!("Listening on {}", addr);
    tracing::info!("Chat endpoint available at http://{}/api/chat", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
