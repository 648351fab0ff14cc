//! HTTP server for the tidecast dashboard.
//!
//! Serves the static dashboard page plus three pipeline endpoints:
//! upload, column mapping (with head preview), and forecast. All state
//! is a single in-memory session; a new upload resets it.

use std::env;
use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod routes;
mod state;

use crate::state::AppState;

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/v1/upload", post(routes::upload))
        .route("/api/v1/map", post(routes::map))
        .route("/api/v1/forecast", post(routes::forecast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidecast_web=info,tower_http=info".into()),
        )
        .init();

    let host = env::var("HOST").unwrap_or_else(|_| String::from("127.0.0.1"));
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| String::from("8080"))
        .parse()?;
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    tracing::info!(
        "tidecast-web v{} listening on {addr}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(AppState::default())).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(error) = serve().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
