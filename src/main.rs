use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use snake_rooms::config::{self, GameConfig};
use snake_rooms::server::session::Hub;
use snake_rooms::server::ws::{self, WsState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cfg = GameConfig::default();
    tracing::info!(
        grid = cfg.grid_size,
        foods = cfg.food_count,
        "game configured"
    );

    let state = WsState {
        hub: Arc::new(RwLock::new(Hub::new(cfg))),
    };

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .fallback_service(ServeDir::new("static"));

    let port = config::server_port();
    let addr = format!("0.0.0.0:{port}");
    tracing::info!(%addr, "snake rooms server listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
