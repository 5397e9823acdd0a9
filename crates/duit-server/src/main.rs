use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use duit_core::Engine;
use duit_types::api::{ReplyResponse, UpdateRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duit=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("DUIT_DB_PATH").unwrap_or_else(|_| "duit.db".into());
    let host = std::env::var("DUIT_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("DUIT_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    let db = duit_db::Database::open(&PathBuf::from(&db_path))?;
    let engine = Arc::new(Engine::new(Arc::new(db)));

    let app = Router::new()
        .route("/update", post(handle_update))
        .with_state(engine)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("duit webhook listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One chat event in, zero-or-one notice out. The engine is synchronous
/// and talks to SQLite, so it runs off the async runtime.
async fn handle_update(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<ReplyResponse>, StatusCode> {
    let reply = tokio::task::spawn_blocking(move || engine.handle(req.chat_id, &req.text))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let (messages, show_menu) = match reply {
        Some(reply) => (vec![reply.text], reply.show_menu),
        None => (Vec::new(), false),
    };

    Ok(Json(ReplyResponse { messages, show_menu }))
}
