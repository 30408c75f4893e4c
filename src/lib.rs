//! Backend de gestão da oficina
//!
//! API REST para a operação da oficina: clientes, veículos, agenda,
//! ordens de serviço, pagamentos, pendências, despesas, estoque e
//! relatórios. Toda aritmética monetária usa Decimal; valores vindos de
//! formulário chegam como texto pt-BR e passam pelo codec de moeda.

pub mod api;
pub mod config;
pub mod database;
pub mod domain;
pub mod middleware;
pub mod models;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

/// Monta a aplicação completa: /health público, /api com as rotas de
/// negócio, CORS e trace por cima.
pub fn app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::criar_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "oficina-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
