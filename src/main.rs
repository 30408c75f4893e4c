use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use oficina_backend::config::EnvironmentConfig;
use oficina_backend::database::{create_pool, mask_database_url, run_migrations};
use oficina_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    let nivel = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(nivel).init();

    info!("🔧 Oficina Backend - Gestão de Oficina Mecânica");
    info!("===============================================");
    info!("📦 Banco: {}", mask_database_url(&config.database_url));

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    info!("✅ Migrações aplicadas");

    let addr = config.server_addr();
    let state = AppState::new(pool, config);
    let app = oficina_backend::app(state);

    info!("🚀 Servidor ouvindo em {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("falha ao instalar handler de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("falha ao instalar handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Sinal de desligamento recebido");
}
