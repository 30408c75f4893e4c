//! Handlers de logs de atendimento
//!
//! Registro de contatos com clientes. Um contato com data combinada gera
//! a pendência correspondente na mesma transação.

use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::log_atendimento::{CreateLogRequest, LogAtendimento, UpdateLogRequest},
    models::pendencia::Pendencia,
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", post(criar))
        .route("/:id", put(atualizar).delete(remover))
}

/// Response da criação: o log e a pendência gerada, caso exista
#[derive(Debug, Serialize)]
pub struct LogCriadoResponse {
    pub log: LogAtendimento,
    pub pendencia: Option<Pendencia>,
}

/// Registra um contato. Se veio data_combinada, abre a pendência
/// vinculada na mesma transação.
pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreateLogRequest>,
) -> AppResult<Json<LogCriadoResponse>> {
    dados.validate()?;

    let mut tx = state.pool.begin().await?;

    let log = sqlx::query_as::<_, LogAtendimento>(
        r#"
        INSERT INTO logs_atendimento
            (cliente_id, ordem_servico_id, canal, descricao, usuario_responsavel, data_combinada)
        VALUES ($1, $2, COALESCE($3, 'WhatsApp'), $4, COALESCE($5, 'Admin'), $6)
        RETURNING *
        "#,
    )
    .bind(dados.cliente_id)
    .bind(dados.ordem_servico_id)
    .bind(&dados.canal)
    .bind(&dados.descricao)
    .bind(&dados.usuario_responsavel)
    .bind(dados.data_combinada)
    .fetch_one(&mut *tx)
    .await?;

    let pendencia = match dados.data_combinada {
        Some(data_prevista) => {
            let pendencia = sqlx::query_as::<_, Pendencia>(
                r#"
                INSERT INTO pendencias
                    (cliente_id, ordem_servico_id, log_atendimento_id, descricao,
                     data_prevista, responsavel)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(log.cliente_id)
            .bind(log.ordem_servico_id)
            .bind(log.id)
            .bind(&log.descricao)
            .bind(data_prevista)
            .bind(&log.usuario_responsavel)
            .fetch_one(&mut *tx)
            .await?;
            Some(pendencia)
        }
        None => None,
    };

    tx.commit().await?;

    tracing::info!("📞 Contato registrado: {} (pendência: {})", log.id, pendencia.is_some());
    Ok(Json(LogCriadoResponse { log, pendencia }))
}

/// Corrige um contato já registrado. Não mexe em pendências existentes.
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdateLogRequest>,
) -> AppResult<Json<LogAtendimento>> {
    dados.validate()?;

    let log = sqlx::query_as::<_, LogAtendimento>(
        r#"
        UPDATE logs_atendimento SET
            canal = COALESCE($2, canal),
            descricao = COALESCE($3, descricao),
            usuario_responsavel = COALESCE($4, usuario_responsavel),
            data_combinada = COALESCE($5, data_combinada)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&dados.canal)
    .bind(&dados.descricao)
    .bind(&dados.usuario_responsavel)
    .bind(dados.data_combinada)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Log de atendimento", id))?;

    Ok(Json(log))
}

pub async fn remover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let resultado = sqlx::query("DELETE FROM logs_atendimento WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if resultado.rows_affected() == 0 {
        return Err(nao_encontrado("Log de atendimento", id));
    }

    Ok(Json(serde_json::json!({ "message": "Log removido com sucesso" })))
}
