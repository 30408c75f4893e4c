//! Handlers de pendências
//!
//! Obrigações combinadas com clientes. Status aberta/concluida com
//! transição livre, reabrir é permitido.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::pendencia::{
        CreatePendenciaRequest, Pendencia, PendenciaComCliente, UpdatePendenciaRequest,
    },
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(criar))
        .route("/:id", put(atualizar))
}

/// Lista todas as pendências com o nome do cliente, mais próximas primeiro
pub async fn listar(State(state): State<AppState>) -> AppResult<Json<Vec<PendenciaComCliente>>> {
    let pendencias = sqlx::query_as::<_, PendenciaComCliente>(
        r#"
        SELECT p.*, c.nome AS cliente_nome
        FROM pendencias p
        JOIN clientes c ON c.id = p.cliente_id
        ORDER BY p.data_prevista, p.created_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(pendencias))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreatePendenciaRequest>,
) -> AppResult<Json<Pendencia>> {
    dados.validate()?;

    let pendencia = sqlx::query_as::<_, Pendencia>(
        r#"
        INSERT INTO pendencias (cliente_id, ordem_servico_id, descricao, data_prevista, responsavel)
        VALUES ($1, $2, $3, $4, COALESCE($5, 'Admin'))
        RETURNING *
        "#,
    )
    .bind(dados.cliente_id)
    .bind(dados.ordem_servico_id)
    .bind(&dados.descricao)
    .bind(dados.data_prevista)
    .bind(&dados.responsavel)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("📌 Pendência criada: {} para {}", pendencia.id, pendencia.data_prevista);
    Ok(Json(pendencia))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdatePendenciaRequest>,
) -> AppResult<Json<Pendencia>> {
    dados.validate()?;

    let pendencia = sqlx::query_as::<_, Pendencia>(
        r#"
        UPDATE pendencias SET
            descricao = COALESCE($2, descricao),
            data_prevista = COALESCE($3, data_prevista),
            responsavel = COALESCE($4, responsavel),
            status = COALESCE($5, status)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&dados.descricao)
    .bind(dados.data_prevista)
    .bind(&dados.responsavel)
    .bind(&dados.status)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Pendência", id))?;

    Ok(Json(pendencia))
}
