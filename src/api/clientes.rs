//! Handlers de clientes
//!
//! CRUD de clientes e consulta dos logs de atendimento de um cliente.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::cliente::{Cliente, CreateClienteRequest, UpdateClienteRequest},
    models::log_atendimento::LogAtendimento,
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(criar))
        .route("/:id", get(buscar).put(atualizar).delete(remover))
        .route("/:id/logs", get(listar_logs))
}

pub async fn listar(State(state): State<AppState>) -> AppResult<Json<Vec<Cliente>>> {
    let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY nome")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(clientes))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Cliente>> {
    let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| nao_encontrado("Cliente", id))?;
    Ok(Json(cliente))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreateClienteRequest>,
) -> AppResult<Json<Cliente>> {
    dados.validate()?;

    let cliente = sqlx::query_as::<_, Cliente>(
        r#"
        INSERT INTO clientes
            (nome, telefone, whatsapp, email, cpf_cnpj, cep, endereco,
             numero, complemento, bairro, cidade, estado)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(&dados.nome)
    .bind(&dados.telefone)
    .bind(&dados.whatsapp)
    .bind(&dados.email)
    .bind(&dados.cpf_cnpj)
    .bind(&dados.cep)
    .bind(&dados.endereco)
    .bind(&dados.numero)
    .bind(&dados.complemento)
    .bind(&dados.bairro)
    .bind(&dados.cidade)
    .bind(&dados.estado)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("✅ Cliente criado: {} ({})", cliente.nome, cliente.id);
    Ok(Json(cliente))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdateClienteRequest>,
) -> AppResult<Json<Cliente>> {
    dados.validate()?;

    let cliente = sqlx::query_as::<_, Cliente>(
        r#"
        UPDATE clientes SET
            nome = COALESCE($2, nome),
            telefone = COALESCE($3, telefone),
            whatsapp = COALESCE($4, whatsapp),
            email = COALESCE($5, email),
            cpf_cnpj = COALESCE($6, cpf_cnpj),
            cep = COALESCE($7, cep),
            endereco = COALESCE($8, endereco),
            numero = COALESCE($9, numero),
            complemento = COALESCE($10, complemento),
            bairro = COALESCE($11, bairro),
            cidade = COALESCE($12, cidade),
            estado = COALESCE($13, estado)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&dados.nome)
    .bind(&dados.telefone)
    .bind(&dados.whatsapp)
    .bind(&dados.email)
    .bind(&dados.cpf_cnpj)
    .bind(&dados.cep)
    .bind(&dados.endereco)
    .bind(&dados.numero)
    .bind(&dados.complemento)
    .bind(&dados.bairro)
    .bind(&dados.cidade)
    .bind(&dados.estado)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Cliente", id))?;

    Ok(Json(cliente))
}

pub async fn remover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let resultado = sqlx::query("DELETE FROM clientes WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if resultado.rows_affected() == 0 {
        return Err(nao_encontrado("Cliente", id));
    }

    tracing::info!("🗑️ Cliente removido: {}", id);
    Ok(Json(serde_json::json!({ "message": "Cliente removido com sucesso" })))
}

/// Histórico de logs de atendimento do cliente, mais recentes primeiro
pub async fn listar_logs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<LogAtendimento>>> {
    let existe: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM clientes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    if existe.is_none() {
        return Err(nao_encontrado("Cliente", id));
    }

    let logs = sqlx::query_as::<_, LogAtendimento>(
        "SELECT * FROM logs_atendimento WHERE cliente_id = $1 ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(logs))
}
