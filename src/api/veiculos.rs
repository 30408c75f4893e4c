//! Handlers de veículos
//!
//! CRUD de veículos, com filtro opcional por cliente.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::veiculo::{
        CreateVeiculoRequest, UpdateVeiculoRequest, Veiculo, VeiculoComCliente, VeiculoFiltros,
    },
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(criar))
        .route("/:id", get(buscar).put(atualizar).delete(remover))
}

pub async fn listar(
    State(state): State<AppState>,
    Query(filtros): Query<VeiculoFiltros>,
) -> AppResult<Json<Vec<VeiculoComCliente>>> {
    let veiculos = match filtros.cliente_id {
        Some(cliente_id) => {
            sqlx::query_as::<_, VeiculoComCliente>(
                r#"
                SELECT v.*, c.nome AS cliente_nome
                FROM veiculos v
                JOIN clientes c ON c.id = v.cliente_id
                WHERE v.cliente_id = $1
                ORDER BY v.created_at DESC
                "#,
            )
            .bind(cliente_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, VeiculoComCliente>(
                r#"
                SELECT v.*, c.nome AS cliente_nome
                FROM veiculos v
                JOIN clientes c ON c.id = v.cliente_id
                ORDER BY v.created_at DESC
                "#,
            )
            .fetch_all(&state.pool)
            .await?
        }
    };
    Ok(Json(veiculos))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Veiculo>> {
    let veiculo = sqlx::query_as::<_, Veiculo>("SELECT * FROM veiculos WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| nao_encontrado("Veículo", id))?;
    Ok(Json(veiculo))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreateVeiculoRequest>,
) -> AppResult<Json<Veiculo>> {
    dados.validate()?;

    let cliente: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM clientes WHERE id = $1")
        .bind(dados.cliente_id)
        .fetch_optional(&state.pool)
        .await?;
    if cliente.is_none() {
        return Err(nao_encontrado("Cliente", dados.cliente_id));
    }

    let veiculo = sqlx::query_as::<_, Veiculo>(
        r#"
        INSERT INTO veiculos (cliente_id, placa, marca, modelo, ano, motor, observacoes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(dados.cliente_id)
    .bind(&dados.placa)
    .bind(&dados.marca)
    .bind(&dados.modelo)
    .bind(&dados.ano)
    .bind(&dados.motor)
    .bind(&dados.observacoes)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("✅ Veículo criado: {:?} ({})", veiculo.placa, veiculo.id);
    Ok(Json(veiculo))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdateVeiculoRequest>,
) -> AppResult<Json<Veiculo>> {
    dados.validate()?;

    let veiculo = sqlx::query_as::<_, Veiculo>(
        r#"
        UPDATE veiculos SET
            placa = COALESCE($2, placa),
            marca = COALESCE($3, marca),
            modelo = COALESCE($4, modelo),
            ano = COALESCE($5, ano),
            motor = COALESCE($6, motor),
            observacoes = COALESCE($7, observacoes)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&dados.placa)
    .bind(&dados.marca)
    .bind(&dados.modelo)
    .bind(&dados.ano)
    .bind(&dados.motor)
    .bind(&dados.observacoes)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Veículo", id))?;

    Ok(Json(veiculo))
}

pub async fn remover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let resultado = sqlx::query("DELETE FROM veiculos WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if resultado.rows_affected() == 0 {
        return Err(nao_encontrado("Veículo", id));
    }

    Ok(Json(serde_json::json!({ "message": "Veículo removido com sucesso" })))
}
