//! Handlers de despesas
//!
//! Lançamentos de saída de caixa da oficina (aluguel, peças avulsas,
//! contas). Só listagem e criação.

use axum::{extract::State, routing::get, Json, Router};
use validator::Validate;

use crate::{
    domain::moeda::parse_valor,
    models::despesa::{CreateDespesaRequest, Despesa},
    state::AppState,
    utils::errors::AppResult,
};

pub fn criar_router() -> Router<AppState> {
    Router::new().route("/", get(listar).post(criar))
}

pub async fn listar(State(state): State<AppState>) -> AppResult<Json<Vec<Despesa>>> {
    let despesas = sqlx::query_as::<_, Despesa>("SELECT * FROM despesas ORDER BY data DESC")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(despesas))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreateDespesaRequest>,
) -> AppResult<Json<Despesa>> {
    dados.validate()?;

    let valor = parse_valor(&dados.valor);

    let despesa = sqlx::query_as::<_, Despesa>(
        r#"
        INSERT INTO despesas (descricao, categoria, valor, data)
        VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
        RETURNING *
        "#,
    )
    .bind(&dados.descricao)
    .bind(&dados.categoria)
    .bind(valor)
    .bind(dados.data)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("💸 Despesa lançada: {} ({})", despesa.descricao, despesa.valor);
    Ok(Json(despesa))
}
