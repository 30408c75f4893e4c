//! Handlers de estoque
//!
//! Cadastro de peças e histórico de compras. Registrar uma compra
//! incrementa a quantidade da peça na mesma transação. Código de peça
//! é único, duplicado responde 409.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::moeda::parse_valor,
    models::estoque::{
        CompraFiltros, CreateCompraRequest, CreatePecaRequest, EstoquePeca, EstoquePecaResponse,
        HistoricoCompra, UpdatePecaRequest,
    },
    state::AppState,
    utils::errors::{nao_encontrado, AppError, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/pecas", get(listar_pecas).post(criar_peca))
        .route(
            "/pecas/:id",
            get(buscar_peca).put(atualizar_peca).delete(remover_peca),
        )
        .route("/compras", get(listar_compras).post(registrar_compra))
}

/// Lista as peças com o alerta de estoque baixo derivado
pub async fn listar_pecas(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EstoquePecaResponse>>> {
    let pecas = sqlx::query_as::<_, EstoquePeca>("SELECT * FROM estoque_pecas ORDER BY nome")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(pecas.into_iter().map(EstoquePecaResponse::from).collect()))
}

pub async fn buscar_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EstoquePecaResponse>> {
    let peca = sqlx::query_as::<_, EstoquePeca>("SELECT * FROM estoque_pecas WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| nao_encontrado("Peça", id))?;
    Ok(Json(EstoquePecaResponse::from(peca)))
}

pub async fn criar_peca(
    State(state): State<AppState>,
    Json(dados): Json<CreatePecaRequest>,
) -> AppResult<Json<EstoquePecaResponse>> {
    dados.validate()?;

    let duplicada: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM estoque_pecas WHERE codigo = $1")
            .bind(&dados.codigo)
            .fetch_optional(&state.pool)
            .await?;
    if duplicada.is_some() {
        return Err(AppError::Conflict(format!(
            "Peça com código '{}' já cadastrada",
            dados.codigo
        )));
    }

    let preco_custo = dados.preco_custo.as_deref().map(parse_valor).unwrap_or(Decimal::ZERO);
    let preco_venda = dados.preco_venda.as_deref().map(parse_valor).unwrap_or(Decimal::ZERO);

    let peca = sqlx::query_as::<_, EstoquePeca>(
        r#"
        INSERT INTO estoque_pecas
            (codigo, nome, fornecedor, preco_custo, preco_venda, quantidade, quantidade_minima)
        VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 1))
        RETURNING *
        "#,
    )
    .bind(&dados.codigo)
    .bind(&dados.nome)
    .bind(&dados.fornecedor)
    .bind(preco_custo)
    .bind(preco_venda)
    .bind(dados.quantidade)
    .bind(dados.quantidade_minima)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("🔧 Peça cadastrada: {} ({})", peca.nome, peca.codigo);
    Ok(Json(EstoquePecaResponse::from(peca)))
}

pub async fn atualizar_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdatePecaRequest>,
) -> AppResult<Json<EstoquePecaResponse>> {
    dados.validate()?;

    if let Some(codigo) = dados.codigo.as_deref() {
        let duplicada: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM estoque_pecas WHERE codigo = $1 AND id <> $2")
                .bind(codigo)
                .bind(id)
                .fetch_optional(&state.pool)
                .await?;
        if duplicada.is_some() {
            return Err(AppError::Conflict(format!(
                "Peça com código '{}' já cadastrada",
                codigo
            )));
        }
    }

    let preco_custo = dados.preco_custo.as_deref().map(parse_valor);
    let preco_venda = dados.preco_venda.as_deref().map(parse_valor);

    let peca = sqlx::query_as::<_, EstoquePeca>(
        r#"
        UPDATE estoque_pecas SET
            codigo = COALESCE($2, codigo),
            nome = COALESCE($3, nome),
            fornecedor = COALESCE($4, fornecedor),
            preco_custo = COALESCE($5, preco_custo),
            preco_venda = COALESCE($6, preco_venda),
            quantidade = COALESCE($7, quantidade),
            quantidade_minima = COALESCE($8, quantidade_minima),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&dados.codigo)
    .bind(&dados.nome)
    .bind(&dados.fornecedor)
    .bind(preco_custo)
    .bind(preco_venda)
    .bind(dados.quantidade)
    .bind(dados.quantidade_minima)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Peça", id))?;

    Ok(Json(EstoquePecaResponse::from(peca)))
}

pub async fn remover_peca(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let resultado = sqlx::query("DELETE FROM estoque_pecas WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if resultado.rows_affected() == 0 {
        return Err(nao_encontrado("Peça", id));
    }

    Ok(Json(serde_json::json!({ "message": "Peça removida com sucesso" })))
}

/// Histórico de compras, opcionalmente filtrado por peça
pub async fn listar_compras(
    State(state): State<AppState>,
    Query(filtros): Query<CompraFiltros>,
) -> AppResult<Json<Vec<HistoricoCompra>>> {
    let compras = match filtros.peca_id {
        Some(peca_id) => {
            sqlx::query_as::<_, HistoricoCompra>(
                "SELECT * FROM historico_compras WHERE peca_id = $1 ORDER BY data_compra DESC",
            )
            .bind(peca_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, HistoricoCompra>(
                "SELECT * FROM historico_compras ORDER BY data_compra DESC",
            )
            .fetch_all(&state.pool)
            .await?
        }
    };
    Ok(Json(compras))
}

/// Registra uma compra e incrementa o estoque da peça na mesma transação.
/// A peça é travada com FOR UPDATE para o incremento não se perder.
pub async fn registrar_compra(
    State(state): State<AppState>,
    Json(dados): Json<CreateCompraRequest>,
) -> AppResult<Json<HistoricoCompra>> {
    dados.validate()?;

    let valor_pago = dados.valor_pago.as_deref().map(parse_valor).unwrap_or(Decimal::ZERO);

    let mut tx = state.pool.begin().await?;

    let peca: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM estoque_pecas WHERE id = $1 FOR UPDATE")
            .bind(dados.peca_id)
            .fetch_optional(&mut *tx)
            .await?;
    if peca.is_none() {
        return Err(nao_encontrado("Peça", dados.peca_id));
    }

    let compra = sqlx::query_as::<_, HistoricoCompra>(
        r#"
        INSERT INTO historico_compras (peca_id, quantidade, valor_pago, fornecedor)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(dados.peca_id)
    .bind(dados.quantidade)
    .bind(valor_pago)
    .bind(&dados.fornecedor)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE estoque_pecas SET quantidade = quantidade + $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(dados.peca_id)
    .bind(dados.quantidade)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("📦 Compra registrada: {} x{}", compra.peca_id, compra.quantidade);
    Ok(Json(compra))
}
