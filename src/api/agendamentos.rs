//! Handlers de agendamentos
//!
//! CRUD da agenda da oficina, listagem com nomes de cliente e veículo.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::agendamento::{
        Agendamento, AgendamentoComNomes, CreateAgendamentoRequest, UpdateAgendamentoRequest,
    },
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(criar))
        .route("/:id", get(buscar).put(atualizar).delete(remover))
}

pub async fn listar(State(state): State<AppState>) -> AppResult<Json<Vec<AgendamentoComNomes>>> {
    let agendamentos = sqlx::query_as::<_, AgendamentoComNomes>(
        r#"
        SELECT a.*,
               c.nome AS cliente_nome,
               v.placa AS veiculo_placa,
               v.marca AS veiculo_marca,
               v.modelo AS veiculo_modelo
        FROM agendamentos a
        JOIN clientes c ON c.id = a.cliente_id
        LEFT JOIN veiculos v ON v.id = a.veiculo_id
        ORDER BY a.data_hora
        "#,
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(agendamentos))
}

pub async fn buscar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Agendamento>> {
    let agendamento =
        sqlx::query_as::<_, Agendamento>("SELECT * FROM agendamentos WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or_else(|| nao_encontrado("Agendamento", id))?;
    Ok(Json(agendamento))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<CreateAgendamentoRequest>,
) -> AppResult<Json<Agendamento>> {
    dados.validate()?;

    let agendamento = sqlx::query_as::<_, Agendamento>(
        r#"
        INSERT INTO agendamentos (cliente_id, veiculo_id, data_hora, servico_resumo, observacoes, status)
        VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'agendado'))
        RETURNING *
        "#,
    )
    .bind(dados.cliente_id)
    .bind(dados.veiculo_id)
    .bind(dados.data_hora)
    .bind(&dados.servico_resumo)
    .bind(&dados.observacoes)
    .bind(&dados.status)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("📅 Agendamento criado: {} em {}", agendamento.id, agendamento.data_hora);
    Ok(Json(agendamento))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<UpdateAgendamentoRequest>,
) -> AppResult<Json<Agendamento>> {
    dados.validate()?;

    let agendamento = sqlx::query_as::<_, Agendamento>(
        r#"
        UPDATE agendamentos SET
            veiculo_id = COALESCE($2, veiculo_id),
            data_hora = COALESCE($3, data_hora),
            servico_resumo = COALESCE($4, servico_resumo),
            observacoes = COALESCE($5, observacoes),
            status = COALESCE($6, status)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(dados.veiculo_id)
    .bind(dados.data_hora)
    .bind(&dados.servico_resumo)
    .bind(&dados.observacoes)
    .bind(&dados.status)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| nao_encontrado("Agendamento", id))?;

    Ok(Json(agendamento))
}

pub async fn remover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let resultado = sqlx::query("DELETE FROM agendamentos WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if resultado.rows_affected() == 0 {
        return Err(nao_encontrado("Agendamento", id));
    }

    Ok(Json(serde_json::json!({ "message": "Agendamento removido com sucesso" })))
}
