//! Handler do dashboard
//!
//! Visão do dia da oficina: agendamentos de hoje, OS em andamento,
//! fechamento do mês corrente, maiores devedores e pendências abertas.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::{
    api::financeiro::buscar_ordens_financeiras,
    domain::relatorio::{maiores_devedores, resumo_mensal, Devedor, ResumoMensal},
    models::agendamento::AgendamentoComNomes,
    models::pendencia::PendenciaComCliente,
    state::AppState,
    utils::errors::AppResult,
};

const LIMITE_DEVEDORES: usize = 5;

pub fn criar_router() -> Router<AppState> {
    Router::new().route("/", get(painel))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub agendamentos_hoje: Vec<AgendamentoComNomes>,
    pub ordens_em_andamento: i64,
    pub resumo_mes: ResumoMensal,
    pub maiores_devedores: Vec<Devedor>,
    pub pendencias_abertas: Vec<PendenciaComCliente>,
}

pub async fn painel(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let agendamentos_hoje = sqlx::query_as::<_, AgendamentoComNomes>(
        r#"
        SELECT a.*,
               c.nome AS cliente_nome,
               v.placa AS veiculo_placa,
               v.marca AS veiculo_marca,
               v.modelo AS veiculo_modelo
        FROM agendamentos a
        JOIN clientes c ON c.id = a.cliente_id
        LEFT JOIN veiculos v ON v.id = a.veiculo_id
        WHERE a.data_hora::date = CURRENT_DATE
          AND a.status <> 'cancelado'
        ORDER BY a.data_hora
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let (ordens_em_andamento,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM ordens_servico WHERE status = 'em andamento'",
    )
    .fetch_one(&state.pool)
    .await?;

    let ordens = buscar_ordens_financeiras(&state.pool).await?;
    let hoje = Utc::now().date_naive();
    let resumo_mes = resumo_mensal(&ordens, &buscar_despesas(&state).await?, hoje.year(), hoje.month());
    let devedores = maiores_devedores(&ordens, LIMITE_DEVEDORES);

    let pendencias_abertas = sqlx::query_as::<_, PendenciaComCliente>(
        r#"
        SELECT p.*, c.nome AS cliente_nome
        FROM pendencias p
        JOIN clientes c ON c.id = p.cliente_id
        WHERE p.status = 'aberta'
        ORDER BY p.data_prevista, p.created_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(DashboardResponse {
        agendamentos_hoje,
        ordens_em_andamento,
        resumo_mes,
        maiores_devedores: devedores,
        pendencias_abertas,
    }))
}

async fn buscar_despesas(
    state: &AppState,
) -> AppResult<Vec<crate::domain::relatorio::LancamentoDespesa>> {
    let linhas: Vec<(chrono::NaiveDate, rust_decimal::Decimal)> =
        sqlx::query_as("SELECT data, valor FROM despesas")
            .fetch_all(&state.pool)
            .await?;
    Ok(linhas
        .into_iter()
        .map(|(data, valor)| crate::domain::relatorio::LancamentoDespesa { data, valor })
        .collect())
}
