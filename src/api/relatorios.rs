//! Handler de relatórios
//!
//! Fechamento mensal: faturamento (caixa que entrou), a receber, despesas
//! e lucro do mês pedido, os valores também formatados em pt-BR e a lista
//! das despesas lançadas no mês.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{
    api::financeiro::buscar_ordens_financeiras,
    domain::moeda::formatar_valor,
    domain::relatorio::{resumo_mensal, LancamentoDespesa, OrdemFinanceira, ResumoMensal},
    models::despesa::Despesa,
    state::AppState,
    utils::errors::{AppError, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new().route("/mensal", get(mensal))
}

#[derive(Debug, Deserialize)]
pub struct PeriodoQuery {
    pub ano: i32,
    pub mes: u32,
}

#[derive(Debug, Serialize)]
pub struct ResumoFormatado {
    pub faturamento: String,
    pub a_receber: String,
    pub despesas: String,
    pub lucro: String,
}

#[derive(Debug, Serialize)]
pub struct RelatorioMensalResponse {
    pub ano: i32,
    pub mes: u32,
    #[serde(flatten)]
    pub resumo: ResumoMensal,
    pub formatado: ResumoFormatado,
    pub despesas_do_mes: Vec<Despesa>,
}

/// Fechamento de um mês (ano e mês obrigatórios na query)
pub async fn mensal(
    State(state): State<AppState>,
    Query(periodo): Query<PeriodoQuery>,
) -> AppResult<Json<RelatorioMensalResponse>> {
    if !(1..=12).contains(&periodo.mes) {
        return Err(AppError::BadRequest(format!(
            "Mês inválido: {} (esperado 1 a 12)",
            periodo.mes
        )));
    }

    let ordens = buscar_ordens_financeiras(&state.pool).await?;

    let despesas = sqlx::query_as::<_, Despesa>("SELECT * FROM despesas ORDER BY data")
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(montar_relatorio(ordens, despesas, periodo.ano, periodo.mes)))
}

/// Monta o fechamento: indicadores sobre todas as OS e os lançamentos de
/// despesa restritos ao mês pedido.
fn montar_relatorio(
    ordens: Vec<OrdemFinanceira>,
    despesas: Vec<Despesa>,
    ano: i32,
    mes: u32,
) -> RelatorioMensalResponse {
    let despesas_do_mes: Vec<Despesa> = despesas
        .into_iter()
        .filter(|d| d.data.year() == ano && d.data.month() == mes)
        .collect();

    let lancamentos: Vec<LancamentoDespesa> = despesas_do_mes
        .iter()
        .map(|d| LancamentoDespesa {
            data: d.data,
            valor: d.valor,
        })
        .collect();

    let resumo = resumo_mensal(&ordens, &lancamentos, ano, mes);
    let formatado = ResumoFormatado {
        faturamento: formatar_valor(resumo.faturamento),
        a_receber: formatar_valor(resumo.a_receber),
        despesas: formatar_valor(resumo.despesas),
        lucro: formatar_valor(resumo.lucro),
    };

    RelatorioMensalResponse {
        ano,
        mes,
        resumo,
        formatado,
        despesas_do_mes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn despesa(data: &str, valor: rust_decimal::Decimal) -> Despesa {
        Despesa {
            id: Uuid::new_v4(),
            descricao: "Despesa".to_string(),
            categoria: None,
            valor,
            data: data.parse::<NaiveDate>().unwrap(),
            created_at: format!("{}T12:00:00Z", data).parse().unwrap(),
        }
    }

    #[test]
    fn relatorio_traz_as_despesas_do_mes() {
        let despesas = vec![
            despesa("2026-02-05", dec!(300)),
            despesa("2026-02-20", dec!(150)),
            despesa("2026-01-05", dec!(9999)), // fora do mês
        ];

        let relatorio = montar_relatorio(vec![], despesas, 2026, 2);

        assert_eq!(relatorio.despesas_do_mes.len(), 2);
        assert!(relatorio
            .despesas_do_mes
            .iter()
            .all(|d| d.data.month() == 2));
        // os indicadores fecham com os mesmos lançamentos listados
        assert_eq!(relatorio.resumo.despesas, dec!(450));
        assert_eq!(relatorio.formatado.despesas, "450,00");
    }

    #[test]
    fn mes_sem_despesas_lista_vazia() {
        let relatorio = montar_relatorio(vec![], vec![despesa("2026-01-05", dec!(100))], 2026, 3);
        assert!(relatorio.despesas_do_mes.is_empty());
        assert_eq!(relatorio.resumo.despesas, rust_decimal::Decimal::ZERO);
    }
}
