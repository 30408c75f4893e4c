//! Handler do painel financeiro
//!
//! Contas a receber: só as OS com saldo em aberto, cada uma com a
//! situação derivada na leitura, mais os consolidados de total a
//! receber e total atrasado.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    domain::financeiro::{classificar, saldo, StatusFinanceiro},
    domain::moeda::formatar_valor,
    domain::relatorio::{total_a_receber, total_atrasado, OrdemFinanceira},
    state::AppState,
    utils::errors::AppResult,
};

pub fn criar_router() -> Router<AppState> {
    Router::new().route("/", get(painel))
}

/// Linha crua do banco com os agregados de cobrança de uma OS
#[derive(Debug, FromRow)]
pub struct LinhaFinanceira {
    pub id: Uuid,
    pub cliente_nome: String,
    pub total: Decimal,
    pub total_pago: Decimal,
    pub data_entrada: DateTime<Utc>,
    pub vencimento: Option<NaiveDate>,
}

/// Uma conta a receber no painel
#[derive(Debug, Serialize)]
pub struct ContaReceber {
    pub ordem_id: Uuid,
    pub cliente_nome: String,
    pub total: Decimal,
    pub total_pago: Decimal,
    pub saldo: Decimal,
    pub vencimento: Option<NaiveDate>,
    pub status_financeiro: StatusFinanceiro,
}

#[derive(Debug, Serialize)]
pub struct FinanceiroResponse {
    pub contas: Vec<ContaReceber>,
    pub total_a_receber: Decimal,
    pub total_a_receber_formatado: String,
    pub total_atrasado: Decimal,
    pub total_atrasado_formatado: String,
}

/// Busca a projeção financeira de todas as OS, para os fechamentos
pub async fn buscar_ordens_financeiras(pool: &PgPool) -> AppResult<Vec<OrdemFinanceira>> {
    let linhas = sqlx::query_as::<_, LinhaFinanceira>(
        r#"
        SELECT o.id, c.nome AS cliente_nome, o.total,
               COALESCE((SELECT SUM(p.valor) FROM pagamentos p
                         WHERE p.ordem_servico_id = o.id), 0) AS total_pago,
               o.data_entrada, o.vencimento
        FROM ordens_servico o
        JOIN clientes c ON c.id = o.cliente_id
        ORDER BY o.data_entrada DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(linhas
        .into_iter()
        .map(|l| OrdemFinanceira {
            id: l.id,
            cliente: Some(l.cliente_nome),
            total: l.total,
            total_pago: l.total_pago,
            data_entrada: l.data_entrada,
            vencimento: l.vencimento,
        })
        .collect())
}

/// Painel financeiro: contas em aberto e consolidados
pub async fn painel(State(state): State<AppState>) -> AppResult<Json<FinanceiroResponse>> {
    let linhas = sqlx::query_as::<_, LinhaFinanceira>(
        r#"
        SELECT o.id, c.nome AS cliente_nome, o.total,
               COALESCE((SELECT SUM(p.valor) FROM pagamentos p
                         WHERE p.ordem_servico_id = o.id), 0) AS total_pago,
               o.data_entrada, o.vencimento
        FROM ordens_servico o
        JOIN clientes c ON c.id = o.cliente_id
        ORDER BY o.vencimento NULLS LAST, o.data_entrada DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let hoje = Utc::now().date_naive();
    Ok(Json(montar_painel(linhas, hoje)))
}

/// Monta o painel a partir das linhas do banco: OS quitadas (e com
/// pagamento a maior) ficam fora da lista, os consolidados grampeiam
/// saldo negativo em zero.
fn montar_painel(linhas: Vec<LinhaFinanceira>, hoje: NaiveDate) -> FinanceiroResponse {
    let ordens: Vec<OrdemFinanceira> = linhas
        .iter()
        .map(|l| OrdemFinanceira {
            id: l.id,
            cliente: Some(l.cliente_nome.clone()),
            total: l.total,
            total_pago: l.total_pago,
            data_entrada: l.data_entrada,
            vencimento: l.vencimento,
        })
        .collect();
    let a_receber = total_a_receber(&ordens);
    let atrasado = total_atrasado(&ordens, hoje);

    let contas = linhas
        .into_iter()
        .filter(|l| saldo(l.total, l.total_pago) > Decimal::ZERO)
        .map(|l| ContaReceber {
            saldo: saldo(l.total, l.total_pago),
            status_financeiro: classificar(l.total, l.total_pago, l.vencimento, hoje),
            ordem_id: l.id,
            cliente_nome: l.cliente_nome,
            total: l.total,
            total_pago: l.total_pago,
            vencimento: l.vencimento,
        })
        .collect();

    FinanceiroResponse {
        contas,
        total_a_receber: a_receber,
        total_a_receber_formatado: formatar_valor(a_receber),
        total_atrasado: atrasado,
        total_atrasado_formatado: formatar_valor(atrasado),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn linha(
        total: Decimal,
        pago: Decimal,
        vencimento: Option<NaiveDate>,
    ) -> LinhaFinanceira {
        LinhaFinanceira {
            id: Uuid::new_v4(),
            cliente_nome: "Cliente".to_string(),
            total,
            total_pago: pago,
            data_entrada: "2026-02-01T12:00:00Z".parse().unwrap(),
            vencimento,
        }
    }

    #[test]
    fn painel_lista_so_contas_com_saldo_em_aberto() {
        let hoje = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let linhas = vec![
            linha(dec!(1000), dec!(1000), None), // quitada, fora
            linha(dec!(1000), dec!(1200), None), // a maior, fora
            linha(dec!(500), dec!(200), None),   // saldo 300
        ];

        let painel = montar_painel(linhas, hoje);
        assert_eq!(painel.contas.len(), 1);
        assert_eq!(painel.contas[0].saldo, dec!(300));
        assert_eq!(painel.total_a_receber, dec!(300));
    }

    #[test]
    fn painel_consolida_total_atrasado_separado() {
        let hoje = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let ontem = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        let amanha = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
        let linhas = vec![
            linha(dec!(1000), dec!(400), Some(ontem)), // atrasada, saldo 600
            linha(dec!(500), dec!(0), Some(amanha)),   // aberta, saldo 500
        ];

        let painel = montar_painel(linhas, hoje);
        assert_eq!(painel.contas.len(), 2);
        assert_eq!(painel.total_a_receber, dec!(1100));
        assert_eq!(painel.total_atrasado, dec!(600));
        assert_eq!(painel.total_atrasado_formatado, "600,00");
    }
}
