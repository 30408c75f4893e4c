//! Visões agregadas para dashboard e relatórios
//!
//! Ranking de devedores e fechamento mensal (faturamento, a receber,
//! despesas, lucro). Funções puras sobre coleções já buscadas; quem busca
//! e quem exibe são os handlers.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::financeiro::{classificar, saldo, saldo_devedor, StatusFinanceiro};

/// Projeção financeira de uma OS, o que os fechamentos precisam dela.
#[derive(Debug, Clone)]
pub struct OrdemFinanceira {
    pub id: Uuid,
    pub cliente: Option<String>,
    pub total: Decimal,
    pub total_pago: Decimal,
    pub data_entrada: DateTime<Utc>,
    pub vencimento: Option<NaiveDate>,
}

/// Uma posição no ranking de devedores.
#[derive(Debug, Serialize)]
pub struct Devedor {
    pub ordem_id: Uuid,
    pub cliente: Option<String>,
    pub total: Decimal,
    pub total_pago: Decimal,
    pub saldo: Decimal,
}

/// Indicadores do fechamento de um mês.
///
/// Faturamento é caixa recebido (pagamentos de OS que entraram no mês), não
/// valor faturado; o faturado-e-não-pago aparece em `a_receber`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResumoMensal {
    pub faturamento: Decimal,
    pub a_receber: Decimal,
    pub despesas: Decimal,
    pub lucro: Decimal,
}

/// Despesa já projetada para o fechamento mensal.
#[derive(Debug, Clone)]
pub struct LancamentoDespesa {
    pub data: NaiveDate,
    pub valor: Decimal,
}

/// Ranking de maiores devedores: só OS com saldo positivo, ordem decrescente
/// de saldo, limitado a `limite` posições. A ordenação é estável, empates
/// preservam a ordem de chegada.
pub fn maiores_devedores(ordens: &[OrdemFinanceira], limite: usize) -> Vec<Devedor> {
    let mut devedores: Vec<Devedor> = ordens
        .iter()
        .filter(|o| saldo(o.total, o.total_pago) > Decimal::ZERO)
        .map(|o| Devedor {
            ordem_id: o.id,
            cliente: o.cliente.clone(),
            total: o.total,
            total_pago: o.total_pago,
            saldo: saldo(o.total, o.total_pago),
        })
        .collect();
    devedores.sort_by(|a, b| b.saldo.cmp(&a.saldo));
    devedores.truncate(limite);
    devedores
}

/// Fechamento de um mês: OS particionadas pelo ano-mês da data de entrada,
/// despesas pelo ano-mês da data.
pub fn resumo_mensal(
    ordens: &[OrdemFinanceira],
    despesas: &[LancamentoDespesa],
    ano: i32,
    mes: u32,
) -> ResumoMensal {
    let do_mes = |d: NaiveDate| d.year() == ano && d.month() == mes;

    let ordens_do_mes: Vec<&OrdemFinanceira> = ordens
        .iter()
        .filter(|o| do_mes(o.data_entrada.date_naive()))
        .collect();

    let faturamento: Decimal = ordens_do_mes.iter().map(|o| o.total_pago).sum();
    let faturado: Decimal = ordens_do_mes.iter().map(|o| o.total).sum();
    let total_despesas: Decimal = despesas
        .iter()
        .filter(|d| do_mes(d.data))
        .map(|d| d.valor)
        .sum();

    ResumoMensal {
        faturamento,
        a_receber: faturado - faturamento,
        despesas: total_despesas,
        lucro: faturamento - total_despesas,
    }
}

/// Soma de saldos devedores (negativos contam como zero) — o "total a
/// receber" exibido nos painéis.
pub fn total_a_receber(ordens: &[OrdemFinanceira]) -> Decimal {
    ordens
        .iter()
        .map(|o| saldo_devedor(o.total, o.total_pago))
        .sum()
}

/// Soma dos saldos devedores só das OS atrasadas, o "total atrasado" do
/// painel financeiro. Mesmo grampo em zero do total a receber.
pub fn total_atrasado(ordens: &[OrdemFinanceira], hoje: NaiveDate) -> Decimal {
    ordens
        .iter()
        .filter(|o| {
            classificar(o.total, o.total_pago, o.vencimento, hoje) == StatusFinanceiro::Atrasado
        })
        .map(|o| saldo_devedor(o.total, o.total_pago))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ordem(total: Decimal, pago: Decimal, data: &str) -> OrdemFinanceira {
        OrdemFinanceira {
            id: Uuid::new_v4(),
            cliente: Some("Cliente".to_string()),
            total,
            total_pago: pago,
            data_entrada: format!("{}T12:00:00Z", data).parse().unwrap(),
            vencimento: None,
        }
    }

    #[test]
    fn fechamento_do_mes() {
        // OS A: fev, total 1000 pago 1000; OS B: fev, total 500 pago 200
        let ordens = vec![
            ordem(dec!(1000), dec!(1000), "2026-02-01"),
            ordem(dec!(500), dec!(200), "2026-02-15"),
            ordem(dec!(900), dec!(900), "2026-01-20"), // fora do mês
        ];
        let despesas = vec![
            LancamentoDespesa {
                data: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
                valor: dec!(300),
            },
            LancamentoDespesa {
                data: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                valor: dec!(9999),
            },
        ];
        let resumo = resumo_mensal(&ordens, &despesas, 2026, 2);
        assert_eq!(resumo.faturamento, dec!(1200));
        assert_eq!(resumo.a_receber, dec!(300));
        assert_eq!(resumo.despesas, dec!(300));
        assert_eq!(resumo.lucro, dec!(900));
    }

    #[test]
    fn mes_sem_movimento_zera_tudo() {
        let resumo = resumo_mensal(&[], &[], 2026, 3);
        assert_eq!(
            resumo,
            ResumoMensal {
                faturamento: Decimal::ZERO,
                a_receber: Decimal::ZERO,
                despesas: Decimal::ZERO,
                lucro: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn ranking_decrescente_sem_saldo_zero() {
        let ordens = vec![
            ordem(dec!(100), dec!(100), "2026-02-01"), // quitada, fora
            ordem(dec!(500), dec!(100), "2026-02-01"), // saldo 400
            ordem(dec!(300), dec!(0), "2026-02-01"),   // saldo 300
            ordem(dec!(100), dec!(150), "2026-02-01"), // a maior, fora
            ordem(dec!(2000), dec!(100), "2026-02-01"), // saldo 1900
        ];
        let ranking = maiores_devedores(&ordens, 5);
        let saldos: Vec<Decimal> = ranking.iter().map(|d| d.saldo).collect();
        assert_eq!(saldos, vec![dec!(1900), dec!(400), dec!(300)]);
    }

    #[test]
    fn ranking_respeita_o_limite_e_e_estavel() {
        let a = ordem(dec!(500), dec!(200), "2026-02-01"); // saldo 300
        let b = ordem(dec!(400), dec!(100), "2026-02-02"); // saldo 300
        let c = ordem(dec!(300), dec!(0), "2026-02-03"); // saldo 300
        let (id_a, id_b) = (a.id, b.id);
        let ranking = maiores_devedores(&[a, b, c], 2);
        assert_eq!(ranking.len(), 2);
        // empate mantém ordem de chegada
        assert_eq!(ranking[0].ordem_id, id_a);
        assert_eq!(ranking[1].ordem_id, id_b);
    }

    #[test]
    fn total_atrasado_soma_so_as_vencidas() {
        let hoje = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let ontem = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        let amanha = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();

        let vencida = OrdemFinanceira {
            vencimento: Some(ontem),
            ..ordem(dec!(1000), dec!(400), "2026-02-01")
        };
        let em_dia = OrdemFinanceira {
            vencimento: Some(amanha),
            ..ordem(dec!(500), dec!(0), "2026-02-01")
        };
        // quitada depois do vencimento é "pago", não atrasada
        let quitada_tarde = OrdemFinanceira {
            vencimento: Some(ontem),
            ..ordem(dec!(300), dec!(300), "2026-02-01")
        };

        assert_eq!(
            total_atrasado(&[vencida, em_dia, quitada_tarde], hoje),
            dec!(600)
        );
    }

    #[test]
    fn total_a_receber_ignora_pagamento_a_maior() {
        let ordens = vec![
            ordem(dec!(1000), dec!(1200), "2026-02-01"), // saldo -200 vira 0
            ordem(dec!(500), dec!(200), "2026-02-01"),   // saldo 300
        ];
        assert_eq!(total_a_receber(&ordens), dec!(300));
    }
}
