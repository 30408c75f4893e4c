//! Situação financeira de uma ordem de serviço
//!
//! Classificação pura de (total, pago, vencimento) em um status de cobrança
//! e cálculo do total da OS a partir dos itens lançados.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Status de cobrança derivado — nunca persistido, sempre recalculado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFinanceiro {
    Pago,
    Aberto,
    Parcial,
    Atrasado,
}

impl StatusFinanceiro {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFinanceiro::Pago => "pago",
            StatusFinanceiro::Aberto => "aberto",
            StatusFinanceiro::Parcial => "parcial",
            StatusFinanceiro::Atrasado => "atrasado",
        }
    }
}

impl std::fmt::Display for StatusFinanceiro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classificar a situação de cobrança de uma OS.
///
/// Tabela de decisão avaliada de cima para baixo, primeira linha que casa
/// vence. Pagamento integral prevalece sobre atraso: OS quitada depois do
/// vencimento ainda é "pago". `hoje` é injetado pelo chamador para manter a
/// função pura.
pub fn classificar(
    total: Decimal,
    total_pago: Decimal,
    vencimento: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusFinanceiro {
    if total <= Decimal::ZERO {
        return StatusFinanceiro::Pago;
    }
    if total_pago <= Decimal::ZERO {
        if vencimento.map_or(false, |v| v < hoje) {
            return StatusFinanceiro::Atrasado;
        }
        return StatusFinanceiro::Aberto;
    }
    if total_pago >= total {
        return StatusFinanceiro::Pago;
    }
    if vencimento.map_or(false, |v| v < hoje) {
        return StatusFinanceiro::Atrasado;
    }
    StatusFinanceiro::Parcial
}

/// Total da OS: serviços + peças − desconto, com piso em zero.
///
/// O piso impede total negativo quando o desconto supera os itens; é
/// comportamento esperado, não erro.
pub fn total_ordem(servicos: &[Decimal], pecas: &[Decimal], desconto: Decimal) -> Decimal {
    let soma: Decimal = servicos.iter().sum::<Decimal>() + pecas.iter().sum::<Decimal>();
    (soma - desconto).max(Decimal::ZERO)
}

/// Saldo bruto da OS (pode ser negativo quando há pagamento a maior).
pub fn saldo(total: Decimal, total_pago: Decimal) -> Decimal {
    total - total_pago
}

/// Saldo devedor para somas agregadas: saldo negativo conta como zero.
pub fn saldo_devedor(total: Decimal, total_pago: Decimal) -> Decimal {
    saldo(total, total_pago).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dia(ano: i32, mes: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, d).unwrap()
    }

    const HOJE: fn() -> NaiveDate = || dia(2026, 2, 10);

    #[test]
    fn total_zero_e_sempre_pago() {
        assert_eq!(
            classificar(dec!(0), dec!(0), None, HOJE()),
            StatusFinanceiro::Pago
        );
        assert_eq!(
            classificar(dec!(0), dec!(50), None, HOJE()),
            StatusFinanceiro::Pago
        );
    }

    #[test]
    fn sem_pagamento_depende_do_vencimento() {
        let ontem = dia(2026, 2, 9);
        let amanha = dia(2026, 2, 11);
        assert_eq!(
            classificar(dec!(1000), dec!(0), Some(ontem), HOJE()),
            StatusFinanceiro::Atrasado
        );
        assert_eq!(
            classificar(dec!(1000), dec!(0), Some(amanha), HOJE()),
            StatusFinanceiro::Aberto
        );
        assert_eq!(
            classificar(dec!(1000), dec!(0), None, HOJE()),
            StatusFinanceiro::Aberto
        );
        // vencendo hoje ainda não está atrasado
        assert_eq!(
            classificar(dec!(1000), dec!(0), Some(HOJE()), HOJE()),
            StatusFinanceiro::Aberto
        );
    }

    #[test]
    fn quitacao_prevalece_sobre_atraso() {
        let ontem = dia(2026, 2, 9);
        assert_eq!(
            classificar(dec!(1000), dec!(1000), Some(ontem), HOJE()),
            StatusFinanceiro::Pago
        );
        // pagamento a maior também é pago
        assert_eq!(
            classificar(dec!(1000), dec!(1200), Some(ontem), HOJE()),
            StatusFinanceiro::Pago
        );
    }

    #[test]
    fn pagamento_parcial() {
        let ontem = dia(2026, 2, 9);
        let amanha = dia(2026, 2, 11);
        assert_eq!(
            classificar(dec!(1000), dec!(400), Some(ontem), HOJE()),
            StatusFinanceiro::Atrasado
        );
        assert_eq!(
            classificar(dec!(1000), dec!(400), Some(amanha), HOJE()),
            StatusFinanceiro::Parcial
        );
        assert_eq!(
            classificar(dec!(1000), dec!(400), None, HOJE()),
            StatusFinanceiro::Parcial
        );
    }

    #[test]
    fn total_com_desconto_maior_trava_em_zero() {
        assert_eq!(
            total_ordem(&[dec!(100), dec!(200)], &[dec!(50)], dec!(500)),
            Decimal::ZERO
        );
    }

    #[test]
    fn total_soma_servicos_e_pecas() {
        assert_eq!(
            total_ordem(&[dec!(1000)], &[dec!(500)], dec!(300)),
            dec!(1200)
        );
        assert_eq!(total_ordem(&[], &[], dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn saldo_bruto_e_devedor() {
        assert_eq!(saldo(dec!(1000), dec!(1200)), dec!(-200));
        assert_eq!(saldo_devedor(dec!(1000), dec!(1200)), Decimal::ZERO);
        assert_eq!(saldo_devedor(dec!(1000), dec!(400)), dec!(600));
    }
}
