//! Codec de valores monetários em formato brasileiro
//!
//! Converte entre strings com vírgula decimal ("1.500,50") e valores
//! numéricos, além de sanear a digitação campo a campo nos formulários.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Sanear o texto digitado em um campo monetário, tecla a tecla.
///
/// Mantém apenas dígitos e vírgula, trata a primeira vírgula como separador
/// decimal (vírgulas seguintes são descartadas e seus dígitos anexados à
/// fração), limita a fração a 2 dígitos, remove zeros à esquerda e insere
/// pontos de milhar a cada 3 dígitos.
pub fn sanitizar_entrada(bruto: &str) -> String {
    let mut texto = bruto.to_string();

    // Ponto solitário no fim vale como tecla de separador decimal
    // (teclado numérico usa ponto em vez de vírgula)
    if texto.matches('.').count() == 1 && !texto.contains(',') && texto.ends_with('.') {
        texto = texto.replace('.', ",");
    }

    let filtrado: String = texto
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    let (mut inteiro, fracao, tem_virgula) = match filtrado.find(',') {
        Some(pos) => {
            let inteiro = filtrado[..pos].to_string();
            let fracao: String = filtrado[pos + 1..]
                .chars()
                .filter(char::is_ascii_digit)
                .take(2)
                .collect();
            (inteiro, fracao, true)
        }
        None => (filtrado, String::new(), false),
    };

    // Zeros à esquerda caem, mas o "0" solitário fica
    while inteiro.len() > 1 && inteiro.starts_with('0') {
        inteiro.remove(0);
    }

    let inteiro = inserir_pontos_milhar(&inteiro);
    if tem_virgula {
        format!("{},{}", inteiro, fracao)
    } else {
        inteiro
    }
}

/// Converter "1.500,50" ou "1500,50" para valor numérico.
///
/// String vazia ou texto não numérico degrada para zero — a leniência é
/// intencional, entrada ruim nunca vira erro.
pub fn parse_valor(texto: &str) -> Decimal {
    let mut limpo = texto.replace('.', "").replace(',', ".");
    if limpo.ends_with('.') {
        limpo.pop();
    }
    if limpo.starts_with('.') {
        limpo.insert(0, '0');
    }
    if limpo.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&limpo).unwrap_or(Decimal::ZERO)
}

/// Renderizar um valor para exibição em pt-BR: "1.234,56".
/// O prefixo "R$" fica por conta de quem exibe.
pub fn formatar_valor(valor: Decimal) -> String {
    let texto = format!("{:.2}", valor.round_dp(2));
    let (sinal, resto) = match texto.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", texto.as_str()),
    };
    let (inteiro, fracao) = resto.split_once('.').unwrap_or((resto, "00"));
    format!("{}{},{}", sinal, inserir_pontos_milhar(inteiro), fracao)
}

fn inserir_pontos_milhar(digitos: &str) -> String {
    let n = digitos.len();
    let mut saida = String::with_capacity(n + n / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            saida.push('.');
        }
        saida.push(c);
    }
    saida
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sanitizar_insere_pontos_de_milhar() {
        assert_eq!(sanitizar_entrada("1234567"), "1.234.567");
        assert_eq!(sanitizar_entrada("1500,5"), "1.500,5");
        assert_eq!(sanitizar_entrada("999"), "999");
    }

    #[test]
    fn sanitizar_colapsa_virgulas_extras() {
        // só a primeira vírgula separa; dígitos seguintes vão para a fração
        assert_eq!(sanitizar_entrada("1,2,3"), "1,23");
        assert_eq!(sanitizar_entrada("1,2345"), "1,23");
    }

    #[test]
    fn sanitizar_remove_zeros_a_esquerda() {
        assert_eq!(sanitizar_entrada("0012"), "12");
        assert_eq!(sanitizar_entrada("0"), "0");
        assert_eq!(sanitizar_entrada("0,50"), "0,50");
    }

    #[test]
    fn sanitizar_ponto_final_vira_virgula() {
        assert_eq!(sanitizar_entrada("12."), "12,");
        // ponto no meio é separador de milhar digitado, some
        assert_eq!(sanitizar_entrada("1.500"), "1.500");
    }

    #[test]
    fn sanitizar_descarta_lixo() {
        assert_eq!(sanitizar_entrada("R$ 1a2b3"), "123");
        assert_eq!(sanitizar_entrada(""), "");
    }

    #[test]
    fn sanitizar_nunca_produz_mais_de_uma_virgula_nem_fracao_longa() {
        for entrada in ["1,,2,,3", "abc", "12.34.56", "0,999", ",,,", "1.2.3,4,5"] {
            let saida = sanitizar_entrada(entrada);
            assert!(saida.matches(',').count() <= 1, "entrada {:?}", entrada);
            if let Some((_, fracao)) = saida.split_once(',') {
                assert!(fracao.len() <= 2, "entrada {:?}", entrada);
            }
        }
    }

    #[test]
    fn parse_aceita_milhar_e_virgula() {
        assert_eq!(parse_valor("1.500,50"), dec!(1500.50));
        assert_eq!(parse_valor("1500,50"), dec!(1500.50));
        assert_eq!(parse_valor("42"), dec!(42));
    }

    #[test]
    fn parse_degrada_para_zero() {
        assert_eq!(parse_valor(""), Decimal::ZERO);
        assert_eq!(parse_valor("abc"), Decimal::ZERO);
        assert_eq!(parse_valor(","), Decimal::ZERO);
    }

    #[test]
    fn parse_apos_sanitizar_preserva_o_valor() {
        for (texto, esperado) in [
            ("1234,56", dec!(1234.56)),
            ("0,5", dec!(0.5)),
            ("1000000", dec!(1000000)),
            ("73,1", dec!(73.1)),
        ] {
            assert_eq!(parse_valor(&sanitizar_entrada(texto)), esperado);
        }
    }

    #[test]
    fn formatar_para_exibicao() {
        assert_eq!(formatar_valor(dec!(1234.5)), "1.234,50");
        assert_eq!(formatar_valor(dec!(0)), "0,00");
        assert_eq!(formatar_valor(dec!(-42.1)), "-42,10");
        assert_eq!(formatar_valor(dec!(1000000)), "1.000.000,00");
    }
}
