//! Modelo de Ordem de Serviço (OS)
//!
//! A OS carrega um `total` persistido que é sempre derivado dos itens e do
//! desconto pelo caminho único de gravação (recalcular e salvar); a situação
//! financeira (pago/aberto/parcial/atrasado) nunca é persistida, é derivada
//! na leitura. Status da oficina é texto livre dentre
//! em andamento | aguardando peça | orçamento | concluída.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::domain::financeiro::StatusFinanceiro;
use crate::models::pagamento::Pagamento;

/// OrdemServico — mapeia a tabela ordens_servico
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrdemServico {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub veiculo_id: Option<Uuid>,
    pub data_entrada: DateTime<Utc>,
    pub data_saida: Option<DateTime<Utc>>,
    pub km_entrada: Option<i32>,
    pub como_chegou: Option<String>,
    pub reclamacao_cliente: Option<String>,
    pub diagnostico: Option<String>,
    pub o_que_foi_feito: Option<String>,
    pub observacoes: Option<String>,
    pub status: String,
    pub desconto: Decimal,
    pub vencimento: Option<NaiveDate>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Item de serviço ou de peça lançado na OS (as duas tabelas têm o mesmo
/// formato: servicos_os e pecas_os)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemOrdem {
    pub id: Uuid,
    pub ordem_servico_id: Uuid,
    pub descricao: String,
    pub valor: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Linha da listagem de OS: dados da ordem + rótulos + agregados de cobrança
#[derive(Debug, FromRow)]
pub struct OrdemComAgregados {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub veiculo_id: Option<Uuid>,
    pub veiculo_placa: Option<String>,
    pub veiculo_marca: Option<String>,
    pub veiculo_modelo: Option<String>,
    pub data_entrada: DateTime<Utc>,
    pub data_saida: Option<DateTime<Utc>>,
    pub status: String,
    pub desconto: Decimal,
    pub vencimento: Option<NaiveDate>,
    pub total: Decimal,
    pub total_pago: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Response de OS nas listagens, com a situação financeira derivada
#[derive(Debug, Serialize)]
pub struct OrdemResumoResponse {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub veiculo_id: Option<Uuid>,
    pub veiculo_placa: Option<String>,
    pub veiculo_marca: Option<String>,
    pub veiculo_modelo: Option<String>,
    pub data_entrada: DateTime<Utc>,
    pub data_saida: Option<DateTime<Utc>>,
    pub status: String,
    pub desconto: Decimal,
    pub vencimento: Option<NaiveDate>,
    pub total: Decimal,
    pub total_pago: Decimal,
    /// Saldo bruto: negativo quando houve pagamento a maior
    pub saldo: Decimal,
    pub status_financeiro: StatusFinanceiro,
    pub created_at: DateTime<Utc>,
}

impl OrdemResumoResponse {
    pub fn montar(row: OrdemComAgregados, hoje: NaiveDate) -> Self {
        use crate::domain::financeiro::{classificar, saldo};
        Self {
            saldo: saldo(row.total, row.total_pago),
            status_financeiro: classificar(row.total, row.total_pago, row.vencimento, hoje),
            id: row.id,
            cliente_id: row.cliente_id,
            cliente_nome: row.cliente_nome,
            veiculo_id: row.veiculo_id,
            veiculo_placa: row.veiculo_placa,
            veiculo_marca: row.veiculo_marca,
            veiculo_modelo: row.veiculo_modelo,
            data_entrada: row.data_entrada,
            data_saida: row.data_saida,
            status: row.status,
            desconto: row.desconto,
            vencimento: row.vencimento,
            total: row.total,
            total_pago: row.total_pago,
            created_at: row.created_at,
        }
    }
}

/// Response de OS detalhada, com itens e pagamentos
#[derive(Debug, Serialize)]
pub struct OrdemDetalheResponse {
    #[serde(flatten)]
    pub ordem: OrdemServico,
    pub servicos: Vec<ItemOrdem>,
    pub pecas: Vec<ItemOrdem>,
    pub pagamentos: Vec<Pagamento>,
    pub total_pago: Decimal,
    pub saldo: Decimal,
    pub status_financeiro: StatusFinanceiro,
}

/// Item enviado pelo formulário: o valor chega como texto monetário
/// ("1.500,50") e é convertido pelo codec antes de persistir.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemRequest {
    #[validate(length(min = 1, max = 300, message = "descrição é obrigatória"))]
    pub descricao: String,

    pub valor: String,
}

/// Request do caminho único de gravação de OS (criação e edição): os itens
/// vêm completos e o total é recalculado aqui, nunca aceito do cliente.
#[derive(Debug, Deserialize, Validate)]
pub struct SalvarOrdemRequest {
    pub cliente_id: Uuid,
    pub veiculo_id: Option<Uuid>,
    pub data_entrada: Option<NaiveDate>,
    pub data_saida: Option<NaiveDate>,
    pub km_entrada: Option<i32>,
    pub como_chegou: Option<String>,
    pub reclamacao_cliente: Option<String>,
    pub diagnostico: Option<String>,
    pub o_que_foi_feito: Option<String>,
    pub observacoes: Option<String>,

    #[validate(length(max = 30))]
    pub status: Option<String>,

    /// Texto monetário; ausente vale zero
    pub desconto: Option<String>,
    pub vencimento: Option<NaiveDate>,

    #[validate]
    pub servicos: Vec<ItemRequest>,

    #[validate]
    pub pecas: Vec<ItemRequest>,

    /// Pagamento inicial opcional, só na criação
    pub valor_pago: Option<String>,
    pub forma_pagamento: Option<String>,
}
