//! Modelos de Estoque
//!
//! Peças em estoque e histórico de compras. Registrar uma compra também
//! incrementa a quantidade da peça, na mesma transação.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// EstoquePeca — mapeia a tabela estoque_pecas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EstoquePeca {
    pub id: Uuid,
    pub codigo: String,
    pub nome: String,
    pub fornecedor: Option<String>,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub quantidade: i32,
    pub quantidade_minima: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response de peça com o alerta de estoque baixo derivado
#[derive(Debug, Serialize)]
pub struct EstoquePecaResponse {
    pub id: Uuid,
    pub codigo: String,
    pub nome: String,
    pub fornecedor: Option<String>,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub quantidade: i32,
    pub quantidade_minima: i32,
    pub estoque_baixo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EstoquePeca> for EstoquePecaResponse {
    fn from(p: EstoquePeca) -> Self {
        Self {
            estoque_baixo: p.quantidade <= p.quantidade_minima,
            id: p.id,
            codigo: p.codigo,
            nome: p.nome,
            fornecedor: p.fornecedor,
            preco_custo: p.preco_custo,
            preco_venda: p.preco_venda,
            quantidade: p.quantidade,
            quantidade_minima: p.quantidade_minima,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// HistoricoCompra — mapeia a tabela historico_compras
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoricoCompra {
    pub id: Uuid,
    pub peca_id: Uuid,
    pub quantidade: i32,
    pub valor_pago: Decimal,
    pub fornecedor: Option<String>,
    pub data_compra: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request para cadastrar uma peça
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePecaRequest {
    #[validate(length(min = 1, max = 50, message = "código é obrigatório"))]
    pub codigo: String,

    #[validate(length(min = 1, max = 200, message = "nome é obrigatório"))]
    pub nome: String,

    pub fornecedor: Option<String>,

    /// Textos monetários, convertidos pelo codec; ausentes valem zero
    pub preco_custo: Option<String>,
    pub preco_venda: Option<String>,

    #[validate(range(min = 0))]
    pub quantidade: Option<i32>,

    #[validate(range(min = 0))]
    pub quantidade_minima: Option<i32>,
}

/// Request para atualizar uma peça
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePecaRequest {
    #[validate(length(min = 1, max = 50))]
    pub codigo: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub nome: Option<String>,

    pub fornecedor: Option<String>,
    pub preco_custo: Option<String>,
    pub preco_venda: Option<String>,

    #[validate(range(min = 0))]
    pub quantidade: Option<i32>,

    #[validate(range(min = 0))]
    pub quantidade_minima: Option<i32>,
}

/// Request para registrar uma compra de peça
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompraRequest {
    pub peca_id: Uuid,

    #[validate(range(min = 1, message = "quantidade mínima é 1"))]
    pub quantidade: i32,

    /// Texto monetário, convertido pelo codec
    pub valor_pago: Option<String>,

    pub fornecedor: Option<String>,
}

/// Filtros do histórico de compras
#[derive(Debug, Deserialize)]
pub struct CompraFiltros {
    pub peca_id: Option<Uuid>,
}
