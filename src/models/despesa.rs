//! Modelo de Despesa
//!
//! Saída de caixa avulsa da oficina (aluguel, fornecedores, contas).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Despesa — mapeia a tabela despesas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Despesa {
    pub id: Uuid,
    pub descricao: String,
    pub categoria: Option<String>,
    pub valor: Decimal,
    pub data: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Request para lançar uma despesa
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDespesaRequest {
    #[validate(length(min = 1, max = 300, message = "descrição é obrigatória"))]
    pub descricao: String,

    #[validate(length(max = 50))]
    pub categoria: Option<String>,

    /// Texto monetário, convertido pelo codec
    #[validate(length(min = 1, message = "valor é obrigatório"))]
    pub valor: String,

    /// Ausente vale a data de hoje
    pub data: Option<NaiveDate>,
}
