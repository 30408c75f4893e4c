//! Modelo de Pagamento
//!
//! Lançamento de caixa de uma OS. O livro de pagamentos é só-acréscimo:
//! não há atualização nem exclusão pela API. Pagamento a maior é
//! representável e não é rejeitado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Pagamento — mapeia a tabela pagamentos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pagamento {
    pub id: Uuid,
    pub ordem_servico_id: Uuid,
    pub valor: Decimal,
    pub forma_pagamento: String,
    pub data_pagamento: DateTime<Utc>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar um pagamento
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePagamentoRequest {
    /// Texto monetário ("150,00"), convertido pelo codec
    #[validate(length(min = 1, message = "valor é obrigatório"))]
    pub valor: String,

    #[validate(length(max = 30))]
    pub forma_pagamento: Option<String>,

    pub observacoes: Option<String>,
}
