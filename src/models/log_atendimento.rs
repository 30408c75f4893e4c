//! Modelo de LogAtendimento
//!
//! Registro de contato com o cliente (WhatsApp, telefone, presencial).
//! Quando o contato tem data combinada, a gravação também gera uma
//! pendência, na mesma transação.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// LogAtendimento — mapeia a tabela logs_atendimento
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LogAtendimento {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub ordem_servico_id: Option<Uuid>,
    pub canal: String,
    pub descricao: String,
    pub usuario_responsavel: String,
    pub data_hora: DateTime<Utc>,
    pub data_combinada: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar um contato
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogRequest {
    pub cliente_id: Uuid,
    pub ordem_servico_id: Option<Uuid>,

    #[validate(length(max = 30))]
    pub canal: Option<String>,

    #[validate(length(min = 1, max = 1000, message = "descrição é obrigatória"))]
    pub descricao: String,

    pub usuario_responsavel: Option<String>,

    /// Presente => gera pendência junto com o log
    pub data_combinada: Option<NaiveDate>,
}

/// Request para corrigir um contato já registrado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLogRequest {
    #[validate(length(max = 30))]
    pub canal: Option<String>,

    #[validate(length(min = 1, max = 1000))]
    pub descricao: Option<String>,

    pub usuario_responsavel: Option<String>,
    pub data_combinada: Option<NaiveDate>,
}
