//! Modelo de Pendencia
//!
//! Obrigação combinada com o cliente (retorno, ligação, pagamento restante).
//! Status aberta | concluida, transição livre nos dois sentidos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Pendencia — mapeia a tabela pendencias
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pendencia {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub ordem_servico_id: Option<Uuid>,
    pub log_atendimento_id: Option<Uuid>,
    pub descricao: String,
    pub data_prevista: NaiveDate,
    pub responsavel: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Pendência com o nome do cliente, para o painel
#[derive(Debug, Serialize, FromRow)]
pub struct PendenciaComCliente {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub ordem_servico_id: Option<Uuid>,
    pub log_atendimento_id: Option<Uuid>,
    pub descricao: String,
    pub data_prevista: NaiveDate,
    pub responsavel: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Request para criar uma pendência avulsa
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePendenciaRequest {
    pub cliente_id: Uuid,
    pub ordem_servico_id: Option<Uuid>,

    #[validate(length(min = 1, max = 500, message = "descrição é obrigatória"))]
    pub descricao: String,

    pub data_prevista: NaiveDate,
    pub responsavel: Option<String>,
}

/// Request para atualizar uma pendência (inclusive reabrir)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePendenciaRequest {
    #[validate(length(min = 1, max = 500))]
    pub descricao: Option<String>,

    pub data_prevista: Option<NaiveDate>,
    pub responsavel: Option<String>,

    #[validate(length(max = 20))]
    pub status: Option<String>,
}
