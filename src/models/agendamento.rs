//! Modelo de Agendamento
//!
//! Horário marcado na agenda da oficina. Status é texto livre dentre
//! agendado | confirmado | cancelado | concluido, sem fluxo imposto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Agendamento — mapeia a tabela agendamentos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agendamento {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub veiculo_id: Option<Uuid>,
    pub data_hora: DateTime<Utc>,
    pub servico_resumo: Option<String>,
    pub observacoes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Agendamento com rótulos de cliente e veículo, para a agenda
#[derive(Debug, Serialize, FromRow)]
pub struct AgendamentoComNomes {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub veiculo_id: Option<Uuid>,
    pub veiculo_placa: Option<String>,
    pub veiculo_marca: Option<String>,
    pub veiculo_modelo: Option<String>,
    pub data_hora: DateTime<Utc>,
    pub servico_resumo: Option<String>,
    pub observacoes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Request para marcar um agendamento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgendamentoRequest {
    pub cliente_id: Uuid,
    pub veiculo_id: Option<Uuid>,
    pub data_hora: DateTime<Utc>,

    #[validate(length(max = 300))]
    pub servico_resumo: Option<String>,

    pub observacoes: Option<String>,

    #[validate(length(max = 30))]
    pub status: Option<String>,
}

/// Request para atualizar um agendamento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgendamentoRequest {
    pub veiculo_id: Option<Uuid>,
    pub data_hora: Option<DateTime<Utc>>,

    #[validate(length(max = 300))]
    pub servico_resumo: Option<String>,

    pub observacoes: Option<String>,

    #[validate(length(max = 30))]
    pub status: Option<String>,
}
