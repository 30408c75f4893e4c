//! Modelo de Veiculo
//!
//! Cada veículo pertence a exatamente um cliente.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Veiculo — mapeia a tabela veiculos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Veiculo {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub placa: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<String>,
    pub motor: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Veículo com o nome do dono, para as listagens
#[derive(Debug, Serialize, FromRow)]
pub struct VeiculoComCliente {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub placa: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<String>,
    pub motor: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request para cadastrar um veículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVeiculoRequest {
    pub cliente_id: Uuid,

    #[validate(length(max = 10))]
    pub placa: Option<String>,

    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<String>,
    pub motor: Option<String>,
    pub observacoes: Option<String>,
}

/// Request para atualizar um veículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVeiculoRequest {
    #[validate(length(max = 10))]
    pub placa: Option<String>,

    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<String>,
    pub motor: Option<String>,
    pub observacoes: Option<String>,
}

/// Filtros de listagem de veículos
#[derive(Debug, Deserialize)]
pub struct VeiculoFiltros {
    pub cliente_id: Option<Uuid>,
}
