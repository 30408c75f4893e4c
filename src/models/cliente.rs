//! Modelo de Cliente
//!
//! Cadastro de clientes da oficina com contatos e endereço.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Cliente — mapeia a tabela clientes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cliente {
    pub id: Uuid,
    pub nome: String,
    pub telefone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request para cadastrar um cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClienteRequest {
    #[validate(length(min = 1, max = 200, message = "nome é obrigatório"))]
    pub nome: String,

    pub telefone: Option<String>,
    pub whatsapp: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub cpf_cnpj: Option<String>,
    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,

    #[validate(length(max = 2))]
    pub estado: Option<String>,
}

/// Request para atualizar um cliente existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClienteRequest {
    #[validate(length(min = 1, max = 200))]
    pub nome: Option<String>,

    pub telefone: Option<String>,
    pub whatsapp: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub cpf_cnpj: Option<String>,
    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,

    #[validate(length(max = 2))]
    pub estado: Option<String>,
}
