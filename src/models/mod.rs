//! Modelos do sistema
//!
//! Structs que mapeiam as tabelas do PostgreSQL e os DTOs de
//! request/response de cada recurso.

pub mod agendamento;
pub mod cliente;
pub mod despesa;
pub mod estoque;
pub mod log_atendimento;
pub mod ordem_servico;
pub mod pagamento;
pub mod pendencia;
pub mod usuario;
pub mod veiculo;
