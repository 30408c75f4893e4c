//! Utilidades do sistema
//!
//! Tratamento de erros e JWT.

pub mod errors;
pub mod jwt;
