//! Middlewares da aplicação
//!
//! Autenticação JWT e CORS.

pub mod auth;
pub mod cors;
