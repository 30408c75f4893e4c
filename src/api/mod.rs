//! Montagem das rotas da API
//!
//! /api/auth é público; todo o restante passa pelo middleware de
//! autenticação JWT.

use axum::{middleware::from_fn_with_state, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

pub mod agendamentos;
pub mod auth;
pub mod clientes;
pub mod dashboard;
pub mod despesas;
pub mod estoque;
pub mod financeiro;
pub mod logs_atendimento;
pub mod ordens_servico;
pub mod pendencias;
pub mod relatorios;
pub mod veiculos;

pub fn criar_router(state: AppState) -> Router {
    let protegidas = Router::new()
        .nest("/clientes", clientes::criar_router())
        .nest("/veiculos", veiculos::criar_router())
        .nest("/agendamentos", agendamentos::criar_router())
        .nest("/ordens-servico", ordens_servico::criar_router())
        .nest("/logs-atendimento", logs_atendimento::criar_router())
        .nest("/pendencias", pendencias::criar_router())
        .nest("/despesas", despesas::criar_router())
        .nest("/estoque", estoque::criar_router())
        .nest("/financeiro", financeiro::criar_router())
        .nest("/dashboard", dashboard::criar_router())
        .nest("/relatorios", relatorios::criar_router())
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/auth", auth::criar_router())
        .merge(protegidas)
        .with_state(state)
}
