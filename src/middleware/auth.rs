//! Middleware de autenticação JWT
//!
//! Extrai o bearer token, valida o JWT e injeta o usuário autenticado
//! nas extensions da request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::usuario::Usuario,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{verificar_token, JwtConfig},
};

/// Usuário autenticado injetado nas requests
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub usuario_id: Uuid,
    pub nome: String,
}

/// Middleware de autenticação
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorização requerido".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verificar_token(token, &jwt_config)?;

    let usuario_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuário inválido".to_string()))?;

    // Usuário precisa continuar existindo no banco
    let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
        .bind(usuario_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuário não encontrado".to_string()))?;

    request.extensions_mut().insert(UsuarioAutenticado {
        usuario_id: usuario.id,
        nome: usuario.nome,
    });

    Ok(next.run(request).await)
}
