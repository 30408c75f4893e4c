//! Handlers de autenticação
//!
//! Registro de usuário e login com emissão de JWT.

use axum::{extract::State, routing::post, Json, Router};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::usuario::{Usuario, UsuarioResponse},
    state::AppState,
    utils::errors::{AppError, AppResult},
    utils::jwt::{gerar_token, JwtConfig},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub senha: String,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub senha: String,
}

/// Response de login bem-sucedido
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub usuario: UsuarioResponse,
}

/// Registrar um novo usuário
pub async fn register(
    State(state): State<AppState>,
    Json(dados): Json<RegisterRequest>,
) -> AppResult<Json<UsuarioResponse>> {
    dados.validate()?;

    let ja_existe: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM usuarios WHERE email = $1")
            .bind(&dados.email)
            .fetch_optional(&state.pool)
            .await?;
    if ja_existe.is_some() {
        return Err(AppError::Conflict(format!(
            "Usuário com email '{}' já existe",
            dados.email
        )));
    }

    let senha_hash = hash(&dados.senha, DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Erro ao gerar hash: {}", e)))?;

    let usuario = sqlx::query_as::<_, Usuario>(
        r#"
        INSERT INTO usuarios (nome, email, senha_hash)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&dados.nome)
    .bind(&dados.email)
    .bind(&senha_hash)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(UsuarioResponse::from(usuario)))
}

/// Login com email e senha
pub async fn login(
    State(state): State<AppState>,
    Json(dados): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    dados.validate()?;

    let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE email = $1")
        .bind(&dados.email)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Email ou senha inválidos".to_string()))?;

    let senha_confere = verify(&dados.senha, &usuario.senha_hash)
        .map_err(|e| AppError::Hash(format!("Erro ao verificar senha: {}", e)))?;
    if !senha_confere {
        return Err(AppError::Unauthorized("Email ou senha inválidos".to_string()));
    }

    let jwt_config = JwtConfig::from(&state.config);
    let access_token = gerar_token(usuario.id, &jwt_config)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_config.expiration,
        usuario: UsuarioResponse::from(usuario),
    }))
}
