//! Utilidades de JWT
//!
//! Geração e verificação dos tokens de sessão da oficina.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Claims do token de sessão
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // usuario_id
    pub exp: usize,  // expiração (timestamp)
    pub iat: usize,  // emissão (timestamp)
}

/// Configuração de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Gerar token para um usuário
pub fn gerar_token(usuario_id: Uuid, config: &JwtConfig) -> Result<String, AppError> {
    let agora = chrono::Utc::now();
    let expira_em = agora + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: usuario_id.to_string(),
        exp: expira_em.timestamp() as usize,
        iat: agora.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_ref()),
    )
    .map_err(|e| AppError::Jwt(format!("Erro gerando token: {}", e)))
}

/// Verificar e decodificar um token
pub fn verificar_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let token_data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "segredo-de-teste".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn gera_e_verifica_token() {
        let usuario_id = Uuid::new_v4();
        let token = gerar_token(usuario_id, &config()).unwrap();
        let claims = verificar_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, usuario_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejeita_token_com_segredo_errado() {
        let token = gerar_token(Uuid::new_v4(), &config()).unwrap();
        let outra = JwtConfig {
            secret: "outro-segredo".to_string(),
            expiration: 3600,
        };
        assert!(verificar_token(&token, &outra).is_err());
    }

    #[test]
    fn rejeita_token_malformado() {
        assert!(verificar_token("nada-a-ver", &config()).is_err());
    }
}
