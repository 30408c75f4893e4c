//! Configuração de variáveis de ambiente

use anyhow::Context;
use std::env;

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Carregar a configuração do ambiente. DATABASE_URL e JWT_SECRET são
    /// obrigatórios; o resto tem default de desenvolvimento.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT deve ser um número válido")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve estar definida")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve estar definida")?,
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("JWT_EXPIRATION deve ser um número válido")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Endereço de escuta do servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
