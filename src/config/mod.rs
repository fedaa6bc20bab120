use std::env;

use crate::error::{ApiError, Result};

/// Which shape the skill collection uses. The original deployments ran both as
/// separate services; here it is a startup option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillStorage {
    /// One flat document per skill with a fixed field set.
    Flat,
    /// Parent documents holding per-category arrays of sub-skills.
    Nested,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub token_secret: String,
    pub token_expiry_hours: i64,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// The legacy service shipped the token cookie with `secure` disabled.
    /// Kept configurable rather than silently upgraded.
    pub cookie_secure: bool,
    pub skill_storage: SkillStorage,
    pub require_auth: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let token_secret = env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ApiError::Config("ACCESS_TOKEN_SECRET must be set".to_string()))?;

        let skill_storage = match env::var("SKILL_STORAGE") {
            Ok(value) => match value.to_ascii_lowercase().as_str() {
                "flat" => SkillStorage::Flat,
                "nested" => SkillStorage::Nested,
                other => {
                    return Err(ApiError::Config(format!(
                        "SKILL_STORAGE must be 'flat' or 'nested', got '{}'",
                        other
                    )))
                }
            },
            Err(_) => SkillStorage::Flat,
        };

        Ok(Self {
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "portfolio".to_string()),
            token_secret,
            token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            cookie_secure: env_flag("COOKIE_SECURE"),
            skill_storage,
            require_auth: env_flag("REQUIRE_AUTH"),
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
