use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::adapter::outgoing::jwt::JwtConfig;
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Settings;
use crate::media::application::domain::policies::upload_policy::UploadPolicy;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything the process needs, resolved once at start-up and handed to constructors.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub argon2: Argon2Settings,
    pub upload: UploadPolicy,
    pub expose_error_details: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);

        let api_prefix = env.or("API_PREFIX", "/api");
        let api_prefix = format!("/{}", api_prefix.trim_matches('/'));

        Ok(Self {
            environment: env.or("RUST_ENV", "development"),
            host: env.or("HOST", "127.0.0.1"),
            port: env.parse_or("PORT", 8080)?,
            api_prefix,
            database_url: env.required("DATABASE_URL")?,
            db_max_connections: env.parse_or("DB_MAX_CONNECTIONS", 20)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            argon2: Argon2Settings {
                memory_kib: env.parse_or("ARGON2_MEMORY_KIB", Argon2Settings::default().memory_kib)?,
                iterations: env.parse_or("ARGON2_ITERATIONS", Argon2Settings::default().iterations)?,
                parallelism: env
                    .parse_or("ARGON2_PARALLELISM", Argon2Settings::default().parallelism)?,
            },
            upload: UploadPolicy {
                upload_root: PathBuf::from(env.or("UPLOAD_DIR", "static/uploads")),
                public_url_prefix: env.or("UPLOAD_URL_PREFIX", "/static/uploads"),
                max_file_size_bytes: env
                    .parse_or("UPLOAD_MAX_BYTES", UploadPolicy::DEFAULT_MAX_FILE_SIZE_BYTES)?,
                max_images_per_entity: UploadPolicy::MAX_IMAGES_PER_ENTITY,
            },
            expose_error_details: env.parse_or("EXPOSE_ERROR_DETAILS", false)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Thin reader over a key lookup; shared with the module-level config loaders.
pub(crate) struct Env<'a, F: Fn(&str) -> Option<String>>(pub &'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn value(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    pub fn or(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or_else(|| default.to_string())
    }

    pub fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.value(key).ok_or(ConfigError::Missing(key))
    }

    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }),
        }
    }
}
