use crate::config::{ConfigError, Env};

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,  // seconds
    pub refresh_token_expiry: i64, // seconds
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600;
    pub const DEFAULT_REFRESH_EXPIRY: i64 = 7 * 24 * 3600;

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let secret_key = env.required("JWT_SECRET")?;
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {MIN_SECRET_LEN} characters"),
            });
        }

        let access_token_expiry = env.parse_or("JWT_ACCESS_EXPIRY", Self::DEFAULT_ACCESS_EXPIRY)?;
        let refresh_token_expiry =
            env.parse_or("JWT_REFRESH_EXPIRY", Self::DEFAULT_REFRESH_EXPIRY)?;

        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be positive".to_string(),
            });
        }
        if refresh_token_expiry <= access_token_expiry {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_EXPIRY",
                reason: "must be longer than the access token lifetime".to_string(),
            });
        }

        Ok(Self {
            secret_key,
            issuer: env.or("JWT_ISSUER", "portfolio-api"),
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_with(secret: &'static str, refresh: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| match key {
            "JWT_SECRET" => Some(secret.to_string()),
            "JWT_REFRESH_EXPIRY" => refresh.map(str::to_string),
            _ => None,
        }
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = JwtConfig::from_lookup(&lookup_with("too-short", None)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_SECRET", .. }));
    }

    #[test]
    fn refresh_must_outlive_access() {
        let err = JwtConfig::from_lookup(&lookup_with(
            "0123456789abcdef0123456789abcdef",
            Some("60"),
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_REFRESH_EXPIRY", .. }));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = JwtConfig::from_lookup(&lookup_with("0123456789abcdef0123456789abcdef", None))
            .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("0123456789abcdef"));
        assert_eq!(config.issuer, "portfolio-api");
    }
}
