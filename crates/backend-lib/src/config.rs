// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use crate::auth::{TokenConfig, DEFAULT_TOKEN_LIFETIME_MINUTES};
use chrono::Duration;
use config::{Config, Environment, File};
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable prefix, e.g. `TOKENGATE__AUTH__SECRET_KEY`
pub const ENV_PREFIX: &str = "TOKENGATE";

/// Development-only signing secret; replace it in any real deployment
pub const DEFAULT_SECRET_KEY: &str = "YOUR_SUPER_SECURE_SECRET_KEY_CHANGE_ME";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Token and credential settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Shared secret used to sign and verify tokens
    pub secret_key: String,
    /// Signing algorithm name (`HS256`, `HS384` or `HS512`)
    pub algorithm: String,
    /// Lifetime of tokens issued without an explicit override
    pub access_token_expire_minutes: i64,
    /// Accounts accepted by the login endpoint
    pub users: Vec<UserCredentials>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: DEFAULT_TOKEN_LIFETIME_MINUTES,
            users: vec![UserCredentials {
                username: "johndoe".to_string(),
                password: "secret".to_string(),
            }],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load from `config/default` and `config/local` (both optional), then
    /// apply `TOKENGATE__*` environment overrides
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_sources(None, environment())
    }

    /// Load from an explicit file, then apply environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_sources(Some(path.as_ref()), environment())
    }

    fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let builder = match file {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        };

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for values the server cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.auth.token_config()?;

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(SettingsError::Invalid(format!(
                "unknown log level `{}`",
                self.logging.level
            )));
        }

        Ok(())
    }
}

impl AuthSettings {
    /// Build the immutable token configuration shared by issuer and verifier
    pub fn token_config(&self) -> Result<TokenConfig, SettingsError> {
        let algorithm = Algorithm::from_str(&self.algorithm).map_err(|_| {
            SettingsError::Invalid(format!("unknown algorithm `{}`", self.algorithm))
        })?;
        let lifetime = Duration::try_minutes(self.access_token_expire_minutes).ok_or_else(|| {
            SettingsError::Invalid("access_token_expire_minutes is out of range".to_string())
        })?;

        TokenConfig::new(self.secret_key.as_bytes(), algorithm, lifetime)
            .map_err(|e| SettingsError::Invalid(e.to_string()))
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env() -> Environment {
        environment().source(Some(HashMap::new()))
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.auth.algorithm, "HS256");
        assert_eq!(settings.auth.access_token_expire_minutes, 30);
        assert!(settings.auth.uses_default_secret());
        assert_eq!(settings.auth.users[0].username, "johndoe");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let settings = Settings::default();

        let mut invalid = settings.clone();
        invalid.auth.secret_key = String::new();
        assert!(invalid.validate().is_err());

        let mut invalid = settings.clone();
        invalid.auth.algorithm = "RS256".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = settings.clone();
        invalid.auth.algorithm = "HS999".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = settings.clone();
        invalid.auth.access_token_expire_minutes = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = settings.clone();
        invalid.logging.level = "loud".to_string();
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_token_config_from_settings() {
        let mut settings = Settings::default();
        settings.auth.algorithm = "HS384".to_string();
        settings.auth.access_token_expire_minutes = 5;

        let config = settings.auth.token_config().unwrap();
        assert_eq!(config.algorithm(), Algorithm::HS384);
        assert_eq!(config.default_lifetime(), Duration::minutes(5));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("tokengate.toml");
        std::fs::write(
            &config_path,
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [auth]
            secret_key = "file-secret"
            access_token_expire_minutes = 15

            [[auth.users]]
            username = "alice"
            password = "wonderland"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        let settings = Settings::from_sources(Some(config_path.as_path()), no_env()).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.auth.secret_key, "file-secret");
        assert_eq!(settings.auth.algorithm, "HS256");
        assert_eq!(settings.auth.access_token_expire_minutes, 15);
        assert_eq!(
            settings.auth.users,
            vec![UserCredentials {
                username: "alice".to_string(),
                password: "wonderland".to_string(),
            }]
        );
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("tokengate.toml");
        std::fs::write(
            &config_path,
            r#"
            [auth]
            secret_key = "file-secret"
            "#,
        )
        .unwrap();

        let env = environment().source(Some(HashMap::from([
            ("TOKENGATE__AUTH__SECRET_KEY".to_string(), "env-secret".to_string()),
            ("TOKENGATE__SERVER__PORT".to_string(), "8123".to_string()),
        ])));

        let settings = Settings::from_sources(Some(config_path.as_path()), env).unwrap();
        assert_eq!(settings.auth.secret_key, "env-secret");
        assert_eq!(settings.server.port, 8123);
    }

    #[test]
    fn test_numeric_looking_secret_is_kept_verbatim() {
        for secret in ["007", "1e3", "1.50"] {
            let env = environment().source(Some(HashMap::from([(
                "TOKENGATE__AUTH__SECRET_KEY".to_string(),
                secret.to_string(),
            )])));

            let settings = Settings::from_sources(None, env).unwrap();
            assert_eq!(settings.auth.secret_key, secret);
        }
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("tokengate.toml");
        std::fs::write(&config_path, "[auth]\nalgorithm = \"none\"\n").unwrap();

        let result = Settings::from_sources(Some(config_path.as_path()), no_env());
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let result = Settings::from_sources(Some(temp_dir.path().join("absent.toml").as_path()), no_env());
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }
}
