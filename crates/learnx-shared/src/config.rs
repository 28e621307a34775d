//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_CORS_ORIGIN, DEFAULT_PORT, ENV_PREFIX,
    MAX_ACCESS_TOKEN_EXPIRY, SERVICE_NAME, TOKEN_ISSUER,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub cors: CorsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl AppConfig {
    /// Load from defaults, `config/` files and the environment.
    ///
    /// Nested keys take the `LEARNX_` prefix and use `__` between sections
    /// (`LEARNX_DATABASE__URL`, `LEARNX_JWT__SECRET`). The flat names
    /// `PORT`, `DATABASE_URL` and `JWT_SECRET` win over everything else.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder_with_defaults()?
            .set_override("app.env", env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Self::environment())
            .set_override_option("app.port", std::env::var("PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Prefixed environment source. Unprefixed variables never reach the tree.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Builder pre-populated with every default. `database.url` and
    /// `jwt.secret` have none and must come from a later source.
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", SERVICE_NAME)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.issuer", TOKEN_ISSUER)?
            .set_default("cors.allowed_origin", DEFAULT_CORS_ORIGIN)?
            .set_default("log.filter", "info,learnx=debug,tower_http=info")?
            .set_default("log.format", "json")
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must not be empty".into()));
        }
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY).contains(&self.jwt.access_token_expiry) {
            return Err(AppError::InvalidConfig(format!(
                "jwt.access_token_expiry must be between 1 and {} seconds",
                MAX_ACCESS_TOKEN_EXPIRY
            )));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::InvalidConfig("database.url must not be empty".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections exceeds max_connections".into(),
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}
