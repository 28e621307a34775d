//! Application-wide constants

pub const SERVICE_NAME: &str = "learnx-auth";
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_ISSUER: &str = "learnx";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const MAX_ACCESS_TOKEN_EXPIRY: i64 = 30 * 24 * 3600;
pub const ENV_PREFIX: &str = "LEARNX";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8081";
