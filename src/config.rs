use serde::Deserialize;

/// Startup configuration failures. The process must not serve traffic with
/// a bad secret or work factor, so these abort `main` before binding.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("HASH_COST must be a positive integer, got {0:?}")]
    InvalidCost(String),
    #[error("invalid hashing parameters: {0}")]
    BadHashParams(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashConfig {
    /// Argon2 time-cost. Stored hashes are self-describing, so raising
    /// this later leaves existing hashes verifiable.
    pub cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub hash: HashConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "teachmate".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "teachmate-teachers".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };

        let raw_cost =
            std::env::var("HASH_COST").map_err(|_| ConfigError::MissingVar("HASH_COST"))?;
        let hash = HashConfig {
            cost: parse_cost(&raw_cost)?,
        };

        let storage = StorageConfig {
            endpoint: std::env::var("MINIO_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9000".into()),
            bucket: std::env::var("MINIO_BUCKET").unwrap_or_else(|_| "teachmate".into()),
            access_key: std::env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".into()),
            secret_key: std::env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".into()),
        };

        Ok(Self {
            database_url,
            jwt,
            hash,
            storage,
        })
    }
}

fn parse_cost(raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>()
        .ok()
        .filter(|c| *c > 0)
        .ok_or_else(|| ConfigError::InvalidCost(raw.to_string()))
}
