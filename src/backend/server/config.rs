/**
 * Server Configuration
 *
 * `ServerConfig` is built once at startup, either from environment variables
 * (`ServerConfig::from_env`) or programmatically with the builder (tests),
 * and is immutable afterwards. Components receive the pieces they need from
 * `AppState`.
 *
 * # Environment Variables
 *
 * | Variable | Default |
 * |---|---|
 * | `PORT` | `5000` |
 * | `DATABASE_URL` | `sqlite://socialhub.db?mode=rwc` |
 * | `JWT_SECRET` | required in production |
 * | `APP_ENV` | `development` |
 * | `CORS_ORIGIN` | `http://localhost:<PORT>` |
 * | `BCRYPT_COST` | `10` |
 * | `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` | unset |
 * | `MEDIA_TIMEOUT_SECS` | `30` |
 *
 * Invalid values abort startup with a `ConfigError`.
 */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://socialhub.db?mode=rwc";
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 30;

/// Secret used in development when `JWT_SECRET` is not set
const DEVELOPMENT_JWT_SECRET: &str = "socialhub-development-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("missing value: {0}")]
    MissingValue(&'static str),

    #[error("Cloudinary needs CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET together")]
    PartialCloudinary,
}

/// Deployment environment; governs the session cookie `Secure` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

/// Cloudinary API credentials
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Immutable server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub environment: Environment,
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    /// `None` selects the in-memory media store
    pub cloudinary: Option<CloudinaryConfig>,
    pub media_timeout: Duration,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("cors_origin", &self.cors_origin)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cloudinary", &self.cloudinary)
            .field("media_timeout", &self.media_timeout)
            .finish()
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = ServerConfig::builder();

        if let Some(port) = var("PORT") {
            builder = builder.port(parse("PORT", &port)?);
        }
        if let Some(url) = var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(env) = var("APP_ENV") {
            builder = builder.environment(env.parse()?);
        }
        if let Some(origin) = var("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(cost) = var("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }
        if let Some(secs) = var("MEDIA_TIMEOUT_SECS") {
            builder = builder.media_timeout(Duration::from_secs(parse("MEDIA_TIMEOUT_SECS", &secs)?));
        }

        match (
            var("CLOUDINARY_CLOUD_NAME"),
            var("CLOUDINARY_API_KEY"),
            var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                builder = builder.cloudinary(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                });
            }
            (None, None, None) => {}
            _ => return Err(ConfigError::PartialCloudinary),
        }

        builder.build()
    }

    /// Whether session cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    environment: Environment,
    cors_origin: Option<String>,
    bcrypt_cost: Option<u32>,
    cloudinary: Option<CloudinaryConfig>,
    media_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn cloudinary(mut self, cloudinary: CloudinaryConfig) -> Self {
        self.cloudinary = Some(cloudinary);
        self
    }

    pub fn media_timeout(mut self, timeout: Duration) -> Self {
        self.media_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let port = self.port.unwrap_or(DEFAULT_PORT);

        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if self.environment.is_production() => {
                return Err(ConfigError::MissingValue("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using an insecure development secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(ServerConfig {
            port,
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            environment: self.environment,
            cors_origin: self
                .cors_origin
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            bcrypt_cost,
            cloudinary: self.cloudinary,
            media_timeout: self
                .media_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_MEDIA_TIMEOUT_SECS)),
        })
    }
}
