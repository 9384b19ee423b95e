use std::time::Duration;

use rentwise_cloud::{NominatimConfig, S3Config};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and the bucket name have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3300`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer-token validation settings.
    pub jwt: JwtConfig,
    /// Photo bucket settings.
    pub storage: S3Config,
    /// Address lookup settings.
    pub geocoding: NominatimConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                   |
    /// |--------------------------|-------------------------------------------|
    /// | `HOST`                   | `0.0.0.0`                                 |
    /// | `PORT`                   | `3300`                                    |
    /// | `CORS_ORIGINS`           | `http://localhost:3000`                   |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                                      |
    /// | `AWS_REGION`             | `us-east-1`                               |
    /// | `S3_BUCKET_NAME`         | required                                  |
    /// | `S3_PUBLIC_BASE_URL`     | `https://{bucket}.s3.{region}.amazonaws.com` |
    /// | `GEOCODING_URL`          | `https://nominatim.openstreetmap.org`     |
    /// | `GEOCODING_USER_AGENT`   | `rentwise-api/{version}`                  |
    /// | `GEOCODING_TIMEOUT_SECS` | `10`                                      |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3300".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());
        let bucket = std::env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME must be set");
        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| S3Config::default_public_base_url(&bucket, &region));
        let storage = S3Config {
            region,
            bucket,
            public_base_url,
        };

        let geocoding_timeout_secs: u64 = std::env::var("GEOCODING_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("GEOCODING_TIMEOUT_SECS must be a valid u64");
        let geocoding = NominatimConfig {
            base_url: std::env::var("GEOCODING_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".into()),
            user_agent: std::env::var("GEOCODING_USER_AGENT")
                .unwrap_or_else(|_| format!("rentwise-api/{}", env!("CARGO_PKG_VERSION"))),
            timeout: Duration::from_secs(geocoding_timeout_secs),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            storage,
            geocoding,
        }
    }
}
