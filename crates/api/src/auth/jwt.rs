//! Bearer-token verification.
//!
//! Production tokens are Cognito ID tokens signed RS256 with one of the user
//! pool's published keys, looked up by the header `kid`. A shared HS256
//! secret can be configured as well for local tooling and tests. The subject
//! is the caller's Cognito ID and the role travels in the `custom:role` claim.

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims read from every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the caller's Cognito ID.
    pub sub: String,
    /// `tenant` or `manager`.
    #[serde(rename = "custom:role")]
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Why a bearer token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("no signing key matches kid {0:?}")]
    UnknownKey(Option<String>),

    #[error("{0:?} tokens are not accepted by this deployment")]
    AlgorithmNotAccepted(Algorithm),
}

/// A Cognito user pool, which fixes the token issuer and the key set URL.
#[derive(Debug, Clone)]
pub struct CognitoPool {
    pub region: String,
    pub user_pool_id: String,
}

impl CognitoPool {
    pub fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer())
    }
}

/// Configuration for token validation.
#[derive(Debug, Clone, Default)]
pub struct JwtConfig {
    /// HS256 secret. `None` rejects HS256 tokens.
    pub secret: Option<String>,
    /// User pool whose RS256 tokens are accepted.
    pub cognito: Option<CognitoPool>,
    /// Expected `aud`, the app client id. `None` skips the audience check.
    pub audience: Option<String>,
    /// Public keys of the user pool, fetched at startup. `None` rejects RS256
    /// tokens.
    pub jwks: Option<JwkSet>,
    /// Clock skew tolerated on `exp`, in seconds (default: 60).
    pub leeway_secs: u64,
}

const DEFAULT_LEEWAY_SECS: u64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                | Required | Default     |
    /// |------------------------|----------|-------------|
    /// | `COGNITO_USER_POOL_ID` | no       | --          |
    /// | `COGNITO_CLIENT_ID`    | no       | --          |
    /// | `AWS_REGION`           | no       | `us-east-1` |
    /// | `JWT_SECRET`           | no       | --          |
    /// | `JWT_LEEWAY_SECS`      | no       | `60`        |
    ///
    /// The key set is not fetched here; see [`fetch_jwks`].
    ///
    /// # Panics
    ///
    /// Panics if neither `COGNITO_USER_POOL_ID` nor `JWT_SECRET` is set.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let secret = non_empty("JWT_SECRET");
        let cognito = non_empty("COGNITO_USER_POOL_ID").map(|user_pool_id| CognitoPool {
            region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-1".into()),
            user_pool_id,
        });
        assert!(
            secret.is_some() || cognito.is_some(),
            "COGNITO_USER_POOL_ID or JWT_SECRET must be set in the environment"
        );

        let leeway_secs: u64 = std::env::var("JWT_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("JWT_LEEWAY_SECS must be a valid u64");

        Self {
            secret,
            cognito,
            audience: non_empty("COGNITO_CLIENT_ID"),
            jwks: None,
            leeway_secs,
        }
    }
}

/// Download the user pool's public key set.
pub async fn fetch_jwks(pool: &CognitoPool) -> Result<JwkSet, reqwest::Error> {
    reqwest::get(pool.jwks_url())
        .await?
        .error_for_status()?
        .json::<JwkSet>()
        .await
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// The header algorithm picks the key: RS256 tokens are checked against the
/// key set entry named by `kid` plus the pool issuer and audience, HS256
/// tokens against the shared secret. Expiration is checked for both.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let header = decode_header(token)?;

    let (key, mut validation) = match header.alg {
        Algorithm::RS256 => {
            let jwks = config
                .jwks
                .as_ref()
                .ok_or(TokenError::AlgorithmNotAccepted(Algorithm::RS256))?;
            let jwk = header
                .kid
                .as_deref()
                .and_then(|kid| jwks.find(kid))
                .ok_or_else(|| TokenError::UnknownKey(header.kid.clone()))?;

            let mut validation = Validation::new(Algorithm::RS256);
            if let Some(pool) = &config.cognito {
                validation.set_issuer(&[pool.issuer()]);
            }
            match &config.audience {
                Some(audience) => validation.set_audience(&[audience]),
                None => validation.validate_aud = false,
            }
            (DecodingKey::from_jwk(jwk)?, validation)
        }
        Algorithm::HS256 => {
            let secret = config
                .secret
                .as_deref()
                .ok_or(TokenError::AlgorithmNotAccepted(Algorithm::HS256))?;
            let mut validation = Validation::new(Algorithm::HS256);
            validation.validate_aud = false;
            (DecodingKey::from_secret(secret.as_bytes()), validation)
        }
        other => return Err(TokenError::AlgorithmNotAccepted(other)),
    };

    validation.leeway = config.leeway_secs;
    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Sign an HS256 token for the given Cognito ID and role, valid for
/// `ttl_secs`.
///
/// Production tokens come from Cognito; this is used by local tooling and the
/// integration tests.
pub fn issue_token(
    cognito_id: &str,
    role: &str,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let secret = config
        .secret
        .as_deref()
        .ok_or(TokenError::AlgorithmNotAccepted(Algorithm::HS256))?;
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: cognito_id.to_string(),
        role: role.to_string(),
        exp: now + ttl_secs,
        iat: now,
        email: None,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}
