//! JWT service for login tokens
//!
//! Tokens are signed with HS256 and carry the matched directory entry. They
//! have no expiry and nothing in the service verifies them on later requests.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::models::UserCredential;

/// Signing secret used when `JWT_SECRET` is not set
pub const DEFAULT_JWT_SECRET: &str = "hackertuoicc";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for signing tokens
    pub secret: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC signing secret (default: built-in development secret)
    pub fn from_env() -> Self {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => JwtConfig { secret },
            _ => {
                warn!("JWT_SECRET not set, signing tokens with the built-in secret");
                JwtConfig {
                    secret: DEFAULT_JWT_SECRET.to_string(),
                }
            }
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The directory entry that matched at login
    pub user: UserCredential,
    /// Issued at time
    pub iat: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        JwtService {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a login token for a directory entry
    pub fn generate_token(&self, user: &UserCredential) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            user: user.clone(),
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
