//! Engine configuration module
//! Handles the signing secret and token lifetime parameters

use crate::constants::{
    DEFAULT_ACCESS_TTL_MINUTES, DEFAULT_REFRESH_TTL_MINUTES, MIN_SECRET_LENGTH,
};
use crate::error::{Result, SharelockError};
use std::env;
use std::time::Duration;

/// Credential engine configuration parameters
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret for token issuance/validation
    pub token_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        panic!("AuthConfig::default() is not allowed for security reasons. Use AuthConfig::from_env() instead.");
    }
}

impl AuthConfig {
    /// Create a test configuration - DANGEROUS: Only for testing!
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            token_secret: "unit-testing-signing-key-0123456789-never-production".to_string(),
            access_ttl: Duration::from_secs(DEFAULT_ACCESS_TTL_MINUTES * 60),
            refresh_ttl: Duration::from_secs(DEFAULT_REFRESH_TTL_MINUTES * 60),
        }
    }

    /// Validate that the signing secret meets security requirements
    fn validate_secret(secret: &str) -> Result<()> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(SharelockError::ConfigError(format!(
                "signing secret must be at least {} characters long",
                MIN_SECRET_LENGTH
            )));
        }

        // Check for insecure default or example values
        let insecure_patterns = ["your-secret-key", "change-this", "example", "password", "12345"];
        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(SharelockError::ConfigError(format!(
                    "signing secret contains insecure pattern '{}'. Generate one with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        // Ensure some complexity
        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SharelockError::ConfigError(
                "signing secret should mix letters, numbers, and symbols".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from environment variables (and a .env file if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token_secret = env::var("SHARELOCK_TOKEN_SECRET")
            .or_else(|_| env::var("TOKEN_SECRET"))
            .map_err(|_| {
                SharelockError::ConfigError(
                    "SHARELOCK_TOKEN_SECRET environment variable is required. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let access_ttl_minutes = env::var("SHARELOCK_ACCESS_TTL_MINUTES")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TTL_MINUTES);

        let refresh_ttl_minutes = env::var("SHARELOCK_REFRESH_TTL_MINUTES")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_TTL_MINUTES);

        if access_ttl_minutes == 0 {
            return Err(SharelockError::ConfigError(
                "access token lifetime must be at least one minute".to_string(),
            ));
        }

        if refresh_ttl_minutes <= access_ttl_minutes {
            return Err(SharelockError::ConfigError(
                "refresh token lifetime must exceed access token lifetime".to_string(),
            ));
        }

        Self::validate_secret(&token_secret)?;

        Ok(Self {
            token_secret,
            access_ttl: Duration::from_secs(access_ttl_minutes * 60),
            refresh_ttl: Duration::from_secs(refresh_ttl_minutes * 60),
        })
    }
}
