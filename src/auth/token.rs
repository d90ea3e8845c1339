use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, SharelockError};
use crate::security::constant_time_eq;
use crate::storage::RefreshTokenStore;
use crate::time::Clock;

/// Token kind. An endpoint expecting one kind must reject the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed claim set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Token kind
    pub kind: TokenKind,
    /// Expiration time (as UTC timestamp)
    pub exp: u64,
    /// Issued at (as UTC timestamp)
    pub iat: u64,
    /// Not before (as UTC timestamp)
    pub nbf: u64,
}

impl Claims {
    fn new(subject: &str, kind: TokenKind, now: u64, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            kind,
            exp: now + ttl.as_secs(),
            iat: now,
            nbf: now,
        }
    }

    /// Fails with `WrongTokenKind` unless the claims carry the expected kind
    pub fn require_kind(&self, expected: TokenKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(SharelockError::WrongTokenKind)
        }
    }
}

/// Freshly issued access/refresh pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues, validates, and rotates signed tokens
///
/// Refresh tokens live in a single per-subject slot: issuing a new one
/// overwrites the old, so any earlier refresh token is revoked the moment a
/// newer one exists.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
    refresh_store: Arc<dyn RefreshTokenStore>,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
        clock: Arc<dyn Clock>,
        refresh_store: Arc<dyn RefreshTokenStore>,
    ) -> Self {
        // Expiry is checked against the injected clock below, not against
        // jsonwebtoken's view of system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
            clock,
            refresh_store,
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Issue a signed token for `subject`
    ///
    /// Refresh issuance overwrites the subject's refresh slot; access
    /// issuance has no side effect.
    pub async fn issue(&self, subject: &str, kind: TokenKind) -> Result<String> {
        let claims = Claims::new(subject, kind, self.clock.now_unix(), self.ttl(kind));
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SharelockError::SystemError(format!("token signing failed: {}", e)))?;

        if kind == TokenKind::Refresh {
            self.refresh_store.put_refresh_token(subject, &token).await?;
        }

        Ok(token)
    }

    /// Issue a fresh access/refresh pair for `subject`
    pub async fn issue_pair(&self, subject: &str) -> Result<TokenPair> {
        let access = self.issue(subject, TokenKind::Access).await?;
        let refresh = self.issue(subject, TokenKind::Refresh).await?;
        Ok(TokenPair { access, refresh })
    }

    /// Verify signature, structure, and expiry
    ///
    /// Kind is not checked here; callers assert the kind they expect via
    /// [`Claims::require_kind`].
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            log::debug!("token decode failed: {}", e);
            SharelockError::MalformedToken
        })?;

        let claims = data.claims;

        // Zero skew allowance: the token is dead the second it expires
        if self.clock.now_unix() >= claims.exp {
            return Err(SharelockError::ExpiredToken);
        }

        Ok(claims)
    }

    /// Exchange a refresh token for a fresh pair
    ///
    /// The presented token must match the subject's stored slot exactly;
    /// anything else has been superseded by a later login or refresh.
    pub async fn rotate(&self, presented: &str) -> Result<TokenPair> {
        let claims = self.validate(presented)?;
        claims.require_kind(TokenKind::Refresh)?;

        match self.refresh_store.get_refresh_token(&claims.sub).await? {
            Some(current) if constant_time_eq(&current, presented) => {
                self.issue_pair(&claims.sub).await
            }
            _ => {
                log::warn!("rejected superseded refresh token for {}", claims.sub);
                Err(SharelockError::RefreshTokenRevoked)
            }
        }
    }
}
