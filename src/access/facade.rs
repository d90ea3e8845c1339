//! Access control façade
//!
//! Composes the token service, role authorizer, and ownership authorizer into
//! the decisions consumed by the routing layer. Handlers call the façade
//! before the business operation and act on the typed result; no handler
//! embeds authorization logic of its own, and no store write happens before
//! every check has passed.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use super::ownership::{self, AccessMethod};
use super::roles;
use super::throttle::{self, RateLimitClass};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::principal::{Principal, Role};
use crate::auth::token::{TokenKind, TokenPair, TokenService};
use crate::config::AuthConfig;
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{Result, SharelockError};
use crate::security::AuthTimer;
use crate::storage::{
    PrincipalStore, RefreshTokenStore, ResourceStore, StoredPrincipal, StoredResource, Visibility,
};
use crate::time::Clock;

/// Minimum time a login attempt is allowed to take
const DEFAULT_MIN_AUTH_DURATION: Duration = Duration::from_millis(100);

/// The authorization decision point for every protected operation
pub struct AccessControl {
    principals: Arc<dyn PrincipalStore>,
    resources: Arc<dyn ResourceStore>,
    tokens: TokenService,
    min_auth_duration: Duration,
}

impl AccessControl {
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        resources: Arc<dyn ResourceStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            principals,
            resources,
            tokens,
            min_auth_duration: DEFAULT_MIN_AUTH_DURATION,
        }
    }

    /// Build the façade and its token service from configuration
    pub fn from_config(
        config: &AuthConfig,
        principals: Arc<dyn PrincipalStore>,
        resources: Arc<dyn ResourceStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = TokenService::new(
            &config.token_secret,
            config.access_ttl,
            config.refresh_ttl,
            clock,
            refresh_tokens,
        );
        Self::new(principals, resources, tokens)
    }

    /// Override the login latency floor (tests shrink it to keep runs fast)
    pub fn with_min_auth_duration(mut self, min_auth_duration: Duration) -> Self {
        self.min_auth_duration = min_auth_duration;
        self
    }

    // --- registration and login ---

    /// Create a principal. Username uniqueness is enforced by the store.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        roles: HashSet<Role>,
    ) -> Result<()> {
        if username.trim().is_empty() {
            return Err(SharelockError::ValidationError(
                "username must not be empty".to_string(),
            ));
        }
        if roles.is_empty() {
            return Err(SharelockError::ValidationError(
                "at least one role is required".to_string(),
            ));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(SharelockError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let record = StoredPrincipal {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            roles,
            created_at: Utc::now(),
        };
        self.principals.create_principal(record).await?;

        log::info!("registered principal {}", username);
        Ok(())
    }

    /// Verify credentials and issue a token pair
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller, in error and in latency.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let timer = AuthTimer::new(self.min_auth_duration);

        let verified = match self.principals.get_principal(username).await? {
            Some(record) => verify_password(password, &record.password_hash),
            None => false,
        };

        if !verified {
            timer.wait().await;
            log::warn!("failed login attempt for {}", username);
            return Err(SharelockError::Forbidden);
        }

        let pair = self.tokens.issue_pair(username).await?;
        timer.wait().await;
        Ok(pair)
    }

    /// Issue a fresh pair for an already-authenticated subject
    pub async fn issue_tokens(&self, username: &str) -> Result<TokenPair> {
        self.tokens.issue_pair(username).await
    }

    /// Exchange a refresh token for a new pair, rotating the stored slot
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair> {
        self.tokens.rotate(refresh_token).await
    }

    // --- authorization decisions ---

    /// Resolve the principal behind an access token, fresh from the store
    ///
    /// Fails closed: a missing record or an unreadable store both come back
    /// as `Forbidden`, never as a default role grant.
    async fn resolve_principal(&self, token: &str) -> Result<Principal> {
        let claims = self.tokens.validate(token)?;
        claims.require_kind(TokenKind::Access)?;

        let record = self
            .principals
            .get_principal(&claims.sub)
            .await
            .map_err(|e| {
                log::warn!("principal lookup failed during authorization: {}", e);
                SharelockError::Forbidden
            })?
            .ok_or(SharelockError::Forbidden)?;

        Ok(Principal {
            username: record.username,
            roles: record.roles,
        })
    }

    /// Role-gated endpoint check; returns the authorized subject
    pub async fn authorize_role(
        &self,
        token: &str,
        required_roles: &HashSet<Role>,
    ) -> Result<String> {
        let principal = self.resolve_principal(token).await?;
        roles::authorize_roles(&principal.roles, required_roles)?;
        Ok(principal.username)
    }

    /// Resolve principal and target record, then run the ownership policy
    ///
    /// A missing record is treated as private for the decision, so probing
    /// another user's namespace reads the same whether or not it is occupied.
    async fn check_resource_access(
        &self,
        token: &str,
        resource_owner: &str,
        method: AccessMethod,
    ) -> Result<(Principal, Option<StoredResource>)> {
        let principal = self.resolve_principal(token).await?;
        let existing = self.resources.get_resource(resource_owner).await?;
        let visibility = existing
            .as_ref()
            .map(|r| r.visibility)
            .unwrap_or(Visibility::Private);

        ownership::authorize_ownership(method, resource_owner, &principal, visibility)?;
        Ok((principal, existing))
    }

    /// Resource endpoint check; returns the authorized subject
    pub async fn authorize_ownership(
        &self,
        token: &str,
        resource_owner: &str,
        method: AccessMethod,
    ) -> Result<String> {
        let (principal, _) = self
            .check_resource_access(token, resource_owner, method)
            .await?;
        Ok(principal.username)
    }

    /// Throttle class for the surrounding rate limiter
    ///
    /// Infallible: anything that cannot be resolved lands in the most
    /// restrictive class.
    pub async fn rate_limit_class(&self, token: &str) -> RateLimitClass {
        match self.resolve_principal(token).await {
            Ok(principal) => throttle::classify(&principal.roles),
            Err(_) => RateLimitClass::Restricted,
        }
    }

    // --- admin operations ---

    /// Replace a principal's role set; admin only
    ///
    /// The change is visible to the very next authorization call; nothing is
    /// cached between calls.
    pub async fn set_roles(
        &self,
        token: &str,
        username: &str,
        roles: HashSet<Role>,
    ) -> Result<()> {
        self.authorize_role(token, &HashSet::from([Role::Admin]))
            .await?;

        if roles.is_empty() {
            return Err(SharelockError::ValidationError(
                "at least one role is required".to_string(),
            ));
        }

        self.principals.update_roles(username, roles).await?;
        log::info!("updated roles for {}", username);
        Ok(())
    }

    // --- guarded resource operations ---

    /// Create the caller's resource record
    pub async fn create_resource(
        &self,
        token: &str,
        owner: &str,
        content: &str,
        visibility: Visibility,
    ) -> Result<()> {
        let (_, existing) = self
            .check_resource_access(token, owner, AccessMethod::Write)
            .await?;
        if existing.is_some() {
            return Err(SharelockError::DuplicateResource);
        }

        self.resources
            .put_resource(StoredResource {
                owner: owner.to_string(),
                content: content.to_string(),
                visibility,
                updated_at: Utc::now(),
            })
            .await
    }

    /// Read a resource record, honoring visibility
    pub async fn read_resource(&self, token: &str, owner: &str) -> Result<StoredResource> {
        let (_, existing) = self
            .check_resource_access(token, owner, AccessMethod::Read)
            .await?;
        existing.ok_or(SharelockError::ResourceNotFound)
    }

    /// Append to a resource record and replace its visibility
    ///
    /// Content is append-only; an update never truncates what is already
    /// there.
    pub async fn append_resource(
        &self,
        token: &str,
        owner: &str,
        content: &str,
        visibility: Visibility,
    ) -> Result<()> {
        let (_, existing) = self
            .check_resource_access(token, owner, AccessMethod::Write)
            .await?;
        let mut record = existing.ok_or(SharelockError::ResourceNotFound)?;

        record.content.push_str(content);
        record.visibility = visibility;
        record.updated_at = Utc::now();
        self.resources.put_resource(record).await
    }

    /// Delete a resource record
    pub async fn delete_resource(&self, token: &str, owner: &str) -> Result<()> {
        let (_, existing) = self
            .check_resource_access(token, owner, AccessMethod::Delete)
            .await?;
        if existing.is_none() {
            return Err(SharelockError::ResourceNotFound);
        }

        self.resources.delete_resource(owner).await
    }
}
