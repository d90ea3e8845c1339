//! Abstract storage interfaces for pluggable backends
//!
//! The engine owns no persistent state of its own; everything durable lives
//! behind these traits. Backends must be read-after-write consistent for a
//! single key and must serialize concurrent writes to the same record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::auth::principal::Role;
use crate::error::Result;

/// Resource visibility flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// Persisted user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrincipal {
    pub username: String,
    /// Argon2 PHC digest; plaintext is never stored
    pub password_hash: String,
    pub roles: HashSet<Role>,
    pub created_at: DateTime<Utc>,
}

/// Persisted per-user resource record, keyed by its owner's username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResource {
    pub owner: String,
    pub content: String,
    pub visibility: Visibility,
    pub updated_at: DateTime<Utc>,
}

/// Principal record storage interface
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Look up a principal by username
    async fn get_principal(&self, username: &str) -> Result<Option<StoredPrincipal>>;

    /// Insert a new principal; fails with `DuplicatePrincipal` if the
    /// username is already taken
    async fn create_principal(&self, principal: StoredPrincipal) -> Result<()>;

    /// Replace a principal's role set; fails with `PrincipalNotFound` if the
    /// username is unknown
    async fn update_roles(&self, username: &str, roles: HashSet<Role>) -> Result<()>;
}

/// Resource record storage interface
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Look up the resource owned by `owner`
    async fn get_resource(&self, owner: &str) -> Result<Option<StoredResource>>;

    /// Insert or replace the owner's resource record
    async fn put_resource(&self, resource: StoredResource) -> Result<()>;

    /// Remove the owner's resource record; fails with `ResourceNotFound` if
    /// there is nothing to delete
    async fn delete_resource(&self, owner: &str) -> Result<()>;
}

/// Single-slot refresh token record per username
///
/// `put` overwrites unconditionally; the previous token is gone the moment a
/// newer one lands.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn get_refresh_token(&self, username: &str) -> Result<Option<String>>;

    async fn put_refresh_token(&self, username: &str, token: &str) -> Result<()>;
}
