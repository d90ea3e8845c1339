//! In-memory storage implementation for development and testing
//!
//! Keeps all records in RwLock-guarded maps. Writes to the same key serialize
//! on the lock, so per-key reads always observe the latest completed write.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::*;
use crate::auth::principal::Role;
use crate::error::{Result, SharelockError};

/// In-memory backend implementing all three record collections
#[derive(Default)]
pub struct MemoryStore {
    principals: Arc<RwLock<HashMap<String, StoredPrincipal>>>,
    resources: Arc<RwLock<HashMap<String, StoredResource>>>,
    refresh_tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn get_principal(&self, username: &str) -> Result<Option<StoredPrincipal>> {
        let principals = self.principals.read().await;
        Ok(principals.get(username).cloned())
    }

    async fn create_principal(&self, principal: StoredPrincipal) -> Result<()> {
        let mut principals = self.principals.write().await;
        if principals.contains_key(&principal.username) {
            return Err(SharelockError::DuplicatePrincipal);
        }
        principals.insert(principal.username.clone(), principal);
        Ok(())
    }

    async fn update_roles(&self, username: &str, roles: HashSet<Role>) -> Result<()> {
        let mut principals = self.principals.write().await;
        match principals.get_mut(username) {
            Some(record) => {
                record.roles = roles;
                Ok(())
            }
            None => Err(SharelockError::PrincipalNotFound),
        }
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get_resource(&self, owner: &str) -> Result<Option<StoredResource>> {
        let resources = self.resources.read().await;
        Ok(resources.get(owner).cloned())
    }

    async fn put_resource(&self, resource: StoredResource) -> Result<()> {
        let mut resources = self.resources.write().await;
        resources.insert(resource.owner.clone(), resource);
        Ok(())
    }

    async fn delete_resource(&self, owner: &str) -> Result<()> {
        let mut resources = self.resources.write().await;
        match resources.remove(owner) {
            Some(_) => Ok(()),
            None => Err(SharelockError::ResourceNotFound),
        }
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn get_refresh_token(&self, username: &str) -> Result<Option<String>> {
        let tokens = self.refresh_tokens.read().await;
        Ok(tokens.get(username).cloned())
    }

    async fn put_refresh_token(&self, username: &str, token: &str) -> Result<()> {
        let mut tokens = self.refresh_tokens.write().await;
        tokens.insert(username.to_string(), token.to_string());
        Ok(())
    }
}
