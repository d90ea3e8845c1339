//! Resource ownership authorization

use crate::auth::principal::Principal;
use crate::error::{Result, SharelockError};
use crate::storage::Visibility;

/// How the caller intends to act on the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMethod {
    Read,
    Write,
    Delete,
}

/// Decide whether `principal` may act on the resource owned by `resource_owner`
///
/// Checks run in order: admin bypass, then the public-read exception, then
/// owner match. The ordering is load-bearing; public read is the only path
/// by which a non-owner, non-admin principal is ever granted access.
pub fn authorize_ownership(
    method: AccessMethod,
    resource_owner: &str,
    principal: &Principal,
    visibility: Visibility,
) -> Result<()> {
    if principal.is_admin() {
        return Ok(());
    }

    if method == AccessMethod::Read && visibility == Visibility::Public {
        return Ok(());
    }

    if resource_owner == principal.username {
        return Ok(());
    }

    Err(SharelockError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::principal::Role;
    use std::collections::HashSet;

    fn principal(username: &str, roles: &[Role]) -> Principal {
        Principal {
            username: username.to_string(),
            roles: roles.iter().copied().collect(),
        }
    }

    #[test]
    fn test_non_owner_denied_on_private_resource() {
        let bob = principal("bob", &[Role::User]);
        let result = authorize_ownership(AccessMethod::Read, "alice", &bob, Visibility::Private);
        assert!(matches!(result, Err(SharelockError::Forbidden)));
    }

    #[test]
    fn test_public_read_allowed_for_non_owner() {
        let bob = principal("bob", &[Role::User]);
        assert!(
            authorize_ownership(AccessMethod::Read, "alice", &bob, Visibility::Public).is_ok()
        );
    }

    #[test]
    fn test_public_visibility_does_not_allow_writes() {
        let bob = principal("bob", &[Role::User]);
        let result = authorize_ownership(AccessMethod::Write, "alice", &bob, Visibility::Public);
        assert!(matches!(result, Err(SharelockError::Forbidden)));

        let result = authorize_ownership(AccessMethod::Delete, "alice", &bob, Visibility::Public);
        assert!(matches!(result, Err(SharelockError::Forbidden)));
    }

    #[test]
    fn test_owner_allowed_for_any_method() {
        let alice = principal("alice", &[Role::Guest]);
        for method in [AccessMethod::Read, AccessMethod::Write, AccessMethod::Delete] {
            assert!(
                authorize_ownership(method, "alice", &alice, Visibility::Private).is_ok()
            );
        }
    }

    #[test]
    fn test_admin_bypasses_ownership_and_visibility() {
        let root = principal("root", &[Role::Admin]);
        for method in [AccessMethod::Read, AccessMethod::Write, AccessMethod::Delete] {
            assert!(
                authorize_ownership(method, "alice", &root, Visibility::Private).is_ok()
            );
        }
    }

    #[test]
    fn test_principal_with_empty_roles_can_still_own() {
        let alice = principal("alice", &[]);
        assert!(
            authorize_ownership(AccessMethod::Write, "alice", &alice, Visibility::Private).is_ok()
        );
    }
}
