//! Role-based endpoint authorization

use std::collections::HashSet;

use crate::auth::principal::Role;
use crate::error::{Result, SharelockError};

/// Decide whether a principal's role set satisfies an endpoint's required set
///
/// A required set containing `Guest` marks the endpoint open to everyone.
/// Admin satisfies any other requirement. An empty principal role set is
/// always denied; a failed role lookup must never pass as guest access.
pub fn authorize_roles(
    principal_roles: &HashSet<Role>,
    required_roles: &HashSet<Role>,
) -> Result<()> {
    if required_roles.contains(&Role::Guest) {
        return Ok(());
    }

    if principal_roles.is_empty() {
        return Err(SharelockError::Forbidden);
    }

    if principal_roles.contains(&Role::Admin) {
        return Ok(());
    }

    if principal_roles
        .iter()
        .any(|role| required_roles.contains(role))
    {
        return Ok(());
    }

    Err(SharelockError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(list: &[Role]) -> HashSet<Role> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_guest_requirement_opens_the_endpoint() {
        let required = roles(&[Role::Guest]);
        assert!(authorize_roles(&roles(&[]), &required).is_ok());
        assert!(authorize_roles(&roles(&[Role::User]), &required).is_ok());
    }

    #[test]
    fn test_admin_satisfies_any_requirement() {
        let admin = roles(&[Role::Admin]);
        assert!(authorize_roles(&admin, &roles(&[Role::User])).is_ok());
        assert!(authorize_roles(&admin, &roles(&[Role::Admin])).is_ok());
        assert!(authorize_roles(&admin, &roles(&[Role::Admin, Role::User])).is_ok());
    }

    #[test]
    fn test_empty_principal_roles_always_denied() {
        let result = authorize_roles(&roles(&[]), &roles(&[Role::User]));
        assert!(matches!(result, Err(SharelockError::Forbidden)));
    }

    #[test]
    fn test_intersection_grants_access() {
        let user = roles(&[Role::User]);
        assert!(authorize_roles(&user, &roles(&[Role::Admin, Role::User])).is_ok());

        let result = authorize_roles(&user, &roles(&[Role::Admin]));
        assert!(matches!(result, Err(SharelockError::Forbidden)));
    }
}
