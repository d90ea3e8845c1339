use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SharelockError};

/// Endpoint-level roles. Closed set; unknown names are rejected at the
/// boundary instead of being carried along as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharelockError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "guest" => Ok(Role::Guest),
            other => Err(SharelockError::ValidationError(format!(
                "unknown role: {}",
                other
            ))),
        }
    }
}

/// Parse a list of role names, rejecting the whole list on any unknown value
pub fn parse_roles<'a, I>(names: I) -> Result<HashSet<Role>>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(Role::from_str).collect()
}

/// An authenticated identity: username plus the roles on record for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub roles: HashSet<Role>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::User, Role::Guest] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_parse_roles_rejects_mixed_lists() {
        assert!(parse_roles(["admin", "intruder"]).is_err());

        let roles = parse_roles(["admin", "user"]).unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(&Role::Admin));
    }

    #[test]
    fn test_is_admin() {
        let principal = Principal {
            username: "alice".to_string(),
            roles: HashSet::from([Role::Admin, Role::User]),
        };
        assert!(principal.is_admin());

        let principal = Principal {
            username: "bob".to_string(),
            roles: HashSet::from([Role::User]),
        };
        assert!(!principal.is_admin());
    }
}
