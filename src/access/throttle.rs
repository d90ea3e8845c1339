//! Role-sensitive throttle classification
//!
//! The engine does not rate-limit anything itself; it hands the surrounding
//! rate limiter a classification derived purely from the resolved role set.

use std::collections::HashSet;
use std::time::Duration;

use crate::auth::principal::Role;
use crate::constants::{
    PRIVILEGED_REQUESTS_PER_MINUTE, RESTRICTED_REQUESTS_PER_MINUTE,
    STANDARD_REQUESTS_PER_MINUTE,
};

/// Throttle class handed to the rate-limiting collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitClass {
    /// Admins (least restrictive)
    Privileged,
    /// Regular authenticated users
    Standard,
    /// Guests, anonymous callers, and anything that failed to resolve
    Restricted,
}

impl RateLimitClass {
    /// Steady-state requests per minute allowed for this class
    pub fn requests_per_minute(&self) -> u32 {
        match self {
            RateLimitClass::Privileged => PRIVILEGED_REQUESTS_PER_MINUTE,
            RateLimitClass::Standard => STANDARD_REQUESTS_PER_MINUTE,
            RateLimitClass::Restricted => RESTRICTED_REQUESTS_PER_MINUTE,
        }
    }
}

/// Rate limit parameters for a throttle class
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    /// Extra requests allowed in a short burst
    pub burst_allowance: u32,
    /// Window over which the burst allowance refills
    pub burst_window: Duration,
}

impl RateLimitConfig {
    pub fn for_class(class: RateLimitClass) -> Self {
        let burst_allowance = match class {
            RateLimitClass::Privileged => 50,
            RateLimitClass::Standard => 10,
            RateLimitClass::Restricted => 5,
        };
        Self {
            requests_per_minute: class.requests_per_minute(),
            burst_allowance,
            burst_window: Duration::from_secs(10),
        }
    }
}

/// Classify a resolved role set
///
/// Pure function; an empty or unrecognized set lands in the most restrictive
/// class, never a more generous default.
pub fn classify(roles: &HashSet<Role>) -> RateLimitClass {
    if roles.contains(&Role::Admin) {
        RateLimitClass::Privileged
    } else if roles.contains(&Role::User) {
        RateLimitClass::Standard
    } else {
        RateLimitClass::Restricted
    }
}
