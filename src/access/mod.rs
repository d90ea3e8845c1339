//! Authorization policies and the access control façade

pub mod facade;
pub mod ownership;
pub mod roles;
pub mod throttle;

// Re-export main components
pub use facade::AccessControl;
pub use ownership::{authorize_ownership, AccessMethod};
pub use roles::authorize_roles;
pub use throttle::{classify, RateLimitClass, RateLimitConfig};
