// Token lifetime defaults (minutes)
pub const DEFAULT_ACCESS_TTL_MINUTES: u64 = 15;
pub const DEFAULT_REFRESH_TTL_MINUTES: u64 = 1440;

// Throttle allowances (requests per minute) by classification
pub const PRIVILEGED_REQUESTS_PER_MINUTE: u32 = 1000;
pub const STANDARD_REQUESTS_PER_MINUTE: u32 = 50;
pub const RESTRICTED_REQUESTS_PER_MINUTE: u32 = 20;

// Boundary validation constants
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_SECRET_LENGTH: usize = 32;
