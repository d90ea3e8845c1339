//! Sharelock - credential and access-control engine for a resource-sharing API
//!
//! This library provides token issuance/validation/rotation, role-based
//! permission evaluation, and ownership-based authorization for per-user
//! resources. Transport, routing, and durable storage are external
//! collaborators consumed through the interfaces in [`storage`] and [`time`].

pub mod access;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod security;
pub mod storage;
pub mod time;

// Re-export main components
pub use access::{AccessControl, AccessMethod, RateLimitClass};
pub use auth::{Claims, Principal, Role, TokenKind, TokenPair, TokenService};
pub use config::AuthConfig;
pub use constants::*;
pub use error::{Result, SharelockError};
pub use storage::{MemoryStore, Visibility};
pub use time::{Clock, ManualClock, SystemClock};
