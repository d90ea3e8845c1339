//! Storage interfaces and the in-memory backend

pub mod memory;
pub mod traits;

// Re-export main components
pub use memory::MemoryStore;
pub use traits::{
    PrincipalStore, RefreshTokenStore, ResourceStore, StoredPrincipal, StoredResource, Visibility,
};
