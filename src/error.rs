use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SharelockError {
    // Token errors
    MalformedToken,
    ExpiredToken,
    WrongTokenKind,
    RefreshTokenRevoked,

    // Principal errors
    PrincipalNotFound,
    DuplicatePrincipal,

    // Resource errors
    ResourceNotFound,
    DuplicateResource,

    // Authorization errors
    Forbidden,

    // Validation errors
    ValidationError(String),

    // Storage errors
    StoreUnavailable(String),

    // Configuration errors
    ConfigError(String),

    // System errors
    SystemError(String),
}

// Display strings are stable and deliberately vague: token errors never say
// whether a username exists, ownership failures never describe the resource.
impl fmt::Display for SharelockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "Token is malformed or has an invalid signature"),
            Self::ExpiredToken => write!(f, "Token has expired"),
            Self::WrongTokenKind => write!(f, "Token kind is not valid for this operation"),
            Self::RefreshTokenRevoked => {
                write!(f, "Refresh token is no longer valid; re-authentication required")
            }
            Self::PrincipalNotFound => write!(f, "Principal not found"),
            Self::DuplicatePrincipal => write!(f, "Username is already taken"),
            Self::ResourceNotFound => write!(f, "Resource not found"),
            Self::DuplicateResource => write!(f, "Resource already exists"),
            Self::Forbidden => write!(f, "Forbidden: insufficient permissions"),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::SystemError(msg) => write!(f, "System error: {}", msg),
        }
    }
}

impl Error for SharelockError {}

// Generic result type for Sharelock
pub type Result<T> = std::result::Result<T, SharelockError>;
