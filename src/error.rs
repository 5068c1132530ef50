//! Error types for docacl

use thiserror::Error;

use crate::identity::ObjectIdentity;

/// The main error type for docacl operations
#[derive(Debug, Error)]
pub enum AclError {
    /// The object cannot yield an ACL identity (missing or invalid primary key).
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// An ACL already exists for this identity.
    #[error("ACL already exists for {0}")]
    DuplicateAcl(ObjectIdentity),

    /// No ACL is stored for this identity.
    #[error("no ACL found for {0}")]
    NotFound(ObjectIdentity),

    /// A rejected ACE insertion (position out of range).
    #[error("invalid ACE: {0}")]
    InvalidAce(String),

    /// A malformed sid string.
    #[error("invalid sid: {0}")]
    InvalidSid(String),

    /// A parent link that would make an ACL its own ancestor.
    #[error("circular parent link involving {0}")]
    CircularParent(ObjectIdentity),

    /// A concurrent update committed first; the caller's copy is stale.
    #[error("stale update for {identity}: expected version {expected}, store has {found}")]
    Conflict {
        identity: ObjectIdentity,
        expected: u64,
        found: u64,
    },

    /// `db::init` has not been called.
    #[error("not initialized")]
    Uninitialized,

    /// `db::init` was already called with a different path.
    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("storage error: {0}")]
    Storage(#[from] heed::Error),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for docacl operations
pub type Result<T> = std::result::Result<T, AclError>;
