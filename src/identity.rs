//! Compact ObjectIdentity representation using a length-prefixed byte array.
//!
//! Format: [type_len: u8][type_bytes][key_bytes]
//!
//! Benefits over a "type:key" string:
//! - O(1) type/key extraction (no colon scanning)
//! - Usable directly as an LMDB key
//! - Prefix scans still work for "all objects of type X"
//! - No collision risk (unlike hashing)

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{AclError, Result};

/// Maximum length for a type name (255 bytes)
pub const MAX_TYPE_LEN: usize = 255;

/// Stable (type, primary-key) handle for a securable object.
///
/// Internally stores: [type_len: u8][type_bytes][key_bytes]
#[derive(Clone)]
pub struct ObjectIdentity {
    data: Box<[u8]>,
}

impl ObjectIdentity {
    /// Create from separate type name and primary key.
    pub fn new(type_name: &str, key: &str) -> Result<Self> {
        let type_bytes = type_name.as_bytes();
        let key_bytes = key.as_bytes();

        if type_bytes.is_empty() {
            return Err(AclError::InvalidObject("type name cannot be empty".into()));
        }
        if type_bytes.len() > MAX_TYPE_LEN {
            return Err(AclError::InvalidObject(format!(
                "type name too long: {} bytes (max {})",
                type_bytes.len(),
                MAX_TYPE_LEN
            )));
        }
        if key_bytes.is_empty() {
            return Err(AclError::InvalidObject("primary key cannot be empty".into()));
        }

        let mut data = Vec::with_capacity(1 + type_bytes.len() + key_bytes.len());
        data.push(type_bytes.len() as u8);
        data.extend_from_slice(type_bytes);
        data.extend_from_slice(key_bytes);

        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    /// Parse from "type:key" string format.
    pub fn parse(s: &str) -> Result<Self> {
        let (type_name, key) = s.split_once(':').ok_or_else(|| {
            AclError::InvalidObject(format!("invalid identity '{}': must be 'type:key'", s))
        })?;
        Self::new(type_name, key)
    }

    /// Create from raw bytes (deserialization from storage). Validates the format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AclError::InvalidObject("empty byte array".into()));
        }
        let type_len = bytes[0] as usize;
        if type_len == 0 {
            return Err(AclError::InvalidObject("type length cannot be zero".into()));
        }
        if bytes.len() < 1 + type_len + 1 {
            return Err(AclError::InvalidObject(format!(
                "byte array too short: need at least {} bytes, got {}",
                1 + type_len + 1,
                bytes.len()
            )));
        }
        std::str::from_utf8(&bytes[1..1 + type_len])
            .map_err(|e| AclError::InvalidObject(format!("invalid UTF-8 in type name: {}", e)))?;
        std::str::from_utf8(&bytes[1 + type_len..])
            .map_err(|e| AclError::InvalidObject(format!("invalid UTF-8 in key: {}", e)))?;

        Ok(Self { data: bytes.into() })
    }

    /// Get the type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        let len = self.data[0] as usize;
        // SAFETY: we validate UTF-8 on construction
        unsafe { std::str::from_utf8_unchecked(&self.data[1..1 + len]) }
    }

    /// Get the primary key (the part after the type).
    #[inline]
    pub fn key(&self) -> &str {
        let len = self.data[0] as usize;
        // SAFETY: we validate UTF-8 on construction
        unsafe { std::str::from_utf8_unchecked(&self.data[1 + len..]) }
    }

    /// Get the raw bytes for storage.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Generate prefix bytes for scanning all objects of a type.
    pub fn prefix_for_type(type_name: &str) -> Vec<u8> {
        let type_bytes = type_name.as_bytes();
        let mut prefix = Vec::with_capacity(1 + type_bytes.len());
        prefix.push(type_bytes.len() as u8);
        prefix.extend_from_slice(type_bytes);
        prefix
    }

    /// Check if this identity's bytes start with the given prefix.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data.starts_with(prefix)
    }
}

impl PartialEq for ObjectIdentity {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for ObjectIdentity {}

impl PartialOrd for ObjectIdentity {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectIdentity {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.data.cmp(&other.data)
    }
}

impl Hash for ObjectIdentity {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name(), self.key())
    }
}

impl fmt::Debug for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIdentity")
            .field("type", &self.type_name())
            .field("key", &self.key())
            .finish()
    }
}

impl AsRef<[u8]> for ObjectIdentity {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl serde::Serialize for ObjectIdentity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // "type:key" string for JSON compatibility
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ObjectIdentity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Securable capability
// ============================================================================

/// Capability for domain objects that can own an ACL.
///
/// Any type that can name itself and produce a primary key participates;
/// no inheritance hierarchy required.
pub trait Securable {
    /// Stable type name used in the ACL identity.
    fn type_name(&self) -> &str;

    /// Primary key, or `None` if the object has not been assigned one yet.
    fn primary_key(&self) -> Option<&str>;

    /// Parent object in the document hierarchy, if any.
    fn parent(&self) -> Option<&dyn Securable> {
        None
    }
}

/// Map a securable object to its ACL identity.
///
/// Deterministic: the same (type, key) pair always yields the same identity.
/// Fails with `InvalidObject` if the object has no primary key yet.
pub fn identity_for(object: &dyn Securable) -> Result<ObjectIdentity> {
    let key = object.primary_key().ok_or_else(|| {
        AclError::InvalidObject(format!(
            "{} has no primary key assigned",
            object.type_name()
        ))
    })?;
    ObjectIdentity::new(object.type_name(), key)
}

// ============================================================================
// Tests
// ============================================================================
