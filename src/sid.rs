//! Security identifiers (principals and roles)

use std::fmt;

use crate::error::{AclError, Result};

/// A security identifier: either a concrete principal (user) or a role.
///
/// Value-equality; an ACE granted to `Role("editor")` matches any caller
/// whose sid list includes that role.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Sid {
    Principal(String),
    Role(String),
}

impl Sid {
    /// Sid for a concrete user.
    pub fn principal(name: impl Into<String>) -> Self {
        Sid::Principal(name.into())
    }

    /// Sid for a role.
    pub fn role(name: impl Into<String>) -> Self {
        Sid::Role(name.into())
    }

    /// The principal or role name.
    pub fn name(&self) -> &str {
        match self {
            Sid::Principal(n) | Sid::Role(n) => n,
        }
    }

    /// Parse from "user:name" or "role:name" string format.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some(("user", n)) if !n.is_empty() => Ok(Sid::Principal(n.to_string())),
            Some(("role", n)) if !n.is_empty() => Ok(Sid::Role(n.to_string())),
            _ => Err(AclError::InvalidSid(format!(
                "'{}' must be 'user:name' or 'role:name'",
                s
            ))),
        }
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sid::Principal(n) => write!(f, "user:{}", n),
            Sid::Role(n) => write!(f, "role:{}", n),
        }
    }
}

impl fmt::Debug for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sid({})", self)
    }
}

impl serde::Serialize for Sid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Sid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        Sid::parse(&s).map_err(serde::de::Error::custom)
    }
}
