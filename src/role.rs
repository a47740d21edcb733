//! Roles and their decoding from untrusted session claims

use serde::{Deserialize, Serialize};

/// Coarse identity classification of an authenticated principal.
///
/// Only `ADMIN` and `USER` are defined roles. Every other value decodes to
/// [`Role::Unrecognized`], which grants nothing and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum Role {
    Admin,
    User,
    Unrecognized,
}

pub const ADMIN: &str = "ADMIN";
pub const USER: &str = "USER";
pub const UNRECOGNIZED: &str = "UNRECOGNIZED";

impl Role {
    /// Decode a role string by exact match. No trimming, no case folding.
    pub fn parse(s: &str) -> Role {
        match s {
            ADMIN => Role::Admin,
            USER => Role::User,
            _ => Role::Unrecognized,
        }
    }

    /// Decode an optional role claim. A missing claim is the least
    /// privileged state, never an administrator.
    pub fn from_claim(claim: Option<&str>) -> Role {
        let role = claim.map(Role::parse).unwrap_or(Role::Unrecognized);
        if role == Role::Unrecognized {
            tracing::warn!(claim = ?claim, "unrecognized role claim");
        }
        role
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN,
            Role::User => USER,
            Role::Unrecognized => UNRECOGNIZED,
        }
    }

    /// True for `Admin` and `User`.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized)
    }
}

/// The least privileged state.
impl Default for Role {
    fn default() -> Self {
        Role::Unrecognized
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Option<String>> for Role {
    fn from(s: Option<String>) -> Self {
        s.map(Role::from).unwrap_or_default()
    }
}

impl From<Role> for &'static str {
    fn from(r: Role) -> Self {
        r.as_str()
    }
}
