//! User role claim as carried by bearer tokens.

use serde::{Deserialize, Serialize};

/// A role claim extracted from a bearer token or persisted identity.
///
/// The backend has shipped several role formats over time: plain `"ADMIN"`,
/// Spring-style `"ROLE_ADMIN"`, and comma-joined lists like `"CLIENTE,ADMIN"`.
/// The raw string is kept verbatim; predicates match broadly on purpose.
///
/// This type only gates UI visibility. The server enforces authorization
/// independently; nothing here is a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Wrap a raw role string.
    #[must_use]
    pub const fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw role string as received from the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this role carries the administrator marker.
    ///
    /// Substring match on `"ADMIN"`, tolerating the `ROLE_` prefix convention
    /// and comma-joined role lists.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0.contains("ADMIN")
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
