//! Bearer-token claims decoder.
//!
//! Decodes the payload segment of a JWT-shaped bearer token to extract the
//! subject, role claim, and expiry for UI purposes. The signature is NOT
//! verified - verification is the server's responsibility, and this decoder
//! must never be treated as an authorization boundary. Adding client-side
//! signature checks here would only create a false sense of security.
//!
//! Any parse failure yields `None` for the whole result: callers treat that
//! as "could not establish identity", not as an error to surface.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

use levelup_core::Role;

/// The decoded payload of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject claim (`sub`), usually the username.
    pub subject: Option<String>,
    /// Resolved role claim, if any of the known claim names carried one.
    pub role: Option<Role>,
    /// Expiry (`exp`) as epoch seconds.
    pub expires_at: Option<i64>,
}

impl Claims {
    /// Whether the claims are expired relative to `now` (epoch seconds).
    ///
    /// A token without an `exp` claim never counts as expired.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Raw claim names as the backend has emitted them over time.
///
/// The role has historically appeared under `role`, `rol`, the first element
/// of a `roles` array, or the first element of an `authorities` array.
/// Keeping the variants in one typed struct avoids scattering
/// `payload.role || payload.rol || ...` chains across call sites.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    exp: Option<f64>,
    role: Option<String>,
    rol: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    authorities: Vec<String>,
}

impl RawClaims {
    /// First non-empty role claim, in priority order.
    fn resolve_role(self) -> Option<Role> {
        [
            self.role,
            self.rol,
            self.roles.into_iter().next(),
            self.authorities.into_iter().next(),
        ]
        .into_iter()
        .flatten()
        .find(|raw| !raw.is_empty())
        .map(Role::new)
    }
}

/// Decode the claims of a three-segment bearer token.
///
/// The middle segment is Base64url-encoded JSON; both padded and unpadded
/// encodings are accepted, and the payload is decoded as UTF-8 so non-ASCII
/// usernames and roles survive intact. Returns `None` on any malformed
/// input: wrong segment count, invalid Base64, invalid UTF-8, invalid JSON.
#[must_use]
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let json = String::from_utf8(bytes).ok()?;
    let raw: RawClaims = serde_json::from_str(&json).ok()?;

    #[allow(clippy::cast_possible_truncation)]
    let expires_at = raw.exp.map(|exp| exp as i64);

    Some(Claims {
        subject: raw.sub.clone(),
        role: raw.resolve_role(),
        expires_at,
    })
}
