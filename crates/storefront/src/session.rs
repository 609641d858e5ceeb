//! Auth session manager.
//!
//! Owns the current authenticated identity and bearer token. Constructed
//! once at application start and injected into consumers (route guards,
//! header, CLI commands) instead of each call site re-reading storage.
//!
//! All operations are synchronous and local: none perform network I/O and
//! none can fail in a way that must be retried. A malformed persisted token
//! is self-healing - the next rehydration detects and purges it.

use serde::{Deserialize, Serialize};

use levelup_core::Role;

use crate::claims;
use crate::storage::{Store, keys};

/// The authenticated identity held by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Token expiry as epoch seconds, when the token carried one.
    #[serde(skip)]
    pub expires_at: Option<i64>,
}

/// Session lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup rehydration has not run yet.
    Loading,
    /// No valid identity is established.
    Unauthenticated,
    /// A decoded, unexpired identity is active.
    Authenticated(SessionUser),
}

/// Owns session state and the persisted token/identity keys.
///
/// The persisted write and the in-memory state update happen inside the same
/// synchronous call, so `is_authenticated()` reflects a `login` immediately.
pub struct AuthSessionManager {
    store: Store,
    state: SessionState,
    token: Option<String>,
}

impl AuthSessionManager {
    /// Create a manager in the transient `Loading` state.
    ///
    /// Call [`Self::rehydrate`] to resolve it; [`Self::restore`] does both.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self {
            store,
            state: SessionState::Loading,
            token: None,
        }
    }

    /// Create a manager and immediately rehydrate from persisted storage.
    #[must_use]
    pub fn restore(store: Store) -> Self {
        let mut manager = Self::new(store);
        manager.rehydrate();
        manager
    }

    /// Resolve the session from the persisted token.
    ///
    /// A present token whose claims decode and are unexpired yields
    /// `Authenticated`; anything else (no token, undecodable token, expired
    /// token) yields `Unauthenticated` and purges the stale keys.
    pub fn rehydrate(&mut self) {
        let Some(token) = self.store.read_raw(keys::TOKEN) else {
            self.state = SessionState::Unauthenticated;
            return;
        };

        match claims::decode(&token) {
            Some(decoded) if !decoded.is_expired(now_epoch()) => {
                // Username: persisted identity first, decoded subject as the
                // fallback for sessions predating the identity key.
                let persisted: Option<SessionUser> = self.store.read(keys::USER, None);
                let username = persisted
                    .map(|user| user.username)
                    .or(decoded.subject)
                    .unwrap_or_default();

                self.state = SessionState::Authenticated(SessionUser {
                    username,
                    role: decoded.role,
                    expires_at: decoded.expires_at,
                });
                self.token = Some(token);
            }
            Some(_) => {
                tracing::info!("Persisted token is expired, purging session");
                self.purge();
            }
            None => {
                tracing::warn!("Persisted token is undecodable, purging session");
                self.purge();
            }
        }
    }

    /// Establish a session for `username` with the given bearer token.
    ///
    /// The role is normalized from the token's claims (same priority order
    /// as the decoder). Identity and token are persisted and the in-memory
    /// state updated in the same call.
    pub fn login(&mut self, username: &str, token: &str) {
        let decoded = claims::decode(token);
        let user = SessionUser {
            username: username.to_string(),
            role: decoded.as_ref().and_then(|c| c.role.clone()),
            expires_at: decoded.and_then(|c| c.expires_at),
        };

        self.store.write(keys::USER, &user);
        self.store.write_raw(keys::TOKEN, token);
        self.token = Some(token.to_string());
        self.state = SessionState::Authenticated(user);
    }

    /// Purge persisted identity and token and drop to `Unauthenticated`.
    pub fn logout(&mut self) {
        self.purge();
    }

    /// React to a collaborator answering 401/403 on an authenticated call.
    ///
    /// The response means the server no longer accepts the token; the local
    /// session is purged so the user simply appears logged out.
    pub fn invalidate(&mut self) {
        tracing::warn!("Collaborator rejected the bearer token, purging session");
        self.purge();
    }

    /// True iff the state is `Authenticated` and any known expiry is still
    /// in the future.
    ///
    /// Token presence alone is not sufficient: an expired token counts as
    /// logged out even while still physically present in storage.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match &self.state {
            SessionState::Authenticated(user) => user
                .expires_at
                .is_none_or(|exp| exp > now_epoch()),
            SessionState::Loading | SessionState::Unauthenticated => false,
        }
    }

    /// True iff authenticated and the resolved role carries the admin marker.
    ///
    /// Gates UI visibility only; the server enforces authorization.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated()
            && matches!(
                &self.state,
                SessionState::Authenticated(user)
                    if user.role.as_ref().is_some_and(Role::is_admin)
            )
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active identity, if authenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Loading | SessionState::Unauthenticated => None,
        }
    }

    /// The raw bearer token, if a session is active.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn purge(&mut self) {
        self.store.remove(keys::TOKEN);
        self.store.remove(keys::USER);
        self.token = None;
        self.state = SessionState::Unauthenticated;
    }
}

/// Current time as epoch seconds.
fn now_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}
