//! Route guards for protected and admin-only views.
//!
//! Guards consume [`AuthSessionManager`] state and tell the UI layer what to
//! do with a navigation attempt. They never talk to the network; a guard
//! decision is only as current as the locally derived session state, and the
//! server still enforces authorization on every call.

use crate::session::{AuthSessionManager, SessionState};

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the requested view.
    Granted,
    /// Session rehydration has not resolved yet; show a loading state
    /// instead of redirecting prematurely.
    Pending,
    /// Not authenticated; send the user to the login view.
    RedirectToLogin,
    /// Authenticated but not authorized for this view; send the user home.
    RedirectHome,
}

/// Guard for views that require any authenticated user.
#[must_use]
pub fn require_auth(session: &AuthSessionManager) -> Access {
    match session.state() {
        SessionState::Loading => Access::Pending,
        _ if session.is_authenticated() => Access::Granted,
        _ => Access::RedirectToLogin,
    }
}

/// Guard for admin-only views.
///
/// Unauthenticated users go to login; authenticated non-admins go home.
#[must_use]
pub fn require_admin(session: &AuthSessionManager) -> Access {
    match require_auth(session) {
        Access::Granted if session.is_admin() => Access::Granted,
        Access::Granted => Access::RedirectHome,
        other => other,
    }
}
