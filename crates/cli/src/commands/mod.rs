//! Command implementations.
//!
//! Each submodule maps one CLI subcommand tree onto the storefront core.
//! Authenticated commands go through the guard helpers here, and every
//! collaborator call funnels through [`authenticated`] so a 401/403 purges
//! the local session the same way the web front end does.

use thiserror::Error;

use levelup_storefront::api::ApiError;
use levelup_storefront::cart::CartError;
use levelup_storefront::guard::{self, Access};
use levelup_storefront::session::AuthSessionManager;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("you must be logged in for this (try `lvl-cli auth login`)")]
    RequiresLogin,

    #[error("this command requires an admin session")]
    RequiresAdmin,

    #[error("nothing to order, the cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Gate a command on an authenticated session and yield the bearer token.
pub fn require_auth(session: &AuthSessionManager) -> Result<String, CommandError> {
    match guard::require_auth(session) {
        Access::Granted => session
            .token()
            .map(ToString::to_string)
            .ok_or(CommandError::RequiresLogin),
        _ => Err(CommandError::RequiresLogin),
    }
}

/// Gate a command on an admin session and yield the bearer token.
pub fn require_admin(session: &AuthSessionManager) -> Result<String, CommandError> {
    match guard::require_admin(session) {
        Access::Granted => session
            .token()
            .map(ToString::to_string)
            .ok_or(CommandError::RequiresLogin),
        Access::RedirectHome => Err(CommandError::RequiresAdmin),
        Access::Pending | Access::RedirectToLogin => Err(CommandError::RequiresLogin),
    }
}

/// Unwrap an authenticated collaborator call, purging the session when the
/// server rejected the token.
pub fn authenticated<T>(
    session: &mut AuthSessionManager,
    result: Result<T, ApiError>,
) -> Result<T, CommandError> {
    if matches!(result, Err(ApiError::Unauthorized)) {
        session.invalidate();
    }
    Ok(result?)
}
