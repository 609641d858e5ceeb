//! Session commands.

use levelup_storefront::api::{ApiClient, LoginRequest, RegisterRequest};
use levelup_storefront::session::{AuthSessionManager, SessionState};

use super::CommandError;
use crate::Context;

pub async fn login(ctx: &mut Context, username: &str, password: &str) -> Result<(), CommandError> {
    let response = ctx
        .api
        .login(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await?;

    ctx.session.login(username, &response.token);
    if ctx.session.is_admin() {
        tracing::info!("Logged in as {username} (admin)");
    } else {
        tracing::info!("Logged in as {username}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn register(
    api: &ApiClient,
    username: String,
    email: String,
    password: String,
    full_name: String,
    age: u8,
    region: String,
    commune: String,
) -> Result<(), CommandError> {
    api.register(&RegisterRequest {
        username: username.clone(),
        email,
        password,
        full_name,
        age,
        region,
        commune,
    })
    .await?;
    tracing::info!("Account {username} created, you can now log in");
    Ok(())
}

pub fn logout(session: &mut AuthSessionManager) {
    session.logout();
    tracing::info!("Logged out");
}

pub fn whoami(session: &AuthSessionManager) {
    match session.state() {
        SessionState::Authenticated(user) if session.is_authenticated() => {
            match &user.role {
                Some(role) => tracing::info!("{} ({role})", user.username),
                None => tracing::info!("{}", user.username),
            }
            if let Some(exp) = user.expires_at {
                tracing::info!("Session expires at epoch {exp}");
            }
        }
        _ => tracing::info!("Not logged in"),
    }
}
