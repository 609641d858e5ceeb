//! Admin user management endpoints (`admin/usuarios`).

use serde::Deserialize;

use levelup_core::UserId;

use super::{ApiClient, ApiError};

/// A registered account as listed by the admin back-office.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendUser {
    pub id: UserId,
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ApiClient {
    /// `GET admin/usuarios` - list registered accounts.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` if the token lacks admin rights.
    pub async fn list_users(&self, token: &str) -> Result<Vec<BackendUser>, ApiError> {
        let url = self.endpoint("admin/usuarios")?;
        self.send_expecting(self.http.get(url).bearer_auth(token))
            .await
    }

    /// `DELETE admin/usuarios/{id}`.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` without admin rights, `ApiError::NotFound`
    /// for an unknown id.
    pub async fn delete_user(&self, token: &str, id: UserId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("admin/usuarios/{id}"))?;
        self.send_unit(self.http.delete(url).bearer_auth(token)).await
    }
}
