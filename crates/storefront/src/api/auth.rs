//! Authentication endpoints (`auth/login`, `auth/registro`).
//!
//! Both are public: no bearer token is attached, since these are the calls
//! that obtain one.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// Credentials for `POST auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Usually `"Bearer"`; some backend versions omit it.
    #[serde(rename = "tipo", default)]
    pub token_type: Option<String>,
}

/// Payload for `POST auth/registro`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombreUsuario")]
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "edad")]
    pub age: u8,
    pub region: String,
    #[serde(rename = "comuna")]
    pub commune: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` on bad credentials, `ApiError::EmptyBody` if
    /// the backend answered success without a token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("auth/login")?;
        self.send_expecting(self.http.post(url).json(credentials))
            .await
    }

    /// Register a new account. The backend answers created/no-content.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` with the backend's message on conflicts
    /// (e.g. username already taken).
    pub async fn register(&self, registration: &RegisterRequest) -> Result<(), ApiError> {
        let url = self.endpoint("auth/registro")?;
        self.send_unit(self.http.post(url).json(registration)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            username: "carolina".to_string(),
            password: "secreta".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"nombreUsuario": "carolina", "password": "secreta"})
        );
    }

    #[test]
    fn test_login_response_without_tipo() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc.def.ghi"}"#).unwrap();
        assert_eq!(response.token, "abc.def.ghi");
        assert_eq!(response.token_type, None);
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            username: "pedro".to_string(),
            email: "pedro@example.com".to_string(),
            password: "secreta".to_string(),
            full_name: "Pedro Pérez".to_string(),
            age: 30,
            region: "Metropolitana".to_string(),
            commune: "Ñuñoa".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["nombreUsuario"], "pedro");
        assert_eq!(value["nombreCompleto"], "Pedro Pérez");
        assert_eq!(value["edad"], 30);
        assert_eq!(value["comuna"], "Ñuñoa");
    }
}
