//! Product catalog endpoints.
//!
//! Listing and lookup are public (`productos`); the CRUD surface lives under
//! `admin/productos` and requires an admin bearer token. The server enforces
//! the role; passing a non-admin token yields [`ApiError::Unauthorized`].

use rust_decimal::Decimal;
use serde::Serialize;

use levelup_core::{CategoryId, Product, ProductId};

use super::{ApiClient, ApiError};

/// Category reference in write payloads: only the id is sent, the backend
/// resolves the association.
#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub id: CategoryId,
}

/// Payload for creating or updating a product.
#[derive(Debug, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
}

impl ApiClient {
    /// `GET productos` - the full public catalog.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` on transport failure; any non-success status maps to
    /// the usual [`ApiError`] variants.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("productos")?;
        self.send_expecting(self.http.get(url)).await
    }

    /// `GET productos/{id}` - one product.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` if the id does not exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("productos/{id}"))?;
        self.send_expecting(self.http.get(url)).await
    }

    /// `POST admin/productos` - create a product.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` if the token is missing admin rights.
    pub async fn create_product(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let url = self.endpoint("admin/productos")?;
        self.send_expecting(self.http.post(url).bearer_auth(token).json(payload))
            .await
    }

    /// `PUT admin/productos/{id}` - update a product.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` without admin rights, `ApiError::NotFound`
    /// for an unknown id.
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("admin/productos/{id}"))?;
        self.send_expecting(self.http.put(url).bearer_auth(token).json(payload))
            .await
    }

    /// `DELETE admin/productos/{id}`.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` without admin rights, `ApiError::NotFound`
    /// for an unknown id.
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("admin/productos/{id}"))?;
        self.send_unit(self.http.delete(url).bearer_auth(token)).await
    }
}
