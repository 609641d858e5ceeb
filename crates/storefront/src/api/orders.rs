//! Order endpoints (`pedidos`).
//!
//! Checkout reads the cart, transforms it into the backend's order request
//! shape and posts it with the bearer token. The wire shape references
//! products by id only; quantities come from the cart lines.

use serde::{Deserialize, Serialize};

use levelup_core::{OrderId, ProductId};

use super::{ApiClient, ApiError};
use crate::cart::CartLine;

/// Product reference inside an order item: the backend only needs the id.
#[derive(Debug, Serialize)]
struct ProductRef {
    id: ProductId,
}

/// One item of an order request.
#[derive(Debug, Serialize)]
pub struct OrderItemRequest {
    #[serde(rename = "producto")]
    product: ProductRef,
    #[serde(rename = "cantidad")]
    quantity: u32,
}

/// Body for `POST pedidos`.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
}

impl OrderRequest {
    /// Build an order request from the current cart lines.
    #[must_use]
    pub fn from_cart(lines: &[CartLine]) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| OrderItemRequest {
                    product: ProductRef { id: line.id },
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    /// Whether there is anything to order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The user an order belongs to, as echoed by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUser {
    #[serde(rename = "nombreUsuario")]
    pub username: String,
}

/// An order as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "estado")]
    pub status: String,
    /// Creation timestamp as the backend formats it; kept verbatim for
    /// display.
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
    #[serde(rename = "usuario")]
    pub user: OrderUser,
}

impl ApiClient {
    /// `POST pedidos` - submit an order. Requires an authenticated token.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` if the token is rejected; callers must
    /// report that to the session manager.
    pub async fn create_order(&self, token: &str, order: &OrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint("pedidos")?;
        self.send_expecting(self.http.post(url).bearer_auth(token).json(order))
            .await
    }

    /// `GET pedidos` - list all orders (admin/seller listing).
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` if the token lacks the required role.
    pub async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("pedidos")?;
        self.send_expecting(self.http.get(url).bearer_auth(token))
            .await
    }
}
