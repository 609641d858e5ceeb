//! Product catalog entities as exposed by the backend REST API.
//!
//! Field names on the wire keep the backend's Spanish spelling (`nombre`,
//! `precio`, ...) via `#[serde(rename)]`; Rust identifiers stay English.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product category (`Categoria` on the backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A catalog product (`Producto` on the backend).
///
/// Read-only from the storefront core's perspective; the cart keeps its own
/// denormalized snapshot of `id`/`name`/`price` instead of referencing this
/// struct, so persisted carts survive catalog drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price. Must be positive for the product to be cartable.
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "urlImagen", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "oferta", skip_serializing_if = "Option::is_none")]
    pub on_offer: Option<bool>,
}

impl Product {
    /// Whether the product can be added to a cart.
    #[must_use]
    pub fn is_cartable(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Mouse Gamer".to_string(),
            description: None,
            price: Decimal::from(9990),
            image_url: None,
            category: Category {
                id: CategoryId::new(3),
                name: "Periféricos".to_string(),
            },
            on_offer: Some(true),
        }
    }

    #[test]
    fn test_product_deserializes_backend_json() {
        let json = r#"{
            "id": 1,
            "nombre": "Mouse Gamer",
            "precio": 9990,
            "categoria": {"id": 3, "nombre": "Periféricos"},
            "oferta": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, mouse());
    }

    #[test]
    fn test_product_serializes_spanish_field_names() {
        let value = serde_json::to_value(mouse()).unwrap();
        assert_eq!(value["nombre"], "Mouse Gamer");
        assert_eq!(value["precio"], 9990.0);
        assert_eq!(value["categoria"]["nombre"], "Periféricos");
        // Absent optionals are omitted, matching the backend payloads
        assert!(value.get("descripcion").is_none());
    }

    #[test]
    fn test_is_cartable() {
        assert!(mouse().is_cartable());

        let mut broken = mouse();
        broken.price = Decimal::ZERO;
        assert!(!broken.is_cartable());
    }
}
