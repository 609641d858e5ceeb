//! Shopping cart repository.
//!
//! The cart is browser-local state: a list of lines keyed by product
//! identity, persisted under a fixed storage key. Lines hold a denormalized
//! snapshot of the product's id/name/price taken at add time; the snapshot
//! may drift from the live catalog, which is an accepted staleness tradeoff.
//!
//! # Persisted shape
//!
//! The canonical persisted shape is the flat line
//! `{"id", "nombre", "precio", "cantidad"}`. Older deployments also wrote a
//! nested `{"producto": {...}, "cantidad"}` shape; those carts are NOT read
//! here - they fail deserialization and the repository falls back to an
//! empty cart. Legacy flat carts that stored the id as a string are
//! accepted and canonicalized to a numeric id on read.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use levelup_core::{Product, ProductId};

use crate::storage::{Store, keys};

/// Errors surfaced to callers by cart mutations.
///
/// These are the only cart failures the UI must catch and display; reads
/// never fail.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product's unit price is zero or negative.
    #[error("Product {id} has non-positive price {price} and cannot be added to the cart")]
    NonPositivePrice { id: ProductId, price: Decimal },

    /// An add with quantity zero; a line's quantity is always >= 1.
    #[error("Quantity must be at least 1")]
    ZeroQuantity,
}

/// One product-identity/quantity pairing within the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(deserialize_with = "compat_product_id")]
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Price snapshot taken when the line was added.
    #[serde(
        rename = "precio",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_price"
    )]
    pub price: Decimal,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Deserialize a product id from either a JSON number or a numeric string.
///
/// Legacy flat carts stored `"id": "7"`; the canonical representation is
/// numeric. Both compare equal after this boundary.
fn compat_product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(ProductId::new)
            .ok_or_else(|| D::Error::custom("product id is not an integer")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(ProductId::new)
            .map_err(|_| D::Error::custom("product id string is not numeric")),
        other => Err(D::Error::custom(format!(
            "product id must be a number or string, got {other}"
        ))),
    }
}

/// Deserialize a price leniently: numbers and numeric strings parse, anything
/// else (corrupted or legacy entries) becomes zero so [`CartRepository::total`]
/// skips the line instead of the whole cart failing to load.
fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match value {
        serde_json::Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };
    Ok(price)
}

/// Owns the canonical representation of "items currently in the cart".
///
/// All operations are synchronous reads/writes against the persistent store;
/// within a single event loop there is no race between them. Two independent
/// processes sharing a storage directory are last-writer-wins, the same as
/// two browser tabs.
#[derive(Clone)]
pub struct CartRepository {
    store: Store,
}

impl CartRepository {
    /// Create a cart repository over the given store.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// The current persisted cart, or an empty list if none exists yet.
    ///
    /// Never fails: a corrupt cart key falls back to empty.
    #[must_use]
    pub fn get(&self) -> Vec<CartLine> {
        self.store.read(keys::CART, Vec::new())
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line is appended with a snapshot of the product's
    /// id/name/price. Persists and returns the updated list.
    ///
    /// # Errors
    ///
    /// [`CartError::NonPositivePrice`] if `product.price <= 0`,
    /// [`CartError::ZeroQuantity`] if `quantity == 0`. The cart is left
    /// unchanged on error.
    pub fn add(&self, product: &Product, quantity: u32) -> Result<Vec<CartLine>, CartError> {
        if !product.is_cartable() {
            return Err(CartError::NonPositivePrice {
                id: product.id,
                price: product.price,
            });
        }
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let mut lines = self.get();
        match lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => lines.push(CartLine {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity,
            }),
        }

        self.store.write(keys::CART, &lines);
        Ok(lines)
    }

    /// Remove the line for `id`, returning the updated list.
    ///
    /// Removing an id that is not in the cart is a no-op, not an error.
    pub fn remove(&self, id: ProductId) -> Vec<CartLine> {
        let mut lines = self.get();
        lines.retain(|line| line.id != id);
        self.store.write(keys::CART, &lines);
        lines
    }

    /// Empty the cart and persist the empty list.
    pub fn clear(&self) {
        self.store.write(keys::CART, &Vec::<CartLine>::new());
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Lines whose price is not positive contribute zero; this guards
    /// against corrupted or legacy entries rather than failing the total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.get()
            .iter()
            .filter(|line| line.price > Decimal::ZERO)
            .map(CartLine::subtotal)
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use levelup_core::{Category, CategoryId};
    use crate::storage::Store;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            image_url: None,
            category: Category {
                id: CategoryId::new(1),
                name: "Periféricos".to_string(),
            },
            on_offer: None,
        }
    }

    fn repo() -> CartRepository {
        CartRepository::new(Store::in_memory())
    }

    #[test]
    fn test_get_starts_empty() {
        assert!(repo().get().is_empty());
    }

    #[test]
    fn test_re_add_accumulates_quantity_on_one_line() {
        let cart = repo();
        let mouse = product(1, "Mouse", 9990);

        cart.add(&mouse, 1).unwrap();
        let lines = cart.add(&mouse, 1).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_add_distinct_products_appends_in_order() {
        let cart = repo();
        cart.add(&product(1, "Mouse", 9990), 1).unwrap();
        let lines = cart.add(&product(2, "Teclado", 24990), 3).unwrap();

        let ids: Vec<i64> = lines.iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(lines.get(1).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_rejects_non_positive_price_and_leaves_cart_unchanged() {
        let cart = repo();
        let err = cart.add(&product(2, "Broken", 0), 1).unwrap_err();
        assert!(matches!(err, CartError::NonPositivePrice { .. }));
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let cart = repo();
        let err = cart.add(&product(1, "Mouse", 9990), 0).unwrap_err();
        assert!(matches!(err, CartError::ZeroQuantity));
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let cart = repo();
        cart.add(&product(1, "Mouse", 9990), 1).unwrap();
        let lines = cart.remove(ProductId::new(99));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_remove_tolerates_legacy_string_ids() {
        // Legacy carts persisted the id as a string; removal by numeric id
        // must still find the line.
        let store = Store::in_memory();
        store.write_raw(
            keys::CART,
            r#"[{"id": "7", "nombre": "Audífonos", "precio": 15990, "cantidad": 1}]"#,
        );

        let cart = CartRepository::new(store);
        assert_eq!(cart.get().len(), 1);
        assert!(cart.remove(ProductId::new(7)).is_empty());
    }

    #[test]
    fn test_get_falls_back_to_empty_on_corrupt_key() {
        let store = Store::in_memory();
        store.write_raw(keys::CART, "definitely not json");

        let cart = CartRepository::new(store);
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_nested_legacy_shape_is_not_silently_migrated() {
        // The nested {producto, cantidad} variant is incompatible by design;
        // it reads as an empty cart rather than being guessed at.
        let store = Store::in_memory();
        store.write_raw(
            keys::CART,
            r#"[{"producto": {"id": 1, "nombre": "Mouse", "precio": 9990}, "cantidad": 2}]"#,
        );

        let cart = CartRepository::new(store);
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_total_skips_non_positive_prices() {
        let store = Store::in_memory();
        store.write_raw(
            keys::CART,
            r#"[{"id": 1, "nombre": "Gratis", "precio": 0, "cantidad": 1},
                {"id": 2, "nombre": "Juego", "precio": 1000, "cantidad": 2}]"#,
        );

        let cart = CartRepository::new(store);
        assert_eq!(cart.total(), Decimal::from(2000));
    }

    #[test]
    fn test_total_treats_garbage_price_as_zero_contribution() {
        let store = Store::in_memory();
        store.write_raw(
            keys::CART,
            r#"[{"id": 1, "nombre": "Raro", "precio": "n/a", "cantidad": 5},
                {"id": 2, "nombre": "Juego", "precio": "1000", "cantidad": 1}]"#,
        );

        let cart = CartRepository::new(store);
        // Garbage -> zero (skipped); numeric string still parses.
        assert_eq!(cart.total(), Decimal::from(1000));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let cart = repo();
        assert!(cart.get().is_empty());

        let lines = cart.add(&product(1, "Mouse", 9990), 2).unwrap();
        assert_eq!(lines.len(), 1);
        let line = lines.first().unwrap();
        assert_eq!(line.id, ProductId::new(1));
        assert_eq!(line.name, "Mouse");
        assert_eq!(line.price, Decimal::from(9990));
        assert_eq!(line.quantity, 2);

        assert_eq!(cart.total(), Decimal::from(19980));

        assert!(cart.remove(ProductId::new(1)).is_empty());
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_clear() {
        let cart = repo();
        cart.add(&product(1, "Mouse", 9990), 2).unwrap();
        cart.clear();
        assert!(cart.get().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_persisted_shape_is_flat_with_spanish_keys() {
        let store = Store::in_memory();
        let cart = CartRepository::new(store.clone());
        cart.add(&product(1, "Mouse", 9990), 2).unwrap();

        let raw = store.read_raw(keys::CART).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let line = value.get(0).unwrap();
        assert_eq!(line["id"], 1);
        assert_eq!(line["nombre"], "Mouse");
        assert_eq!(line["precio"], 9990.0);
        assert_eq!(line["cantidad"], 2);
        assert!(line.get("producto").is_none());
    }
}
