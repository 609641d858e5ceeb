//! End-to-end exercise of the local storefront core: session rehydration,
//! guard gating, cart mutation, and the order payload handed to the backend.
//!
//! Everything runs against an in-memory store; no network is involved.

#![allow(clippy::unwrap_used)]

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rust_decimal::Decimal;

use levelup_core::{Category, CategoryId, Product, ProductId};
use levelup_storefront::api::OrderRequest;
use levelup_storefront::cart::CartRepository;
use levelup_storefront::guard::{self, Access};
use levelup_storefront::session::AuthSessionManager;
use levelup_storefront::storage::{Store, keys};

fn token_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.firma")
}

fn catalog_product(id: i64, name: &str, price: i64) -> Product {
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

#[test]
fn checkout_flow_from_login_to_order_payload() {
    let store = Store::in_memory();

    // Fresh visitor: no session, empty cart, checkout gated.
    let mut session = AuthSessionManager::restore(store.clone());
    let cart = CartRepository::new(store.clone());
    assert_eq!(guard::require_auth(&session), Access::RedirectToLogin);
    assert!(cart.get().is_empty());

    // Browse and fill the cart while logged out.
    cart.add(&catalog_product(1, "Mouse", 9990), 2).unwrap();
    cart.add(&catalog_product(4, "Teclado", 24_990), 1).unwrap();
    cart.add(&catalog_product(1, "Mouse", 9990), 1).unwrap();
    assert_eq!(cart.get().len(), 2);
    assert_eq!(cart.total(), Decimal::from(54_960));

    // Login (as the UI would after POST auth/login returns a token).
    let token = token_with_payload(&serde_json::json!({
        "sub": "carolina",
        "rol": "CLIENTE",
        "exp": chrono::Utc::now().timestamp() + 3600,
    }));
    session.login("carolina", &token);
    assert_eq!(guard::require_auth(&session), Access::Granted);
    assert_eq!(guard::require_admin(&session), Access::RedirectHome);

    // Checkout: cart lines become the backend's order request shape.
    let order = OrderRequest::from_cart(&cart.get());
    let value = serde_json::to_value(&order).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "items": [
                {"producto": {"id": 1}, "cantidad": 3},
                {"producto": {"id": 4}, "cantidad": 1},
            ]
        })
    );

    // Order accepted: the cart is cleared, the session stays.
    cart.clear();
    assert!(cart.get().is_empty());
    assert!(session.is_authenticated());
}

#[test]
fn session_survives_restart_via_persisted_token() {
    let store = Store::in_memory();

    let token = token_with_payload(&serde_json::json!({
        "sub": "carolina",
        "role": "ROLE_ADMIN",
        "exp": chrono::Utc::now().timestamp() + 3600,
    }));
    {
        let mut session = AuthSessionManager::restore(store.clone());
        session.login("carolina", &token);
    }

    // A new manager over the same store rehydrates the admin session.
    let session = AuthSessionManager::restore(store.clone());
    assert!(session.is_admin());
    assert_eq!(guard::require_admin(&session), Access::Granted);
    assert_eq!(session.token(), Some(token.as_str()));
}

#[test]
fn cart_and_session_use_disjoint_keys() {
    let store = Store::in_memory();
    let cart = CartRepository::new(store.clone());
    let mut session = AuthSessionManager::restore(store.clone());

    cart.add(&catalog_product(1, "Mouse", 9990), 1).unwrap();
    let token = token_with_payload(&serde_json::json!({
        "exp": chrono::Utc::now().timestamp() + 3600,
    }));
    session.login("carolina", &token);

    // Logging out purges the session keys but leaves the cart alone.
    session.logout();
    assert!(store.read_raw(keys::TOKEN).is_none());
    assert_eq!(cart.get().len(), 1);
}
