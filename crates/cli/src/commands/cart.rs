//! Local cart commands.
//!
//! The cart lives entirely in local storage; only `add` touches the network,
//! to snapshot the product from the catalog.

use levelup_core::ProductId;
use levelup_storefront::api::ApiClient;
use levelup_storefront::cart::CartRepository;

use super::CommandError;

pub fn show(cart: &CartRepository) {
    let lines = cart.get();
    if lines.is_empty() {
        tracing::info!("The cart is empty");
        return;
    }

    for line in &lines {
        tracing::info!(
            "#{} {} x{} @ ${} = ${}",
            line.id,
            line.name,
            line.quantity,
            line.price,
            line.subtotal(),
        );
    }
    tracing::info!("Total: ${}", cart.total());
}

pub async fn add(
    api: &ApiClient,
    cart: &CartRepository,
    id: ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    let product = api.get_product(id).await?;
    let lines = cart.add(&product, quantity)?;
    tracing::info!(
        "Added {} x{quantity}, the cart now has {} line(s)",
        product.name,
        lines.len(),
    );
    Ok(())
}

pub fn remove(cart: &CartRepository, id: ProductId) {
    let lines = cart.remove(id);
    tracing::info!("Removed #{id}, {} line(s) remain", lines.len());
}

pub fn clear(cart: &CartRepository) {
    cart.clear();
    tracing::info!("Cart cleared");
}
