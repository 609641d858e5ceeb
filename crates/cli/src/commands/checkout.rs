//! Checkout: submit the local cart as an order.

use levelup_storefront::api::OrderRequest;

use super::{CommandError, authenticated, require_auth};
use crate::Context;

pub async fn submit(ctx: &mut Context) -> Result<(), CommandError> {
    let token = require_auth(&ctx.session)?;

    let lines = ctx.cart.get();
    let request = OrderRequest::from_cart(&lines);
    if request.is_empty() {
        return Err(CommandError::EmptyCart);
    }

    let total = ctx.cart.total();
    let result = ctx.api.create_order(&token, &request).await;
    let order = authenticated(&mut ctx.session, result)?;

    // The backend accepted the order; the local cart is done.
    ctx.cart.clear();
    tracing::info!("Order #{} placed ({}), total ${total}", order.id, order.status);
    Ok(())
}
