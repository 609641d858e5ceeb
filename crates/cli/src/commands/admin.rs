//! Admin back-office commands.
//!
//! Every command here gates on an admin session before calling out; the
//! server still enforces the role, and a rejection purges the local session.

use rust_decimal::Decimal;

use levelup_core::{CategoryId, ProductId, UserId};
use levelup_storefront::api::{CategoryRef, ProductPayload};

use super::{CommandError, authenticated, require_admin};
use crate::Context;

pub async fn create_product(
    ctx: &mut Context,
    name: String,
    description: String,
    price: Decimal,
    category: CategoryId,
) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let payload = ProductPayload {
        name,
        description,
        price,
        category: CategoryRef { id: category },
    };
    let result = ctx.api.create_product(&token, &payload).await;
    let product = authenticated(&mut ctx.session, result)?;
    tracing::info!("Created #{} {}", product.id, product.name);
    Ok(())
}

pub async fn update_product(
    ctx: &mut Context,
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    category: CategoryId,
) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let payload = ProductPayload {
        name,
        description,
        price,
        category: CategoryRef { id: category },
    };
    let result = ctx.api.update_product(&token, id, &payload).await;
    let product = authenticated(&mut ctx.session, result)?;
    tracing::info!("Updated #{} {}", product.id, product.name);
    Ok(())
}

pub async fn delete_product(ctx: &mut Context, id: ProductId) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let result = ctx.api.delete_product(&token, id).await;
    authenticated(&mut ctx.session, result)?;
    tracing::info!("Deleted product #{id}");
    Ok(())
}

pub async fn list_users(ctx: &mut Context) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let result = ctx.api.list_users(&token).await;
    let users = authenticated(&mut ctx.session, result)?;
    for user in &users {
        match &user.email {
            Some(email) => tracing::info!("#{} {} <{email}>", user.id, user.username),
            None => tracing::info!("#{} {}", user.id, user.username),
        }
    }
    tracing::info!("{} users", users.len());
    Ok(())
}

pub async fn delete_user(ctx: &mut Context, id: UserId) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let result = ctx.api.delete_user(&token, id).await;
    authenticated(&mut ctx.session, result)?;
    tracing::info!("Deleted user #{id}");
    Ok(())
}

pub async fn list_orders(ctx: &mut Context) -> Result<(), CommandError> {
    let token = require_admin(&ctx.session)?;
    let result = ctx.api.list_orders(&token).await;
    let orders = authenticated(&mut ctx.session, result)?;
    for order in &orders {
        tracing::info!(
            "#{} {} by {} at {}",
            order.id,
            order.status,
            order.user.username,
            order.created_at,
        );
    }
    tracing::info!("{} orders", orders.len());
    Ok(())
}
