//! Public catalog commands.

use levelup_core::ProductId;
use levelup_storefront::api::ApiClient;

use super::CommandError;

pub async fn list(api: &ApiClient) -> Result<(), CommandError> {
    let products = api.list_products().await?;
    if products.is_empty() {
        tracing::info!("The catalog is empty");
        return Ok(());
    }

    for product in &products {
        let offer = if product.on_offer == Some(true) {
            " [oferta]"
        } else {
            ""
        };
        tracing::info!(
            "#{} {} - ${} ({}){offer}",
            product.id,
            product.name,
            product.price,
            product.category.name,
        );
    }
    tracing::info!("{} products", products.len());
    Ok(())
}

pub async fn show(api: &ApiClient, id: ProductId) -> Result<(), CommandError> {
    let product = api.get_product(id).await?;
    tracing::info!("#{} {}", product.id, product.name);
    tracing::info!("Price: ${}", product.price);
    tracing::info!("Category: {}", product.category.name);
    if let Some(description) = &product.description {
        tracing::info!("{description}");
    }
    if let Some(url) = &product.image_url {
        tracing::info!("Image: {url}");
    }
    Ok(())
}
