//! Catalog commands (client workflows; admin with `--owner`).

use rust_decimal::Decimal;

use clementine_core::{ProductId, format_mxn};
use clementine_crm::models::{NewProduct, Product, ProductUpdate};
use clementine_crm::services::CatalogService;
use clementine_crm::validate;

use super::{CliError, Context, require_valid};

/// List the owner's catalog.
pub fn list(owner: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    print_catalog(&CatalogService::new(&ctx.store).list(&owner));
    Ok(())
}

/// Search the owner's catalog by name or description.
pub fn search(owner: Option<&str>, query: &str) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    print_catalog(&CatalogService::new(&ctx.store).search(&owner, query));
    Ok(())
}

/// Add a product to the owner's catalog.
pub fn create(
    owner: Option<&str>,
    name: &str,
    description: &str,
    price: Decimal,
    stock: u32,
    image_url: Option<String>,
) -> Result<(), CliError> {
    require_valid(validate::product_form(
        name,
        description,
        price,
        image_url.as_deref(),
    ))?;

    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    let product = CatalogService::new(&ctx.store).create(
        &owner,
        NewProduct {
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            stock,
            image_url,
        },
    )?;

    tracing::info!(
        "Created product {} at {} (id {})",
        product.name,
        format_mxn(product.price),
        product.id
    );
    Ok(())
}

/// Update a product in the owner's catalog.
#[allow(clippy::too_many_arguments)]
pub fn update(
    owner: Option<&str>,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    stock: Option<u32>,
    image_url: Option<String>,
) -> Result<(), CliError> {
    if let Some(price) = price {
        if price <= Decimal::ZERO {
            return Err(CliError::Validation(vec![validate::FieldError {
                field: "price",
                message: "price must be greater than 0".to_owned(),
            }]));
        }
    }

    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    let product = CatalogService::new(&ctx.store).update(
        &owner,
        &ProductId::new(id),
        ProductUpdate {
            name,
            description,
            price,
            stock,
            image_url,
        },
    )?;

    tracing::info!("Updated product {} ({})", product.name, product.id);
    Ok(())
}

/// Remove a product from the owner's catalog.
pub fn delete(owner: Option<&str>, id: &str) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    CatalogService::new(&ctx.store).delete(&owner, &ProductId::new(id))?;
    tracing::info!("Deleted product {id}");
    Ok(())
}

fn print_catalog(products: &[Product]) {
    if products.is_empty() {
        tracing::info!("No products");
        return;
    }
    for product in products {
        tracing::info!(
            "{}  {}  {}  stock {}",
            product.id,
            product.name,
            format_mxn(product.price),
            product.stock,
        );
    }
}
