//! Quick sale commands.

use clementine_core::{ProductId, format_mxn};
use clementine_crm::services::{CatalogService, MetricsService};
use clementine_crm::validate;

use super::{CliError, Context, require_valid};

/// Register a quick sale against a product.
pub fn record(owner: Option<&str>, product_id: &str, quantity: u32) -> Result<(), CliError> {
    require_valid(validate::sale_form(product_id, quantity))?;

    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    let catalog = CatalogService::new(&ctx.store);
    let sale = catalog.record_sale(&owner, &ProductId::new(product_id), quantity)?;

    tracing::info!(
        "Recorded sale of {} x{} for {} (id {})",
        product_id,
        sale.quantity,
        format_mxn(sale.total_amount),
        sale.id
    );
    Ok(())
}

/// List the owner's ledger, oldest-first.
pub fn list(owner: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    let sales = CatalogService::new(&ctx.store).sales(&owner);

    if sales.is_empty() {
        tracing::info!("No sales");
        return Ok(());
    }
    for sale in sales {
        tracing::info!(
            "{}  product {}  x{}  {}  {}",
            sale.id,
            sale.product_id,
            sale.quantity,
            format_mxn(sale.total_amount),
            sale.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

/// Count, total, and average for the owner's ledger.
pub fn stats(owner: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::open()?;
    let owner = ctx.resolve_owner(owner)?;
    let stats = MetricsService::new(&ctx.store).sales_stats(&owner);

    tracing::info!(
        "{} sales, {} total, {} average",
        stats.count,
        format_mxn(stats.total),
        format_mxn(stats.average),
    );
    Ok(())
}
