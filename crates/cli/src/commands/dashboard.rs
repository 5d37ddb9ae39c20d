//! Dashboard command: role-appropriate metrics plus recent activity.

use chrono::Utc;

use clementine_core::format_mxn;
use clementine_crm::services::MetricsService;

use super::{CliError, Context};

const ACTIVITY_LIMIT: usize = 10;

/// Show the dashboard for the current principal.
///
/// Admin sessions get the roster overview; client sessions get their own
/// catalog and revenue cards.
pub fn show() -> Result<(), CliError> {
    let ctx = Context::open()?;
    let principal = ctx.current_principal()?;
    let metrics = MetricsService::new(&ctx.store);
    let now = Utc::now();

    if principal.is_admin() {
        let overview = metrics.admin_overview(now);
        tracing::info!("Total clients:     {}", overview.total_clients);
        tracing::info!("Active clients:    {}", overview.active_clients);
        tracing::info!("New this month:    {}", overview.new_clients_this_month);
        tracing::info!("Monthly revenue:   {}", format_mxn(overview.monthly_revenue));
    } else {
        let overview = metrics.client_overview(&principal.id, now);
        tracing::info!("Total products:    {}", overview.total_products);
        tracing::info!("Active products:   {}", overview.active_products);
        tracing::info!("Total revenue:     {}", format_mxn(overview.total_revenue));
        tracing::info!("Monthly revenue:   {}", format_mxn(overview.monthly_revenue));
        tracing::info!("Weekly revenue:    {}", format_mxn(overview.weekly_revenue));
    }

    let feed = metrics.recent_activity(ACTIVITY_LIMIT);
    if !feed.is_empty() {
        tracing::info!("Recent activity:");
        for activity in feed {
            tracing::info!(
                "  {}  {}",
                activity.timestamp.format("%Y-%m-%d %H:%M"),
                activity.description
            );
        }
    }
    Ok(())
}
