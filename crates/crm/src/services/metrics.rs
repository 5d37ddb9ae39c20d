//! Dashboard metrics and the activity feed, derived from the stores.
//!
//! Every window-based computation takes `now` as an argument so callers (and
//! tests) control the reference point. Weekly revenue is the trailing seven
//! days; monthly revenue is the calendar month to date.

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;

use clementine_core::UserId;

use crate::models::{Activity, ActivityKind, Sale};
use crate::store::{ClientDirectory, LocalStore, ProductCatalog, SalesLedger};

/// Client dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientOverview {
    pub total_products: usize,
    /// Products with stock remaining.
    pub active_products: usize,
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub weekly_revenue: Decimal,
}

/// Aggregate sales figures for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalesStats {
    pub count: usize,
    pub total: Decimal,
    /// Zero when there are no sales.
    pub average: Decimal,
}

/// Admin dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminOverview {
    pub total_clients: usize,
    pub active_clients: usize,
    pub new_clients_this_month: usize,
    /// Revenue this calendar month, summed across every owner's ledger.
    pub monthly_revenue: Decimal,
}

/// Derived dashboard views.
pub struct MetricsService<'a> {
    store: &'a LocalStore,
}

impl<'a> MetricsService<'a> {
    #[must_use]
    pub const fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Metrics for one client's dashboard.
    #[must_use]
    pub fn client_overview(&self, owner: &UserId, now: DateTime<Utc>) -> ClientOverview {
        let products = ProductCatalog::new(self.store).load(owner);
        let sales = SalesLedger::new(self.store).load(owner);

        ClientOverview {
            total_products: products.len(),
            active_products: products.iter().filter(|p| p.stock > 0).count(),
            total_revenue: revenue(&sales, None),
            monthly_revenue: revenue(&sales, Some(month_start(now))),
            weekly_revenue: revenue(&sales, Some(now - Duration::days(7))),
        }
    }

    /// Count, total, and average sale amount for one owner.
    #[must_use]
    pub fn sales_stats(&self, owner: &UserId) -> SalesStats {
        let sales = SalesLedger::new(self.store).load(owner);
        let total = revenue(&sales, None);
        let average = if sales.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(sales.len())
        };

        SalesStats {
            count: sales.len(),
            total,
            average,
        }
    }

    /// Metrics for the admin dashboard.
    #[must_use]
    pub fn admin_overview(&self, now: DateTime<Utc>) -> AdminOverview {
        let clients = ClientDirectory::new(self.store).load_all();
        let since = month_start(now);

        let monthly_revenue = SalesLedger::new(self.store)
            .load_map()
            .values()
            .map(|sales| revenue(sales, Some(since)))
            .sum();

        AdminOverview {
            total_clients: clients.len(),
            active_clients: clients.iter().filter(|c| c.status.is_active()).count(),
            new_clients_this_month: clients.iter().filter(|c| c.created_at >= since).count(),
            monthly_revenue,
        }
    }

    /// Newest-first feed of what happened across the system.
    ///
    /// Derived entirely from the stores: client and product creations from
    /// their timestamps, sales with the product name when the product still
    /// exists in its owner's catalog.
    #[must_use]
    pub fn recent_activity(&self, limit: usize) -> Vec<Activity> {
        let mut feed = Vec::new();

        for client in ClientDirectory::new(self.store).load_all() {
            feed.push(Activity {
                kind: ActivityKind::ClientCreated,
                description: format!("New client registered: {}", client.name),
                timestamp: client.created_at,
            });
        }

        let product_map = ProductCatalog::new(self.store).load_map();
        for products in product_map.values() {
            for product in products {
                feed.push(Activity {
                    kind: ActivityKind::ProductCreated,
                    description: format!("New product: {}", product.name),
                    timestamp: product.created_at,
                });
            }
        }

        for (owner, sales) in SalesLedger::new(self.store).load_map() {
            let catalog = product_map.get(&owner);
            for sale in sales {
                let product_name = catalog
                    .and_then(|products| products.iter().find(|p| p.id == sale.product_id))
                    .map_or("product", |p| p.name.as_str());
                feed.push(Activity {
                    kind: ActivityKind::SaleMade,
                    description: format!("Sale recorded: {product_name}"),
                    timestamp: sale.created_at,
                });
            }
        }

        feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        feed.truncate(limit);
        feed
    }
}

/// Sum sale totals, optionally only those at or after `since`.
fn revenue(sales: &[Sale], since: Option<DateTime<Utc>>) -> Decimal {
    sales
        .iter()
        .filter(|s| since.is_none_or(|cutoff| s.created_at >= cutoff))
        .map(|s| s.total_amount)
        .sum()
}

/// Midnight UTC on the first of `now`'s month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive())
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}
