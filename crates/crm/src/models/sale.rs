//! Sales ledger records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{ProductId, SaleId};

/// One recorded sale.
///
/// `total_amount` is a snapshot of `price * quantity` taken when the sale was
/// registered; editing the product's price later never changes it. Ledger
/// entries are append-only and survive deletion of the product they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}
