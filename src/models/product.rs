//! Product catalog snapshots.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Catalog state of a product as seen when the orders were fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSnapshot {
    pub id: u64,
    pub name: String,
    /// Undiscounted unit price.
    pub regular_price: Decimal,
    /// Units left in stock.
    pub stock_quantity: i64,
}
