//! Completed-order records.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::product::ProductSnapshot;

/// One completed sale, with its billing identity and line items.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    /// Completion timestamp, ISO `YYYY-MM-DDTHH:MM:SS`.
    pub date_completed: NaiveDateTime,
    pub order_number: String,
    /// Account id of the purchaser; `0` means a guest checkout with no
    /// recoverable account.
    pub customer_id: u64,
    pub billing_email: String,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_phone: String,
    /// Line items in the order they were placed.
    pub items: Vec<LineItem>,
}

impl OrderRecord {
    /// Whether the order belongs to a recoverable customer account.
    pub fn has_account(&self) -> bool {
        self.customer_id != 0
    }
}

/// One purchased line within an order.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    /// Display name as sold (may differ from the catalog name for
    /// variations).
    pub name: String,
    pub quantity: u32,
    /// Amount actually charged for the line.
    pub subtotal: Decimal,
    pub product: ProductSnapshot,
}
