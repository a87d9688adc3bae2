//! Single-pass aggregation of completed orders into the export views.
//!
//! One forward pass over the orders (and, within each order, its line
//! items) produces three derived tables: a customer directory keyed by
//! billing email, a flattened order-line ledger, and a per-product sales
//! summary. Everything is built fresh per run and held in memory only
//! until the workbook is written.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::OrderRecord;

/// One row of the customer directory.
///
/// Keyed by billing email with first-write-wins semantics: later orders
/// from the same email do not overwrite the identity fields captured from
/// the first order that introduced it.
#[derive(Debug, Clone)]
pub struct CustomerEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub billing_phone: String,
}

/// One row of the order-line ledger, in input order.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub date: NaiveDateTime,
    pub order_number: String,
    /// `0` for guest checkouts.
    pub customer_id: u64,
    pub item_name: String,
    /// True when the charged subtotal was strictly below the regular
    /// unit price times the quantity.
    pub sold_at_a_discount: bool,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Cumulative sales figures for one product.
///
/// Descriptive fields and the stock remainder are snapshotted at the
/// product's first encounter in the run; only the counters accumulate.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: u64,
    pub name: String,
    pub remainder: i64,
    pub number_sold: u64,
    pub number_sold_under_discount: u64,
}

/// The three derived tables for one export run.
#[derive(Debug, Clone, Default)]
pub struct SalesReport {
    /// First-seen order by billing email, one entry per distinct email.
    pub customers: Vec<CustomerEntry>,
    /// One row per line item, order-major then item-minor.
    pub lines: Vec<OrderLine>,
    /// First-seen order by product id.
    pub products: Vec<ProductSummary>,
}

/// Aggregates completed orders into the three export views.
///
/// Orders without a recoverable account are excluded from the customer
/// directory but still contribute their line items to the ledger and the
/// product summaries. Zero quantities are legal and add nothing to the
/// counters.
pub fn aggregate(orders: &[OrderRecord]) -> SalesReport {
    let mut report = SalesReport::default();
    let mut seen_emails: HashSet<String> = HashSet::new();
    let mut product_index: HashMap<u64, usize> = HashMap::new();

    for order in orders {
        if order.has_account() && seen_emails.insert(order.billing_email.clone()) {
            report.customers.push(CustomerEntry {
                first_name: order.billing_first_name.clone(),
                last_name: order.billing_last_name.clone(),
                email: order.billing_email.clone(),
                billing_phone: order.billing_phone.clone(),
            });
        }

        for item in &order.items {
            let regular_subtotal = item.product.regular_price * Decimal::from(item.quantity);
            let sold_at_a_discount = item.subtotal < regular_subtotal;

            report.lines.push(OrderLine {
                date: order.date_completed,
                order_number: order.order_number.clone(),
                customer_id: order.customer_id,
                item_name: item.name.clone(),
                sold_at_a_discount,
                quantity: item.quantity,
                subtotal: item.subtotal,
            });

            let idx = *product_index.entry(item.product.id).or_insert_with(|| {
                report.products.push(ProductSummary {
                    id: item.product.id,
                    name: item.product.name.clone(),
                    remainder: item.product.stock_quantity,
                    number_sold: 0,
                    number_sold_under_discount: 0,
                });
                report.products.len() - 1
            });

            let summary = &mut report.products[idx];
            summary.number_sold += u64::from(item.quantity);
            if sold_at_a_discount {
                summary.number_sold_under_discount += u64::from(item.quantity);
            }
        }
    }

    report
}
