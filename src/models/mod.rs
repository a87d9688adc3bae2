//! Source records for the export pipeline.
//!
//! These mirror the shape the order source hands back: completed orders
//! with nested line items, each line item carrying a snapshot of its
//! product at fetch time. The structs are read-only inputs; the derived
//! views live in [`crate::aggregate`].

pub mod order;
pub mod product;

pub use order::{LineItem, OrderRecord};
pub use product::ProductSnapshot;
