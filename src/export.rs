//! The export job: resolve the date window, fetch completed orders,
//! aggregate, and write the three-sheet workbook.
//!
//! Sheet order is fixed and significant: Customers, Orders, Products.
//! The workbook is assembled fully in memory and only then saved, so a
//! failure mid-assembly never leaves a half-written file on disk.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::aggregate::{CustomerEntry, OrderLine, ProductSummary, aggregate};
use crate::config::Settings;
use crate::files::normalize_path;
use crate::models::OrderRecord;
use crate::sheet::{CellValue, Column, to_grid, write_sheet};
use crate::{Result, TallysheetError};

/// Literal window used in debug mode to capture all historical orders.
pub const DEBUG_WINDOW: &str = "1984-01-01...2077-01-01";

/// The date range one export run covers. Doubles as the output file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// A single calendar day (the normal daily run covers yesterday).
    Day(NaiveDate),
    /// The fixed all-history window substituted in debug mode.
    DebugAll,
}

impl DateWindow {
    /// Whether a completion timestamp falls inside this window.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        match self {
            DateWindow::Day(day) => ts.date() == *day,
            DateWindow::DebugAll => {
                let (start, end) = debug_window_bounds();
                (start..=end).contains(&ts.date())
            }
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            DateWindow::DebugAll => f.write_str(DEBUG_WINDOW),
        }
    }
}

/// Resolves the window for a run starting today: yesterday's date, or the
/// all-history window when debug mode is on (regardless of the date).
pub fn resolve_window(today: NaiveDate, debug: bool) -> DateWindow {
    if debug {
        return DateWindow::DebugAll;
    }

    // MIN has no predecessor; everywhere else this is yesterday.
    DateWindow::Day(today.pred_opt().unwrap_or(today))
}

fn debug_window_bounds() -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(1984, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(2077, 1, 1).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Supplier of completed orders for a date window.
pub trait OrderSource {
    /// Returns every completed order whose completion date falls in the
    /// window, in source order, unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`TallysheetError::DataSource`] when the upstream fetch
    /// fails; the run is aborted without retry.
    fn completed_orders(&self, window: &DateWindow) -> Result<Vec<OrderRecord>>;
}

/// Order source backed by a JSON file of completed orders.
pub struct JsonOrderSource {
    path: PathBuf,
}

impl JsonOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderSource for JsonOrderSource {
    fn completed_orders(&self, window: &DateWindow) -> Result<Vec<OrderRecord>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            TallysheetError::DataSource(format!(
                "cannot read order file {}: {e}",
                self.path.display()
            ))
        })?;

        let orders: Vec<OrderRecord> = serde_json::from_str(&raw).map_err(|e| {
            TallysheetError::DataSource(format!(
                "malformed order file {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(orders
            .into_iter()
            .filter(|order| window.contains(order.date_completed))
            .collect())
    }
}

/// Runs one export: fetch, aggregate, serialize, save.
///
/// Returns the path of the written workbook,
/// `{output_dir}/{window}.xlsx` with separators normalized. An existing
/// file at that path is overwritten.
pub fn run_export(
    source: &dyn OrderSource,
    settings: &Settings,
    window: &DateWindow,
) -> Result<PathBuf> {
    debug!(window = %window, "fetching completed orders");
    let orders = source.completed_orders(window)?;

    debug!(orders = orders.len(), "aggregating");
    let report = aggregate(&orders);

    debug!(
        customers = report.customers.len(),
        lines = report.lines.len(),
        products = report.products.len(),
        "assembling workbook"
    );
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Customers")?;
    write_sheet(sheet, &to_grid(&report.customers, &customer_columns(), true))?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Orders")?;
    write_sheet(sheet, &to_grid(&report.lines, &order_columns(), true))?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Products")?;
    write_sheet(sheet, &to_grid(&report.products, &product_columns(), true))?;

    let output_dir = settings.output_path();
    if !Path::new(&output_dir).is_dir() {
        return Err(TallysheetError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory missing: {output_dir}"),
        )));
    }

    let output_path = normalize_path(&format!("{output_dir}/{window}.xlsx"));
    debug!(path = %output_path, "writing workbook");
    workbook.save(&output_path)?;

    Ok(PathBuf::from(output_path))
}

fn customer_columns() -> [Column<CustomerEntry>; 4] {
    [
        Column {
            header: "First name",
            value: |c| CellValue::text(c.first_name.clone()),
        },
        Column {
            header: "Last name",
            value: |c| CellValue::text(c.last_name.clone()),
        },
        Column {
            header: "email",
            value: |c| CellValue::text(c.email.clone()),
        },
        Column {
            header: "Billing phone",
            value: |c| CellValue::text(c.billing_phone.clone()),
        },
    ]
}

fn order_columns() -> [Column<OrderLine>; 7] {
    [
        Column {
            header: "Date completed",
            value: |l| CellValue::text(l.date.format("%Y-%m-%d %H:%M:%S").to_string()),
        },
        Column {
            header: "Order number",
            value: |l| CellValue::text(l.order_number.clone()),
        },
        Column {
            header: "Customer ID",
            value: |l| CellValue::Int(l.customer_id as i64),
        },
        Column {
            header: "Item name",
            value: |l| CellValue::text(l.item_name.clone()),
        },
        Column {
            header: "Sold at a discount",
            value: |l| CellValue::yes_no(l.sold_at_a_discount),
        },
        Column {
            header: "Quantity sold",
            value: |l| CellValue::Int(i64::from(l.quantity)),
        },
        Column {
            header: "Total value",
            value: |l| CellValue::Decimal(l.subtotal),
        },
    ]
}

fn product_columns() -> [Column<ProductSummary>; 5] {
    [
        Column {
            header: "ID",
            value: |p| CellValue::Int(p.id as i64),
        },
        Column {
            header: "Name",
            value: |p| CellValue::text(p.name.clone()),
        },
        Column {
            header: "Remainder",
            value: |p| CellValue::Int(p.remainder),
        },
        Column {
            header: "Number sold",
            value: |p| CellValue::Int(p.number_sold as i64),
        },
        Column {
            header: "Number sold under discount",
            value: |p| CellValue::Int(p.number_sold_under_discount as i64),
        },
    ]
}
