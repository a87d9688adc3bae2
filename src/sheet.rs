//! Tabular projection of record types onto a spreadsheet grid.
//!
//! A [`Column`] pairs a header with a projection function, so each record
//! type declares its sheet layout explicitly instead of going through
//! string-keyed maps. [`to_grid`] renders headers plus one row per record;
//! the encoding of the grid into an actual worksheet is delegated to
//! `rust_xlsxwriter` in [`write_sheet`].

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Worksheet;

use crate::Result;

/// A single cell value prior to workbook encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Nothing is written to the worksheet for this cell.
    Blank,
    Text(String),
    Int(i64),
    Decimal(Decimal),
}

impl CellValue {
    /// Text cell from anything string-like.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// `"yes"` / `"no"` text cell for a flag.
    pub fn yes_no(flag: bool) -> Self {
        CellValue::text(if flag { "yes" } else { "no" })
    }

    /// Whether this value renders as "nothing to report": an empty
    /// string, a zero integer, or a zero decimal.
    pub fn is_empty_like(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Int(n) => *n == 0,
            CellValue::Decimal(d) => d.is_zero(),
        }
    }
}

/// One column of a sheet: display header plus the projection that pulls
/// the cell value out of a record.
pub struct Column<T> {
    pub header: &'static str,
    pub value: fn(&T) -> CellValue,
}

/// Renders records into a row-major grid.
///
/// Row 0 holds the column headers in the given order; data starts at
/// row 1. With `skip_empty_like` set, empty-like values (see
/// [`CellValue::is_empty_like`]) become [`CellValue::Blank`] so the
/// workbook shows a blank cell rather than a literal `0` or empty string.
pub fn to_grid<T>(rows: &[T], columns: &[Column<T>], skip_empty_like: bool) -> Vec<Vec<CellValue>> {
    let mut grid = Vec::with_capacity(rows.len() + 1);

    grid.push(
        columns
            .iter()
            .map(|c| CellValue::text(c.header))
            .collect::<Vec<_>>(),
    );

    for row in rows {
        let cells = columns
            .iter()
            .map(|c| {
                let value = (c.value)(row);
                if skip_empty_like && value.is_empty_like() {
                    CellValue::Blank
                } else {
                    value
                }
            })
            .collect();
        grid.push(cells);
    }

    grid
}

/// Writes a grid onto a worksheet. Blank cells are left untouched.
pub fn write_sheet(sheet: &mut Worksheet, grid: &[Vec<CellValue>]) -> Result<()> {
    for (r, row) in grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (r as u32, c as u16);
            match cell {
                CellValue::Blank => {}
                CellValue::Text(s) => {
                    sheet.write_string(row_idx, col_idx, s)?;
                }
                CellValue::Int(n) => {
                    sheet.write_number(row_idx, col_idx, *n as f64)?;
                }
                CellValue::Decimal(d) => {
                    sheet.write_number(row_idx, col_idx, d.to_f64().unwrap_or_default())?;
                }
            }
        }
    }

    Ok(())
}
