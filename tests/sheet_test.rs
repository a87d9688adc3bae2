//! Grid-rendering tests for the tabular writer.

use rust_decimal_macros::dec;

use tallysheet::sheet::{CellValue, Column, to_grid};

struct Row {
    name: String,
    phone: String,
    quantity: i64,
}

fn columns() -> [Column<Row>; 3] {
    [
        Column {
            header: "Name",
            value: |r| CellValue::text(r.name.clone()),
        },
        Column {
            header: "Phone",
            value: |r| CellValue::text(r.phone.clone()),
        },
        Column {
            header: "Quantity",
            value: |r| CellValue::Int(r.quantity),
        },
    ]
}

fn row(name: &str, phone: &str, quantity: i64) -> Row {
    Row {
        name: name.to_string(),
        phone: phone.to_string(),
        quantity,
    }
}

#[test]
fn headers_occupy_row_zero_in_column_order() {
    let grid = to_grid(&[row("Ada", "555-0100", 2)], &columns(), true);

    assert_eq!(grid.len(), 2);
    assert_eq!(
        grid[0],
        vec![
            CellValue::text("Name"),
            CellValue::text("Phone"),
            CellValue::text("Quantity"),
        ]
    );
}

#[test]
fn one_data_row_per_record_starting_at_row_one() {
    let rows = [row("Ada", "555-0100", 2), row("Grace", "555-0101", 1)];
    let grid = to_grid(&rows, &columns(), true);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[1][0], CellValue::text("Ada"));
    assert_eq!(grid[2][0], CellValue::text("Grace"));
    assert_eq!(grid[2][2], CellValue::Int(1));
}

#[test]
fn empty_like_values_render_blank_cells() {
    // Empty phone and zero quantity must come out blank, never as a
    // literal "" or 0.
    let grid = to_grid(&[row("Ada", "", 0)], &columns(), true);

    assert_eq!(grid[1][0], CellValue::text("Ada"));
    assert_eq!(grid[1][1], CellValue::Blank);
    assert_eq!(grid[1][2], CellValue::Blank);
}

#[test]
fn skip_rule_is_opt_in() {
    let grid = to_grid(&[row("Ada", "", 0)], &columns(), false);

    assert_eq!(grid[1][1], CellValue::text(""));
    assert_eq!(grid[1][2], CellValue::Int(0));
}

#[test]
fn yes_no_flags_survive_the_skip_rule() {
    // "no" is a non-empty string, so a false flag still renders.
    assert!(!CellValue::yes_no(false).is_empty_like());
    assert_eq!(CellValue::yes_no(true), CellValue::text("yes"));
    assert_eq!(CellValue::yes_no(false), CellValue::text("no"));
}

#[test]
fn zero_decimal_is_empty_like() {
    assert!(CellValue::Decimal(dec!(0)).is_empty_like());
    assert!(!CellValue::Decimal(dec!(0.01)).is_empty_like());
}
