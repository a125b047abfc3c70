//! # Exports
//!
//! Read-only renderings of a ledger or cutting list:
//!
//! - [`csv_export`] - spreadsheet exports
//! - [`dxf`] - sheet layout drawings
//!
//! Plus the dated file names downloads are saved under.

pub mod csv_export;
pub mod dxf;

use chrono::NaiveDate;

pub use csv_export::{cutting_list_to_csv, fixed, ledger_to_csv, ledger_to_csv_with_currency};
pub use dxf::{
    cutting_list_layout_items, ledger_layout_items, place_items, to_layout_drawing, to_layout_drawing_with,
    LayoutItem, Placement,
};

/// `price_calculation_2024-03-18.csv`
pub fn price_csv_filename(date: NaiveDate) -> String {
    format!("price_calculation_{}.csv", date.format("%Y-%m-%d"))
}

/// `price_layout_2024-03-18.dxf`
pub fn price_layout_filename(date: NaiveDate) -> String {
    format!("price_layout_{}.dxf", date.format("%Y-%m-%d"))
}

/// `cutting_list_{stem}_2024-03-18.csv`
pub fn cutting_list_csv_filename(stem: &str, date: NaiveDate) -> String {
    format!("cutting_list_{}_{}.csv", stem, date.format("%Y-%m-%d"))
}

/// `cutting_layout_{stem}_2024-03-18.dxf`, the locally rendered layout
pub fn cutting_layout_filename(stem: &str, date: NaiveDate) -> String {
    format!("cutting_layout_{}_{}.dxf", stem, date.format("%Y-%m-%d"))
}

/// `layout_{stem}_2024-03-18.dxf`, the drawing embedded in an analysis response
pub fn analysis_layout_filename(stem: &str, date: NaiveDate) -> String {
    format!("layout_{}_{}.dxf", stem, date.format("%Y-%m-%d"))
}
