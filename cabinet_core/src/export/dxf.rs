//! # Layout Drawing
//!
//! Lays panels out on a sheet and writes them as a minimal ASCII DXF
//! (AutoCAD 2000, `AC1015`) document: one closed polyline per panel plus a
//! centered text label.
//!
//! ## Placement
//!
//! Greedy shelf placement in input order. Panels are placed left to right;
//! when the next panel would cross `max_row_width` a new row starts above
//! the tallest panel of the current row. Panels are never rotated, and a
//! panel wider than the row always starts a row of its own.
//!
//! ```text
//!  y
//!  ▲ ┌────┐ ┌──┐
//!  │ │ 3  │ │4 │
//!  │ └────┘ └──┘
//!  │ ┌───────┐ ┌─────┐
//!  │ │   1   │ │  2  │        ← row 1
//!  └─┴───────┴─┴─────┴──────▶ x
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::config::LayoutOptions;
//! use cabinet_core::export::dxf::{place_items, LayoutItem};
//!
//! let items = [
//!     LayoutItem::new(2000.0, 500.0, "A", "GABLE"),
//!     LayoutItem::new(500.0, 300.0, "B", "GABLE"),
//! ];
//! let placements = place_items(&items, &LayoutOptions::default());
//! assert_eq!((placements[1].x, placements[1].y), (0.0, 550.0));
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutOptions;
use crate::cutting_list::CuttingList;
use crate::ledger::Ledger;

/// A rectangle to lay out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub width: f64,
    pub height: f64,
    pub label: String,
    /// Layer the rectangle is drawn on
    pub group_id: String,
}

impl LayoutItem {
    pub fn new(width: f64, height: f64, label: impl Into<String>, group_id: impl Into<String>) -> Self {
        LayoutItem {
            width,
            height,
            label: label.into(),
            group_id: group_id.into(),
        }
    }
}

/// Where an item ended up (lower-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One item per ledger component: label is the name, group the key.
pub fn ledger_layout_items(ledger: &Ledger) -> Vec<LayoutItem> {
    ledger
        .components()
        .iter()
        .map(|c| LayoutItem::new(c.width, c.height, c.name.clone(), c.kind.key()))
        .collect()
}

/// One item per cutting-list line: label is the part id, group the category.
pub fn cutting_list_layout_items(list: &CuttingList) -> Vec<LayoutItem> {
    list.items()
        .map(|(category, item)| {
            LayoutItem::new(item.width as f64, item.height as f64, item.part_id.clone(), category.label())
        })
        .collect()
}

/// Compute placements, in input order.
pub fn place_items(items: &[LayoutItem], options: &LayoutOptions) -> Vec<Placement> {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut row_height: f64 = 0.0;

    items
        .iter()
        .map(|item| {
            if x + item.width > options.max_row_width {
                y += row_height + options.spacing;
                x = 0.0;
                row_height = 0.0;
            }
            let placement = Placement {
                x,
                y,
                width: item.width,
                height: item.height,
            };
            x += item.width + options.spacing;
            row_height = row_height.max(item.height);
            placement
        })
        .collect()
}

/// Layer name for a group id: anything but ASCII letters and digits becomes `_`.
pub fn layer_name(group_id: &str) -> String {
    group_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn new() -> Self {
        DxfWriter { out: String::new() }
    }

    fn pair(&mut self, code: u16, value: impl Display) -> &mut Self {
        self.out.push_str(&format!("{}\n{}\n", code, value));
        self
    }

    fn vertex(&mut self, layer: &str, x: f64, y: f64) -> &mut Self {
        self.pair(0, "VERTEX")
            .pair(8, layer)
            .pair(10, x)
            .pair(20, y)
            .pair(30, "0.0")
    }
}

/// Layout drawing with the default sheet (2440mm rows, 50mm gaps).
pub fn to_layout_drawing(items: &[LayoutItem]) -> String {
    to_layout_drawing_with(items, &LayoutOptions::default())
}

/// Layout drawing with explicit sheet options.
pub fn to_layout_drawing_with(items: &[LayoutItem], options: &LayoutOptions) -> String {
    let placements = place_items(items, options);
    let text_height = format!("{:.1}", options.text_height);

    let mut dxf = DxfWriter::new();
    dxf.pair(0, "SECTION")
        .pair(2, "HEADER")
        .pair(9, "$ACADVER")
        .pair(1, "AC1015")
        .pair(0, "ENDSEC")
        .pair(0, "SECTION")
        .pair(2, "ENTITIES");

    for (item, at) in items.iter().zip(&placements) {
        let layer = layer_name(&item.group_id);
        let (right, top) = (at.x + item.width, at.y + item.height);

        dxf.pair(0, "POLYLINE")
            .pair(8, &layer)
            .pair(66, 1)
            .pair(70, 1)
            .pair(10, "0.0")
            .pair(20, "0.0")
            .pair(30, "0.0");
        dxf.vertex(&layer, at.x, at.y)
            .vertex(&layer, right, at.y)
            .vertex(&layer, right, top)
            .vertex(&layer, at.x, top);
        dxf.pair(0, "SEQEND").pair(8, &layer);

        // Group code 1 values end at the newline
        let label = item.label.replace(['\r', '\n'], " ");
        dxf.pair(0, "TEXT")
            .pair(8, format!("{}_TEXT", layer))
            .pair(10, at.x + item.width / 2.0)
            .pair(20, at.y + item.height / 2.0)
            .pair(30, "0.0")
            .pair(40, &text_height)
            .pair(1, label);
    }

    dxf.pair(0, "ENDSEC").pair(0, "EOF");
    debug!(items = items.len(), bytes = dxf.out.len(), "rendered layout drawing");
    dxf.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, CabinetInputs};

    fn item(w: f64, h: f64) -> LayoutItem {
        LayoutItem::new(w, h, "P", "GABLE")
    }

    fn positions(items: &[LayoutItem]) -> Vec<(f64, f64)> {
        place_items(items, &LayoutOptions::default())
            .iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn test_second_item_wraps() {
        assert_eq!(positions(&[item(2000.0, 500.0), item(500.0, 300.0)]), [(0.0, 0.0), (0.0, 550.0)]);
    }

    #[test]
    fn test_second_item_stays_on_row() {
        assert_eq!(positions(&[item(1000.0, 500.0), item(500.0, 300.0)]), [(0.0, 0.0), (1050.0, 0.0)]);
    }

    #[test]
    fn test_row_height_is_tallest_in_row() {
        let items = [item(1000.0, 300.0), item(1000.0, 700.0), item(1000.0, 100.0), item(100.0, 100.0)];
        assert_eq!(
            positions(&items),
            [(0.0, 0.0), (1050.0, 0.0), (0.0, 750.0), (1050.0, 750.0)]
        );
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        // 1195 + 50 + 1195 = 2440
        assert_eq!(positions(&[item(1195.0, 10.0), item(1195.0, 10.0)]), [(0.0, 0.0), (1245.0, 0.0)]);
    }

    #[test]
    fn test_oversized_first_item_opens_new_row() {
        assert_eq!(positions(&[item(3000.0, 600.0), item(100.0, 100.0)]), [(0.0, 50.0), (0.0, 700.0)]);
    }

    #[test]
    fn test_custom_options() {
        let options = LayoutOptions {
            max_row_width: 1000.0,
            spacing: 10.0,
            text_height: 8.0,
        };
        let placed = place_items(&[item(600.0, 200.0), item(600.0, 200.0)], &options);
        assert_eq!((placed[1].x, placed[1].y), (0.0, 210.0));
    }

    #[test]
    fn test_layer_name() {
        assert_eq!(layer_name("T/B & FIX SHELVES"), "T_B___FIX_SHELVES");
        assert_eq!(layer_name("topRail"), "topRail");
    }

    #[test]
    fn test_drawing_envelope() {
        let text = to_layout_drawing(&[]);
        assert_eq!(
            text,
            "0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1015\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n"
        );
    }

    #[test]
    fn test_drawing_entities() {
        let text = to_layout_drawing(&[LayoutItem::new(600.0, 2100.0, "Gable", "S/H")]);

        assert!(text.contains("0\nPOLYLINE\n8\nS_H\n66\n1\n70\n1\n"));
        assert_eq!(text.matches("\nVERTEX\n").count(), 4);
        assert!(text.contains("0\nVERTEX\n8\nS_H\n10\n600\n20\n2100\n30\n0.0\n"));
        assert!(text.contains("0\nSEQEND\n8\nS_H\n"));
        assert!(text.contains("0\nTEXT\n8\nS_H_TEXT\n10\n300\n20\n1050\n30\n0.0\n40\n8.0\n1\nGable\n"));
    }

    #[test]
    fn test_ledger_items() {
        let ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
        let items = ledger_layout_items(&ledger);
        assert_eq!(items.len(), 5);
        assert_eq!(items[2], LayoutItem::new(530.0, 564.0, "Top Rail", "topRail"));

        let text = to_layout_drawing(&items);
        assert_eq!(text.matches("\nPOLYLINE\n").count(), 5);
        assert!(text.contains("\n8\ntopRail_TEXT\n"));
    }
}
