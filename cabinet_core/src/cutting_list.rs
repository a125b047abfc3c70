//! # Cutting List
//!
//! A categorized list of panels to cut, as produced by the workshop
//! calculation or returned by the drawing-analysis backend.
//!
//! ## Structure
//!
//! ```text
//! CuttingList
//! ├── GABLE              → CategoryList { items, total_pieces, unique_sizes, total_area }
//! ├── T/B & FIX SHELVES  → CategoryList
//! ├── BACKS              → CategoryList
//! └── S/H                → CategoryList
//! ```
//!
//! Categories always iterate in the order above. Category summaries are
//! derived from the items and must be refreshed after any item changes;
//! [`CuttingList::add_component`] and [`CuttingList::edit_item`] do this.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CabinetError, CabinetResult};
use crate::parsing::parse_whole;
use crate::units::MM2_PER_M2;

/// Smallest panel side the workshop will cut (mm)
pub const MIN_PANEL_MM: i64 = 10;

/// Cutting-list category, in workshop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CutCategory {
    #[serde(rename = "GABLE")]
    Gable,
    #[serde(rename = "T/B & FIX SHELVES")]
    TopBottomShelves,
    #[serde(rename = "BACKS")]
    Backs,
    #[serde(rename = "S/H")]
    ShelfHardware,
}

impl CutCategory {
    pub const ALL: [CutCategory; 4] = [
        CutCategory::Gable,
        CutCategory::TopBottomShelves,
        CutCategory::Backs,
        CutCategory::ShelfHardware,
    ];

    /// Category heading as printed on the cutting list
    pub fn label(&self) -> &'static str {
        match self {
            CutCategory::Gable => "GABLE",
            CutCategory::TopBottomShelves => "T/B & FIX SHELVES",
            CutCategory::Backs => "BACKS",
            CutCategory::ShelfHardware => "S/H",
        }
    }

    /// Prefix for part ids (`SHELF-01`)
    pub fn short_name(&self) -> &'static str {
        match self {
            CutCategory::Gable => "GABLE",
            CutCategory::TopBottomShelves => "SHELF",
            CutCategory::Backs => "BACK",
            CutCategory::ShelfHardware => "HARDWARE",
        }
    }

    pub fn material(&self) -> &'static str {
        match self {
            CutCategory::Gable | CutCategory::TopBottomShelves => "18mm MFC",
            CutCategory::Backs => "6mm MDF",
            CutCategory::ShelfHardware => "Hardware",
        }
    }
}

impl fmt::Display for CutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CutCategory {
    type Err = CabinetError;

    /// Accepts the heading (`T/B & FIX SHELVES`) or the part-id prefix (`shelf`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CutCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted) || c.short_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CabinetError::invalid_field(s, "", "Unknown category; expected GABLE, SHELF, BACK or HARDWARE")
            })
    }
}

/// One line of the cutting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutItem {
    /// e.g. `GABLE-01`
    pub part_id: String,
    /// Display string; `"1975×560"` when generated, `"560 x 1975"` after an edit
    pub dimensions: String,
    /// Height (mm)
    pub height: i64,
    /// Width (mm)
    pub width: i64,
    pub quantity: u32,
    pub material_type: String,
    #[serde(default)]
    pub notes: String,
}

impl CutItem {
    /// Area of all pieces on this line (m²)
    pub fn area(&self) -> f64 {
        self.height as f64 * self.width as f64 * f64::from(self.quantity) / MM2_PER_M2
    }
}

/// Items in one category plus their summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryList {
    pub items: Vec<CutItem>,
    #[serde(default)]
    pub total_pieces: u32,
    #[serde(default)]
    pub unique_sizes: u32,
    #[serde(default)]
    pub total_area: f64,
}

impl CategoryList {
    /// Recompute `total_pieces`, `unique_sizes` and `total_area` from the items.
    pub fn refresh_summary(&mut self) {
        self.total_pieces = self.items.iter().map(|i| i.quantity).sum();
        self.unique_sizes = self.items.iter().map(|i| i.dimensions.as_str()).collect::<HashSet<_>>().len() as u32;
        self.total_area = round2(self.items.iter().map(CutItem::area).sum());
    }
}

/// Totals over the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CuttingSummary {
    pub total_pieces: u32,
    pub total_area: f64,
    /// Number of categories with at least one piece
    pub categories: u32,
}

/// Categorized cutting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuttingList {
    categories: BTreeMap<CutCategory, CategoryList>,
}

impl Default for CuttingList {
    fn default() -> Self {
        Self::new()
    }
}

impl CuttingList {
    /// An empty list with every category present.
    pub fn new() -> Self {
        CuttingList {
            categories: CutCategory::ALL.into_iter().map(|c| (c, CategoryList::default())).collect(),
        }
    }

    /// Add a panel, normalizing it the way the workshop does.
    ///
    /// Height and width are rounded to whole millimeters and raised to at
    /// least [`MIN_PANEL_MM`]; quantity is at least 1. The part id is the
    /// category prefix plus a two-digit per-category counter.
    pub fn add_component(
        &mut self,
        category: CutCategory,
        height: f64,
        width: f64,
        quantity: u32,
        notes: impl Into<String>,
    ) -> &CutItem {
        let height = (height.round_ties_even() as i64).max(MIN_PANEL_MM);
        let width = (width.round_ties_even() as i64).max(MIN_PANEL_MM);
        let quantity = quantity.max(1);

        let list = self.categories.entry(category).or_default();
        let item = CutItem {
            part_id: format!("{}-{:02}", category.short_name(), list.items.len() + 1),
            dimensions: format!("{}×{}", height, width),
            height,
            width,
            quantity,
            material_type: category.material().to_string(),
            notes: notes.into(),
        };
        debug!(category = category.label(), part_id = %item.part_id, height, width, quantity, "added cutting-list item");
        list.items.push(item);
        list.refresh_summary();
        &list.items[list.items.len() - 1]
    }

    pub fn category(&self, category: CutCategory) -> Option<&CategoryList> {
        self.categories.get(&category)
    }

    /// Categories in workshop order
    pub fn categories(&self) -> impl Iterator<Item = (CutCategory, &CategoryList)> {
        self.categories.iter().map(|(c, l)| (*c, l))
    }

    /// Every item with its category, in workshop order
    pub fn items(&self) -> impl Iterator<Item = (CutCategory, &CutItem)> {
        self.categories
            .iter()
            .flat_map(|(c, l)| l.items.iter().map(move |item| (*c, item)))
    }

    /// Recompute every category summary.
    pub fn refresh_summaries(&mut self) {
        self.categories.values_mut().for_each(CategoryList::refresh_summary);
    }

    pub fn summary(&self) -> CuttingSummary {
        CuttingSummary {
            total_pieces: self.categories.values().map(|l| l.total_pieces).sum(),
            total_area: round2(self.categories.values().map(|l| l.total_area).sum()),
            categories: self.categories.values().filter(|l| l.total_pieces > 0).count() as u32,
        }
    }

    /// Edit one field of one item, then refresh that category's summary.
    ///
    /// `height` and `width` take the leading integer of `raw` (0 when there is
    /// none) and rewrite `dimensions` as `"{width} x {height}"`. `quantity`
    /// is parsed the same way and floored at 0. `part_id`, `dimensions`,
    /// `material_type` and `notes` are stored verbatim.
    pub fn edit_item(&mut self, category: CutCategory, index: usize, field: &str, raw: &str) -> CabinetResult<()> {
        let component = format!("{}[{}]", category.label(), index);
        let list = self
            .categories
            .get_mut(&category)
            .ok_or_else(|| CabinetError::invalid_field(&component, field, "Category is not in this list"))?;
        let item = list
            .items
            .get_mut(index)
            .ok_or_else(|| CabinetError::invalid_field(&component, field, "No item at this index"))?;

        match field {
            "height" | "width" => {
                let value = parse_whole(raw);
                if field == "height" {
                    item.height = value;
                } else {
                    item.width = value;
                }
                item.dimensions = format!("{} x {}", item.width, item.height);
            }
            "quantity" => item.quantity = u32::try_from(parse_whole(raw).max(0)).unwrap_or(u32::MAX),
            "part_id" => item.part_id = raw.to_string(),
            "dimensions" => item.dimensions = raw.to_string(),
            "material_type" => item.material_type = raw.to_string(),
            "notes" => item.notes = raw.to_string(),
            _ => {
                return Err(CabinetError::invalid_field(
                    component,
                    field,
                    "Expected one of part_id, dimensions, height, width, quantity, material_type, notes",
                ))
            }
        }

        debug!(category = category.label(), index, field, raw, "edited cutting-list item");
        list.refresh_summary();
        Ok(())
    }
}

/// Round to two decimals, ties to even
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
