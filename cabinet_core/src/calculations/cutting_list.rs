//! # Workshop Cutting List
//!
//! Turns overall cabinet dimensions into a categorized cutting list using
//! the workshop offsets from [`WorkshopConfig`].
//!
//! ## Formulas
//!
//! With `wh = total_height − leg_height_deduction − countertop_deduction`:
//!
//! | Category          | Height                 | Width                   | Qty |
//! |-------------------|------------------------|-------------------------|-----|
//! | GABLE             | wh                     | D                       | 2   |
//! | T/B & FIX SHELVES | W − back_width_offset  | D − top_depth_offset    | 2   |
//! | S/H               | W − back_width_offset  | D − shelf_depth_offset  | 1   |
//! | BACKS             | wh                     | W − back_width_offset   | 1   |
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::calculations::{generate_cutting_list, CabinetDimensions};
//! use cabinet_core::config::WorkshopConfig;
//! use cabinet_core::cutting_list::CutCategory;
//!
//! let dims = CabinetDimensions::new(600.0, 2100.0, 560.0);
//! let list = generate_cutting_list(&dims, &WorkshopConfig::default()).unwrap();
//!
//! let gable = &list.category(CutCategory::Gable).unwrap().items[0];
//! assert_eq!((gable.height, gable.width, gable.quantity), (1975, 560, 2));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WorkshopConfig;
use crate::cutting_list::{CutCategory, CuttingList};
use crate::errors::{CabinetError, CabinetResult};

/// Overall cabinet size as measured on the drawing (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinetDimensions {
    pub width: f64,
    /// Floor to countertop, legs included
    pub total_height: f64,
    pub depth: f64,
}

impl CabinetDimensions {
    pub fn new(width: f64, total_height: f64, depth: f64) -> Self {
        CabinetDimensions {
            width,
            total_height,
            depth,
        }
    }

    pub fn validate(&self) -> CabinetResult<()> {
        for (field, value) in [
            ("width", self.width),
            ("total_height", self.total_height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CabinetError::invalid_input(
                    field,
                    value.to_string(),
                    "Cabinet dimensions must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Generate the workshop cutting list for one cabinet.
///
/// Panels that come out smaller than 10mm (e.g. when the offsets exceed
/// the cabinet depth) are raised to 10mm by [`CuttingList::add_component`].
pub fn generate_cutting_list(dims: &CabinetDimensions, config: &WorkshopConfig) -> CabinetResult<CuttingList> {
    dims.validate()?;
    config.validate()?;

    let working_height = config.working_height(dims.total_height);
    let inner_width = dims.width - config.back_width_offset;
    let top_depth = dims.depth - config.top_depth_offset;
    let shelf_depth = dims.depth - config.shelf_depth_offset;

    let mut list = CuttingList::new();
    list.add_component(
        CutCategory::Gable,
        working_height,
        dims.depth,
        2,
        format!("Gables {}×{}", working_height, dims.depth),
    );
    list.add_component(
        CutCategory::TopBottomShelves,
        inner_width,
        top_depth,
        2,
        format!("T/B Panels {}×{}", inner_width, top_depth),
    );
    list.add_component(
        CutCategory::ShelfHardware,
        inner_width,
        shelf_depth,
        1,
        format!("Shelf Hardware {}×{}", inner_width, shelf_depth),
    );
    list.add_component(
        CutCategory::Backs,
        working_height,
        inner_width,
        1,
        format!("Back Panel {}×{}", working_height, inner_width),
    );

    let summary = list.summary();
    debug!(
        width = dims.width,
        total_height = dims.total_height,
        depth = dims.depth,
        working_height,
        total_pieces = summary.total_pieces,
        total_area = summary.total_area,
        "generated cutting list"
    );
    Ok(list)
}
