//! # Component Formula Registry
//!
//! The fixed set of carcass components the price generator knows about and
//! the offset rule each one uses to derive its panel size from the overall
//! cabinet dimensions.
//!
//! | Component | Height  | Width   |
//! |-----------|---------|---------|
//! | Gable     | H       | W       |
//! | Base      | W − 36  | D − 70  |
//! | Top Rail  | W − 36  | D − 30  |
//! | Back      | H       | W − 36  |
//! | Shelf     | W − 36  | D − 140 |
//!
//! These offsets are fixed. The workshop cutting list uses its own,
//! configurable offsets (see [`crate::config::WorkshopConfig`]); the two sets
//! are deliberately kept apart.
//!
//! ## Usage
//!
//! ```rust
//! use cabinet_core::calculations::CabinetInputs;
//! use cabinet_core::formulas::ComponentKind;
//!
//! let inputs = CabinetInputs::new(2100.0, 600.0, 560.0);
//! let (h, w) = ComponentKind::Shelf.dimensions(&inputs);
//! assert_eq!((h.0, w.0), (564.0, 420.0));
//! assert_eq!(ComponentKind::Shelf.formula_label(), "(W-36) × (D-140)");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::CabinetInputs;
use crate::errors::CabinetError;
use crate::units::Millimeters;

/// Width lost to the two 18mm gables
pub const INTERNAL_WIDTH_OFFSET_MM: f64 = 36.0;
/// Depth deduction for the base panel
pub const BASE_DEPTH_OFFSET_MM: f64 = 70.0;
/// Depth deduction for the top rail
pub const TOP_RAIL_DEPTH_OFFSET_MM: f64 = 30.0;
/// Depth deduction for an adjustable shelf
pub const SHELF_DEPTH_OFFSET_MM: f64 = 140.0;

/// One structural cabinet part with a fixed dimension formula.
///
/// Variant order is registry order; ledgers and exports always list
/// components in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Gable,
    Base,
    TopRail,
    Back,
    Shelf,
}

impl ComponentKind {
    /// Every component, in registry order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Gable,
        ComponentKind::Base,
        ComponentKind::TopRail,
        ComponentKind::Back,
        ComponentKind::Shelf,
    ];

    /// Stable key used by edit commands and layout group ids
    pub fn key(&self) -> &'static str {
        match self {
            ComponentKind::Gable => "gable",
            ComponentKind::Base => "base",
            ComponentKind::TopRail => "topRail",
            ComponentKind::Back => "back",
            ComponentKind::Shelf => "shelf",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Gable => "Gable",
            ComponentKind::Base => "Base",
            ComponentKind::TopRail => "Top Rail",
            ComponentKind::Back => "Back",
            ComponentKind::Shelf => "Shelf",
        }
    }

    /// Formula as shown in the breakdown table and CSV export
    pub fn formula_label(&self) -> &'static str {
        match self {
            ComponentKind::Gable => "H × W",
            ComponentKind::Base => "(W-36) × (D-70)",
            ComponentKind::TopRail => "(W-36) × (D-30)",
            ComponentKind::Back => "H × (W-36)",
            ComponentKind::Shelf => "(W-36) × (D-140)",
        }
    }

    /// Derived `(height, width)` of this panel.
    ///
    /// No clamping: a depth below the offset yields a negative width.
    pub fn dimensions(&self, inputs: &CabinetInputs) -> (Millimeters, Millimeters) {
        let h = Millimeters(inputs.height);
        let w = Millimeters(inputs.width);
        let d = Millimeters(inputs.depth);
        let internal_width = w - Millimeters(INTERNAL_WIDTH_OFFSET_MM);

        match self {
            ComponentKind::Gable => (h, w),
            ComponentKind::Base => (internal_width, d - Millimeters(BASE_DEPTH_OFFSET_MM)),
            ComponentKind::TopRail => (internal_width, d - Millimeters(TOP_RAIL_DEPTH_OFFSET_MM)),
            ComponentKind::Back => (h, internal_width),
            ComponentKind::Shelf => (internal_width, d - Millimeters(SHELF_DEPTH_OFFSET_MM)),
        }
    }

    /// Look up a component by key.
    ///
    /// Accepts the canonical key as well as the display name and the
    /// snake/kebab spellings (`top_rail`, `top-rail`), case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.key().to_lowercase() == normalized)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ComponentKind {
    type Err = CabinetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::from_key(s).ok_or_else(|| {
            CabinetError::invalid_field(s, "", "Unknown component; expected one of gable, base, topRail, back, shelf")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> CabinetInputs {
        CabinetInputs::new(2100.0, 600.0, 560.0)
    }

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = ComponentKind::ALL.iter().map(|k| k.display_name()).collect();
        assert_eq!(names, ["Gable", "Base", "Top Rail", "Back", "Shelf"]);
    }

    #[test]
    fn test_dimensions() {
        let inputs = inputs();
        let dims: Vec<(f64, f64)> = ComponentKind::ALL
            .iter()
            .map(|k| {
                let (h, w) = k.dimensions(&inputs);
                (h.0, w.0)
            })
            .collect();
        assert_eq!(
            dims,
            [(2100.0, 600.0), (564.0, 490.0), (564.0, 530.0), (2100.0, 564.0), (564.0, 420.0)]
        );
    }

    #[test]
    fn test_shallow_cabinet_goes_negative() {
        let inputs = CabinetInputs::new(720.0, 300.0, 100.0);
        let (_, w) = ComponentKind::Shelf.dimensions(&inputs);
        assert_eq!(w.0, -40.0);
    }

    #[test]
    fn test_from_key_spellings() {
        assert_eq!(ComponentKind::from_key("topRail"), Some(ComponentKind::TopRail));
        assert_eq!(ComponentKind::from_key("top_rail"), Some(ComponentKind::TopRail));
        assert_eq!(ComponentKind::from_key("Top Rail"), Some(ComponentKind::TopRail));
        assert_eq!(ComponentKind::from_key("GABLE"), Some(ComponentKind::Gable));
        assert_eq!(ComponentKind::from_key("plinth"), None);
    }

    #[test]
    fn test_from_str_unknown_is_invalid_field() {
        let err = "plinth".parse::<ComponentKind>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FIELD");
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&ComponentKind::TopRail).unwrap(), "\"topRail\"");
        let kind: ComponentKind = serde_json::from_str("\"shelf\"").unwrap();
        assert_eq!(kind, ComponentKind::Shelf);
    }
}
