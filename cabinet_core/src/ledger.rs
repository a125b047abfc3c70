//! # Component Ledger
//!
//! The ledger is the single mutable artifact of a pricing session: one
//! [`ComponentResult`] per registry component plus running totals.
//!
//! Editing a cell only ever moves *forward* from the edited field:
//!
//! - editing `height` or `width` recomputes that component's area and price
//! - editing `area` recomputes that component's price and leaves height/width stale
//! - `price` is never editable
//!
//! Totals are re-summed over the whole ledger after every edit. Nothing is
//! re-derived from the original H/W/D.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::calculations::{calculate, CabinetInputs};
//!
//! let mut ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
//! ledger.edit_cell("gable", "height", "1000").unwrap();
//!
//! let gable = &ledger.components()[0];
//! assert!((gable.area - 0.6).abs() < 1e-12);
//! assert!((gable.price - 30.0).abs() < 1e-9);
//! assert!(ledger.is_edited());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CabinetInputs;
use crate::errors::{CabinetError, CabinetResult};
use crate::formulas::ComponentKind;
use crate::parsing::parse_decimal;
use crate::units::{Millimeters, SquareMeters};

/// One row of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    /// Which registry component this row is
    #[serde(rename = "key")]
    pub kind: ComponentKind,
    /// Display name ("Top Rail")
    pub name: String,
    /// Formula label ("(W-36) × (D-30)")
    pub formula_label: String,
    /// Panel height (mm)
    pub height: f64,
    /// Panel width (mm)
    pub width: f64,
    /// Panel area (m²)
    pub area: f64,
    /// Panel price, always `area × price_per_sq_m`
    pub price: f64,
}

impl ComponentResult {
    /// A row whose area and price follow from its height and width.
    pub(crate) fn derived(kind: ComponentKind, height: f64, width: f64, price_per_sq_m: f64) -> Self {
        let area = Millimeters(height) * Millimeters(width);
        ComponentResult {
            kind,
            name: kind.display_name().to_string(),
            formula_label: kind.formula_label().to_string(),
            height,
            width,
            area: area.0,
            price: area.price_at(price_per_sq_m),
        }
    }
}

/// The editable cells of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditField {
    Height,
    Width,
    Area,
}

impl EditField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Height => "height",
            EditField::Width => "width",
            EditField::Area => "area",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditField {
    type Err = CabinetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "height" => Ok(EditField::Height),
            "width" => Ok(EditField::Width),
            "area" => Ok(EditField::Area),
            "price" => Err(CabinetError::invalid_field(
                "",
                s,
                "Price is derived from area and cannot be edited",
            )),
            _ => Err(CabinetError::invalid_field("", s, "Expected one of height, width, area")),
        }
    }
}

/// Calculated (and possibly edited) component results with running totals.
///
/// Built by [`crate::calculations::calculate`]; there is no other way to
/// construct one, so every registry component is always present exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    inputs: CabinetInputs,
    price_per_sq_m: f64,
    components: Vec<ComponentResult>,
    total_area: f64,
    total_price: f64,
    edited: bool,
}

impl Ledger {
    pub(crate) fn new(inputs: CabinetInputs, price_per_sq_m: f64, components: Vec<ComponentResult>) -> Self {
        let mut ledger = Ledger {
            inputs,
            price_per_sq_m,
            components,
            total_area: 0.0,
            total_price: 0.0,
            edited: false,
        };
        ledger.recompute_totals();
        ledger
    }

    /// The dimensions this ledger was calculated from
    pub fn inputs(&self) -> &CabinetInputs {
        &self.inputs
    }

    /// Price per square meter used for every price in the ledger
    pub fn price_per_sq_m(&self) -> f64 {
        self.price_per_sq_m
    }

    /// Rows in registry order
    pub fn components(&self) -> &[ComponentResult] {
        &self.components
    }

    /// Row for a given component
    pub fn component(&self, kind: ComponentKind) -> Option<&ComponentResult> {
        self.components.iter().find(|c| c.kind == kind)
    }

    /// Σ area over all rows (m²)
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Σ price over all rows
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Whether any cell has been edited since calculation
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Set one cell to a number and propagate forward.
    pub fn set_value(&mut self, kind: ComponentKind, field: EditField, value: f64) -> CabinetResult<()> {
        let price_per_sq_m = self.price_per_sq_m;
        let row = self
            .components
            .iter_mut()
            .find(|c| c.kind == kind)
            .ok_or_else(|| CabinetError::invalid_field(kind.key(), field.as_str(), "Component is not in this ledger"))?;

        match field {
            EditField::Height | EditField::Width => {
                if field == EditField::Height {
                    row.height = value;
                } else {
                    row.width = value;
                }
                let area = Millimeters(row.height) * Millimeters(row.width);
                row.area = area.0;
                row.price = area.price_at(price_per_sq_m);
            }
            EditField::Area => {
                row.area = value;
                row.price = SquareMeters(value).price_at(price_per_sq_m);
            }
        }

        self.edited = true;
        self.recompute_totals();
        debug!(
            component = kind.key(),
            field = field.as_str(),
            value,
            total_area = self.total_area,
            total_price = self.total_price,
            "edited ledger cell"
        );
        Ok(())
    }

    /// Edit a cell from text, as typed into the breakdown table.
    ///
    /// `component` and `field` are validated; `raw` is parsed leniently and
    /// anything non-numeric becomes 0. Returns the value that was stored.
    pub fn edit_cell(&mut self, component: &str, field: &str, raw: &str) -> CabinetResult<f64> {
        let kind = ComponentKind::from_key(component).ok_or_else(|| {
            CabinetError::invalid_field(component, field, "Unknown component; expected one of gable, base, topRail, back, shelf")
        })?;
        let field = field.parse::<EditField>().map_err(|err| match err {
            CabinetError::InvalidField { field, reason, .. } => {
                CabinetError::invalid_field(component, field, reason)
            }
            other => other,
        })?;

        let value = parse_decimal(raw);
        self.set_value(kind, field, value)?;
        Ok(value)
    }

    fn recompute_totals(&mut self) {
        self.total_area = self.components.iter().map(|c| c.area).sum();
        self.total_price = self.components.iter().map(|c| c.price).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate;

    const EPS: f64 = 1e-9;

    fn reference_ledger() -> Ledger {
        calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap()
    }

    #[test]
    fn test_edit_height_recomputes_row_and_totals() {
        let mut ledger = reference_ledger();
        let before = ledger.clone();

        ledger.edit_cell("gable", "height", "1000").unwrap();

        let gable = ledger.component(ComponentKind::Gable).unwrap();
        assert_eq!(gable.height, 1000.0);
        assert_eq!(gable.width, 600.0);
        assert!((gable.area - 0.6).abs() < EPS);
        assert!((gable.price - 30.0).abs() < EPS);

        let old_gable_area = before.component(ComponentKind::Gable).unwrap().area;
        assert!((before.total_area() - ledger.total_area() - (old_gable_area - 0.6)).abs() < EPS);

        // Every other row untouched
        for (after, before) in ledger.components().iter().zip(before.components()).skip(1) {
            assert_eq!(after, before);
        }
    }

    #[test]
    fn test_edit_width_leaves_height() {
        let mut ledger = reference_ledger();
        ledger.set_value(ComponentKind::Shelf, EditField::Width, 400.0).unwrap();

        let shelf = ledger.component(ComponentKind::Shelf).unwrap();
        assert_eq!(shelf.height, 564.0);
        assert!((shelf.area - 0.2256).abs() < EPS);
        assert!((shelf.price - 11.28).abs() < EPS);
    }

    #[test]
    fn test_edit_area_leaves_dimensions_stale() {
        let mut ledger = reference_ledger();
        ledger.edit_cell("back", "area", "2.0").unwrap();

        let back = ledger.component(ComponentKind::Back).unwrap();
        assert_eq!(back.area, 2.0);
        assert!((back.price - 100.0).abs() < EPS);
        assert_eq!(back.height, 2100.0);
        assert_eq!(back.width, 564.0);
        assert!((back.height * back.width / 1_000_000.0 - back.area).abs() > 0.5);
    }

    #[test]
    fn test_totals_are_sums_after_edits() {
        let mut ledger = reference_ledger();
        ledger.edit_cell("base", "width", "300").unwrap();
        ledger.edit_cell("topRail", "area", "0.1").unwrap();

        let area: f64 = ledger.components().iter().map(|c| c.area).sum();
        let price: f64 = ledger.components().iter().map(|c| c.price).sum();
        assert!((ledger.total_area() - area).abs() < EPS);
        assert!((ledger.total_price() - price).abs() < EPS);
    }

    #[test]
    fn test_non_numeric_edit_becomes_zero() {
        let mut ledger = reference_ledger();
        let stored = ledger.edit_cell("shelf", "height", "abc").unwrap();

        assert_eq!(stored, 0.0);
        let shelf = ledger.component(ComponentKind::Shelf).unwrap();
        assert_eq!(shelf.height, 0.0);
        assert_eq!(shelf.area, 0.0);
        assert_eq!(shelf.price, 0.0);
    }

    #[test]
    fn test_unknown_component_is_invalid_field() {
        let mut ledger = reference_ledger();
        let before = ledger.clone();
        let err = ledger.edit_cell("plinth", "height", "10").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FIELD");
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_price_is_not_editable() {
        let mut ledger = reference_ledger();
        let err = ledger.edit_cell("gable", "price", "1").unwrap_err();
        match err {
            CabinetError::InvalidField { component, field, .. } => {
                assert_eq!(component, "gable");
                assert_eq!(field, "price");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!ledger.is_edited());
    }

    #[test]
    fn test_edit_field_parsing() {
        assert_eq!("Height".parse::<EditField>().unwrap(), EditField::Height);
        assert_eq!(" area ".parse::<EditField>().unwrap(), EditField::Area);
        assert!("depth".parse::<EditField>().is_err());
    }

    #[test]
    fn test_ledger_serialization() {
        let ledger = reference_ledger();
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["components"][2]["key"], "topRail");
        assert_eq!(json["components"][2]["formulaLabel"], "(W-36) × (D-30)");
        assert_eq!(json["pricePerSqM"], 50.0);
        assert_eq!(json["edited"], false);
    }
}
