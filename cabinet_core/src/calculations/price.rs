//! # Price Calculation
//!
//! Derives every registry component's panel size from the overall cabinet
//! height, width and depth, then prices each panel by area.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::calculations::price::{calculate, CabinetInputs};
//!
//! let ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
//! assert_eq!(ledger.components().len(), 5);
//! assert!((ledger.total_area() - 3.25656).abs() < 1e-9);
//! assert!((ledger.total_price() - 162.828).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CabinetError, CabinetResult};
use crate::formulas::ComponentKind;
use crate::ledger::{ComponentResult, Ledger};

/// Overall cabinet dimensions in millimeters.
///
/// ## JSON Example
///
/// ```json
/// { "height": 2100.0, "width": 600.0, "depth": 560.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinetInputs {
    /// Overall height H (mm)
    pub height: f64,
    /// Overall width W (mm)
    pub width: f64,
    /// Overall depth D (mm)
    pub depth: f64,
}

impl CabinetInputs {
    pub fn new(height: f64, width: f64, depth: f64) -> Self {
        CabinetInputs { height, width, depth }
    }

    /// Validate input parameters.
    ///
    /// All three dimensions must be finite and strictly positive.
    pub fn validate(&self) -> CabinetResult<()> {
        for (field, value) in [("height", self.height), ("width", self.width), ("depth", self.depth)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CabinetError::invalid_input(
                    field,
                    value.to_string(),
                    "Please enter valid positive numbers for all dimensions",
                ));
            }
        }
        Ok(())
    }
}

/// Validate a price per square meter.
pub fn validate_price(price_per_sq_m: f64) -> CabinetResult<()> {
    if !price_per_sq_m.is_finite() || price_per_sq_m < 0.0 {
        return Err(CabinetError::invalid_input(
            "price_per_sq_m",
            price_per_sq_m.to_string(),
            "Price per m² must be a non-negative number",
        ));
    }
    Ok(())
}

/// Calculate the component ledger for one cabinet.
///
/// # Arguments
///
/// * `inputs` - Overall cabinet dimensions
/// * `price_per_sq_m` - Board price per square meter
///
/// # Returns
///
/// * `Ok(Ledger)` - A fresh ledger in registry order
/// * `Err(CabinetError::InvalidInput)` - A dimension is not positive or the price is negative
pub fn calculate(inputs: &CabinetInputs, price_per_sq_m: f64) -> CabinetResult<Ledger> {
    inputs.validate()?;
    validate_price(price_per_sq_m)?;

    let components: Vec<ComponentResult> = ComponentKind::ALL
        .iter()
        .map(|&kind| {
            let (height, width) = kind.dimensions(inputs);
            if height.0 < 0.0 || width.0 < 0.0 {
                warn!(
                    component = kind.key(),
                    height = height.0,
                    width = width.0,
                    "derived panel dimension is negative"
                );
            }
            ComponentResult::derived(kind, height.0, width.0, price_per_sq_m)
        })
        .collect();

    let ledger = Ledger::new(*inputs, price_per_sq_m, components);
    debug!(
        height = inputs.height,
        width = inputs.width,
        depth = inputs.depth,
        price_per_sq_m,
        total_area = ledger.total_area(),
        total_price = ledger.total_price(),
        "calculated component ledger"
    );
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_reference_cabinet() {
        let ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
        let expected = [
            (ComponentKind::Gable, 2100.0, 600.0, 1.26, 63.0),
            (ComponentKind::Base, 564.0, 490.0, 0.27636, 13.818),
            (ComponentKind::TopRail, 564.0, 530.0, 0.29892, 14.946),
            (ComponentKind::Back, 2100.0, 564.0, 1.1844, 59.22),
            (ComponentKind::Shelf, 564.0, 420.0, 0.23688, 11.844),
        ];

        assert_eq!(ledger.components().len(), expected.len());
        for (component, (kind, h, w, area, price)) in ledger.components().iter().zip(expected) {
            assert_eq!(component.kind, kind);
            assert!(close(component.height, h), "{} height", kind);
            assert!(close(component.width, w), "{} width", kind);
            assert!(close(component.area, area), "{} area {}", kind, component.area);
            assert!(close(component.price, price), "{} price {}", kind, component.price);
        }
        assert!(close(ledger.total_area(), 3.25656));
        assert!(close(ledger.total_price(), 162.828));
        assert!(!ledger.is_edited());
    }

    #[test]
    fn test_labels_follow_registry() {
        let ledger = calculate(&CabinetInputs::new(720.0, 500.0, 580.0), 42.0).unwrap();
        let top_rail = ledger.component(ComponentKind::TopRail).unwrap();
        assert_eq!(top_rail.name, "Top Rail");
        assert_eq!(top_rail.formula_label, "(W-36) × (D-30)");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        for inputs in [
            CabinetInputs::new(0.0, 600.0, 560.0),
            CabinetInputs::new(2100.0, 0.0, 560.0),
            CabinetInputs::new(2100.0, 600.0, 0.0),
        ] {
            let err = calculate(&inputs, 50.0).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_invalid_field_is_named() {
        let err = calculate(&CabinetInputs::new(2100.0, -600.0, 560.0), 50.0).unwrap_err();
        match err {
            CabinetError::InvalidInput { field, .. } => assert_eq!(field, "width"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nan_dimension_rejected() {
        assert!(calculate(&CabinetInputs::new(f64::NAN, 600.0, 560.0), 50.0).is_err());
        assert!(calculate(&CabinetInputs::new(f64::INFINITY, 600.0, 560.0), 50.0).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), -1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_price_allowed() {
        let ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 0.0).unwrap();
        assert_eq!(ledger.total_price(), 0.0);
        assert!(ledger.total_area() > 0.0);
    }

    #[test]
    fn test_shallow_depth_passes_through_negative() {
        // D - 140 < 0 for a 100mm deep cabinet
        let ledger = calculate(&CabinetInputs::new(720.0, 300.0, 100.0), 50.0).unwrap();
        let shelf = ledger.component(ComponentKind::Shelf).unwrap();
        assert!(close(shelf.width, -40.0));
        assert!(shelf.area < 0.0);
        assert!(shelf.price < 0.0);
    }

    #[test]
    fn test_inputs_serialization() {
        let inputs = CabinetInputs::new(2100.0, 600.0, 560.0);
        let json = serde_json::to_string(&inputs).unwrap();
        let roundtrip: CabinetInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, roundtrip);
    }
}
