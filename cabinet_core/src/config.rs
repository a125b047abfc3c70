//! # Configuration
//!
//! Settings read from `cabinet.toml`. Every section and every key is
//! optional; missing values fall back to the workshop defaults.
//!
//! ```toml
//! [pricing]
//! price_per_sq_m = 50.0
//! currency = "£"
//!
//! [workshop]
//! back_width_offset = 36
//! top_depth_offset = 30
//! shelf_depth_offset = 70
//! thickness = 18
//! leg_height_deduction = 100
//! countertop_deduction = 25
//!
//! [layout]
//! max_row_width = 2440.0
//! spacing = 50.0
//! text_height = 8.0
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CabinetError, CabinetResult};

/// Default board price per square meter
pub const DEFAULT_PRICE_PER_SQ_M: f64 = 50.0;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub workshop: WorkshopConfig,
    pub layout: LayoutOptions,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> CabinetResult<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| CabinetError::serialization(format!("TOML parsing error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> CabinetResult<String> {
        toml::to_string_pretty(self).map_err(|e| CabinetError::serialization(e.to_string()))
    }

    pub fn validate(&self) -> CabinetResult<()> {
        self.pricing.validate()?;
        self.workshop.validate()?;
        self.layout.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Board price per square meter
    pub price_per_sq_m: f64,
    /// Currency symbol for the CSV price header; `None` gives plain "Price"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            price_per_sq_m: DEFAULT_PRICE_PER_SQ_M,
            currency: None,
        }
    }
}

impl PricingConfig {
    fn validate(&self) -> CabinetResult<()> {
        if !self.price_per_sq_m.is_finite() || self.price_per_sq_m < 0.0 {
            return Err(CabinetError::invalid_input(
                "pricing.price_per_sq_m",
                self.price_per_sq_m.to_string(),
                "Must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Offsets used by the workshop cutting list.
///
/// These are separate from the fixed price-generator offsets in
/// [`crate::formulas`] and are not expected to agree with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    /// Width deduction for backs, tops and shelves (mm)
    pub back_width_offset: f64,
    /// Depth deduction for top/bottom panels (mm)
    pub top_depth_offset: f64,
    /// Depth deduction for shelves (mm)
    pub shelf_depth_offset: f64,
    /// Board thickness (mm)
    pub thickness: f64,
    /// Subtracted from total height for legs (mm)
    pub leg_height_deduction: f64,
    /// Subtracted from total height for the countertop (mm)
    pub countertop_deduction: f64,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        WorkshopConfig {
            back_width_offset: 36.0,
            top_depth_offset: 30.0,
            shelf_depth_offset: 70.0,
            thickness: 18.0,
            leg_height_deduction: 100.0,
            countertop_deduction: 25.0,
        }
    }
}

impl WorkshopConfig {
    /// Carcass height once legs and countertop are taken off.
    pub fn working_height(&self, total_height: f64) -> f64 {
        total_height - self.leg_height_deduction - self.countertop_deduction
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("workshop.back_width_offset", self.back_width_offset),
            ("workshop.top_depth_offset", self.top_depth_offset),
            ("workshop.shelf_depth_offset", self.shelf_depth_offset),
            ("workshop.thickness", self.thickness),
            ("workshop.leg_height_deduction", self.leg_height_deduction),
            ("workshop.countertop_deduction", self.countertop_deduction),
        ]
    }

    pub fn validate(&self) -> CabinetResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(CabinetError::invalid_input(field, value.to_string(), "Offsets must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Sheet layout parameters for the drawing export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Row wraps once an item would cross this x (mm)
    pub max_row_width: f64,
    /// Gap between items and between rows (mm)
    pub spacing: f64,
    /// Label text height
    pub text_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            max_row_width: 2440.0,
            spacing: 50.0,
            text_height: 8.0,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> CabinetResult<()> {
        for (field, value) in [
            ("layout.max_row_width", self.max_row_width),
            ("layout.spacing", self.spacing),
            ("layout.text_height", self.text_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CabinetError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pricing.price_per_sq_m, 50.0);
        assert_eq!(config.workshop.shelf_depth_offset, 70.0);
        assert_eq!(config.layout.max_row_width, 2440.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [pricing]
            currency = "£"

            [workshop]
            leg_height_deduction = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.currency.as_deref(), Some("£"));
        assert_eq!(config.pricing.price_per_sq_m, 50.0);
        assert_eq!(config.workshop.leg_height_deduction, 150.0);
        assert_eq!(config.workshop.countertop_deduction, 25.0);
    }

    #[test]
    fn test_working_height() {
        assert_eq!(WorkshopConfig::default().working_height(2100.0), 1975.0);
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = AppConfig::from_toml_str("[workshop]\nthickness = -1").unwrap_err();
        match err {
            CabinetError::InvalidInput { field, .. } => assert_eq!(field, "workshop.thickness"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_spacing_rejected() {
        assert!(AppConfig::from_toml_str("[layout]\nspacing = 0.0").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml_str("[pricing\nprice_per_sq_m = 1").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.pricing.currency = Some("€".to_string());
        config.layout.spacing = 25.0;

        let text = config.to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }
}
