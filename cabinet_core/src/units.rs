//! # Unit Types
//!
//! Type-safe wrappers for the two units the workshop deals in. Panel
//! dimensions are always millimeters; board area is always square meters,
//! which is also the unit prices are quoted against.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::units::{Millimeters, SquareMeters};
//!
//! let area = SquareMeters::from_mm(Millimeters(2100.0), Millimeters(600.0));
//! assert!((area.0 - 1.26).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Mul, Sub};

/// Square millimeters per square meter
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Area of a `height × width` panel given in millimeters.
    pub fn from_mm(height: Millimeters, width: Millimeters) -> Self {
        SquareMeters(height.0 * width.0 / MM2_PER_M2)
    }

    /// Price of this much board at `price_per_sq_m`.
    pub fn price_at(self, price_per_sq_m: f64) -> f64 {
        self.0 * price_per_sq_m
    }
}

impl Mul for Millimeters {
    type Output = SquareMeters;
    fn mul(self, rhs: Self) -> SquareMeters {
        SquareMeters::from_mm(self, rhs)
    }
}

impl Sub for Millimeters {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Millimeters(self.0 - rhs.0)
    }
}
