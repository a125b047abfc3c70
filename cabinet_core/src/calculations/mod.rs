//! # Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - `*Input` / `*Inputs` - Input parameters (JSON-serializable)
//! - a result type (JSON-serializable)
//! - `calculate(input) -> CabinetResult<Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`price`] - Component dimensions and pricing for one carcass (the price generator)
//! - [`cutting_list`] - Workshop cutting list using the configurable offsets

pub mod cutting_list;
pub mod price;

pub use cutting_list::{generate_cutting_list, CabinetDimensions};
pub use price::{calculate, CabinetInputs};
