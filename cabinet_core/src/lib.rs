//! # cabinet_core - Cabinet Formula Engine
//!
//! `cabinet_core` turns overall kitchen-cabinet dimensions into panel sizes,
//! prices and cutting lists, lets a user correct any derived cell, and
//! renders the result as CSV or as a sheet layout drawing.
//!
//! ## Design Philosophy
//!
//! - **Explicit state**: the only mutable artifact is a [`Ledger`], held by a
//!   caller-owned [`PriceSession`]; the crate has no globals
//! - **JSON-First**: inputs, ledgers and cutting lists implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cabinet_core::calculations::CabinetInputs;
//! use cabinet_core::export::ledger_to_csv;
//! use cabinet_core::PriceSession;
//!
//! let mut session = PriceSession::new();
//! session.calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
//! session.edit_cell("shelf", "width", "400").unwrap();
//!
//! let csv = ledger_to_csv(session.ledger().unwrap()).unwrap();
//! assert!(csv.contains("\"Shelf\",\"(W-36) × (D-140)\",564.00,400.00,0.2256,11.28"));
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - The fixed component registry and its offset formulas
//! - [`calculations`] - Price calculation and workshop cutting-list generation
//! - [`ledger`] - Editable component results with running totals
//! - [`session`] - Per-user holder for the active ledger
//! - [`cutting_list`] - Categorized cutting list and its summaries
//! - [`analysis`] - Drawing-analysis backend responses
//! - [`export`] - CSV and layout drawing exports
//! - [`config`] - `cabinet.toml` settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic export writes and file loading

pub mod analysis;
pub mod calculations;
pub mod config;
pub mod cutting_list;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod formulas;
pub mod ledger;
pub mod parsing;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::AnalysisReport;
pub use config::{AppConfig, LayoutOptions, WorkshopConfig};
pub use cutting_list::{CutCategory, CuttingList};
pub use errors::{CabinetError, CabinetResult};
pub use formulas::ComponentKind;
pub use ledger::{ComponentResult, EditField, Ledger};
pub use session::PriceSession;
