//! # Price Session
//!
//! Holds at most one [`Ledger`]. A front end creates one session per user
//! (or per window) and passes it explicitly; the engine keeps no state of
//! its own.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::calculations::CabinetInputs;
//! use cabinet_core::session::PriceSession;
//!
//! let mut session = PriceSession::new();
//! assert!(session.edit_cell("gable", "height", "1000").is_err());
//!
//! session.calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0).unwrap();
//! session.edit_cell("gable", "height", "1000").unwrap();
//! assert!(session.ledger().unwrap().is_edited());
//!
//! session.reset();
//! assert!(session.ledger().is_none());
//! ```

use tracing::debug;

use crate::calculations::{calculate, CabinetInputs};
use crate::errors::{CabinetError, CabinetResult};
use crate::ledger::Ledger;

/// Pricing state for one user.
#[derive(Debug, Clone, Default)]
pub struct PriceSession {
    ledger: Option<Ledger>,
}

impl PriceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate a fresh ledger, replacing any previous one.
    ///
    /// On error the previous ledger (edited or not) is kept as it was.
    pub fn calculate(&mut self, inputs: &CabinetInputs, price_per_sq_m: f64) -> CabinetResult<&Ledger> {
        let ledger = calculate(inputs, price_per_sq_m)?;
        if self.ledger.is_some() {
            debug!("replacing previous ledger");
        }
        Ok(&*self.ledger.insert(ledger))
    }

    /// Edit one cell of the active ledger.
    pub fn edit_cell(&mut self, component: &str, field: &str, raw: &str) -> CabinetResult<f64> {
        self.ledger
            .as_mut()
            .ok_or(CabinetError::NoActiveLedger)?
            .edit_cell(component, field, raw)
    }

    /// Drop the active ledger.
    pub fn reset(&mut self) {
        self.ledger = None;
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    /// The active ledger, or `NoActiveLedger` (used before exporting)
    pub fn require_ledger(&self) -> CabinetResult<&Ledger> {
        self.ledger.as_ref().ok_or(CabinetError::NoActiveLedger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> CabinetInputs {
        CabinetInputs::new(2100.0, 600.0, 560.0)
    }

    #[test]
    fn test_edit_without_ledger() {
        let mut session = PriceSession::new();
        assert_eq!(
            session.edit_cell("gable", "height", "1").unwrap_err(),
            CabinetError::NoActiveLedger
        );
        assert_eq!(session.require_ledger().unwrap_err(), CabinetError::NoActiveLedger);
    }

    #[test]
    fn test_failed_calculate_keeps_previous_ledger() {
        let mut session = PriceSession::new();
        session.calculate(&inputs(), 50.0).unwrap();
        session.edit_cell("gable", "height", "1000").unwrap();
        let before = session.ledger().cloned();

        let err = session.calculate(&CabinetInputs::new(0.0, 600.0, 560.0), 50.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(session.ledger().cloned(), before);
    }

    #[test]
    fn test_recalculate_discards_edits() {
        let mut session = PriceSession::new();
        session.calculate(&inputs(), 50.0).unwrap();
        session.edit_cell("back", "area", "9").unwrap();

        let ledger = session.calculate(&inputs(), 50.0).unwrap();
        assert!(!ledger.is_edited());
        assert!((ledger.total_price() - 162.828).abs() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let mut session = PriceSession::new();
        session.calculate(&inputs(), 50.0).unwrap();
        session.reset();
        assert!(session.ledger().is_none());
    }
}
