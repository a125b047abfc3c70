//! # Error Types
//!
//! Structured error types for cabinet_core. Every variant carries enough
//! context for a front end to render a validation message without parsing
//! strings, and serializes cleanly to JSON for tooling.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::errors::{CabinetError, CabinetResult};
//!
//! fn validate_depth(depth_mm: f64) -> CabinetResult<()> {
//!     if depth_mm <= 0.0 {
//!         return Err(CabinetError::invalid_input(
//!             "depth",
//!             depth_mm.to_string(),
//!             "Depth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cabinet_core operations
pub type CabinetResult<T> = Result<T, CabinetError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CabinetError {
    /// An input value is invalid (non-positive dimension, negative price, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An edit named a component or field that does not exist
    #[error("Invalid field '{field}' on component '{component}': {reason}")]
    InvalidField {
        component: String,
        field: String,
        reason: String,
    },

    /// An edit or export was requested before anything was calculated
    #[error("No active ledger - run a calculation first")]
    NoActiveLedger,

    /// The drawing-analysis backend reported a failure
    #[error("Analysis failed: {message}")]
    AnalysisFailed { message: String },

    /// An export could not be produced
    #[error("Export failed: {format} - {reason}")]
    ExportFailed { format: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CabinetError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CabinetError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(component: impl Into<String>, field: impl Into<String>, reason: impl Into<String>) -> Self {
        CabinetError::InvalidField {
            component: component.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExportFailed error
    pub fn export_failed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        CabinetError::ExportFailed {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CabinetError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CabinetError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Errors caused by what the user typed, as opposed to file or data errors
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CabinetError::InvalidInput { .. } | CabinetError::InvalidField { .. } | CabinetError::NoActiveLedger
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CabinetError::InvalidInput { .. } => "INVALID_INPUT",
            CabinetError::InvalidField { .. } => "INVALID_FIELD",
            CabinetError::NoActiveLedger => "NO_ACTIVE_LEDGER",
            CabinetError::AnalysisFailed { .. } => "ANALYSIS_FAILED",
            CabinetError::ExportFailed { .. } => "EXPORT_FAILED",
            CabinetError::FileError { .. } => "FILE_ERROR",
            CabinetError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<csv::Error> for CabinetError {
    fn from(err: csv::Error) -> Self {
        CabinetError::export_failed("csv", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CabinetError::invalid_input("height", "0", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CabinetError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CabinetError::invalid_field("plinth", "height", "unknown").error_code(), "INVALID_FIELD");
        assert_eq!(CabinetError::NoActiveLedger.error_code(), "NO_ACTIVE_LEDGER");
        assert_eq!(CabinetError::export_failed("dxf", "bad base64").error_code(), "EXPORT_FAILED");
    }

    #[test]
    fn test_user_errors() {
        assert!(CabinetError::invalid_input("width", "-1", "Width must be positive").is_user_error());
        assert!(CabinetError::invalid_field("gable", "price", "not editable").is_user_error());
        assert!(!CabinetError::file_error("read", "cabinet.toml", "not found").is_user_error());
        assert!(!CabinetError::serialization("expected value").is_user_error());
    }

    #[test]
    fn test_display_includes_context() {
        let error = CabinetError::invalid_field("gable", "price", "Price is derived and cannot be edited");
        let message = error.to_string();
        assert!(message.contains("gable"));
        assert!(message.contains("price"));
    }
}
