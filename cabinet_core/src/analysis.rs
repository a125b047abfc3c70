//! # Analysis Response
//!
//! Typed view of the JSON returned by the drawing-analysis backend. The
//! backend itself (OCR and model calls) lives elsewhere; this module only
//! consumes its output.
//!
//! A successful response looks like:
//!
//! ```json
//! {
//!   "success": true,
//!   "filename": "kitchen_run_a.png",
//!   "timestamp": "2024-03-18T09:41:07.512301",
//!   "summary": { "total_pieces": 6, "total_area": 4.2, "categories": 4 },
//!   "results": { "GABLE": { "items": [ ... ], "total_pieces": 2, ... }, ... },
//!   "dxf_content": "MApTRUNUSU9O...",
//!   "configuration": { "back_width_offset": 36, ... }
//! }
//! ```
//!
//! and a failed one as `{"success": false, "error": "...", "message": "..."}`.

use base64::Engine;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WorkshopConfig;
use crate::cutting_list::{CutCategory, CuttingList, CuttingSummary};
use crate::errors::{CabinetError, CabinetResult};

const DEFAULT_FAILURE_MESSAGE: &str = "Unable to process the drawing";

/// Wire shape shared by success and failure responses
#[derive(Debug, Deserialize)]
struct RawResponse {
    success: bool,
    filename: Option<String>,
    timestamp: Option<String>,
    summary: Option<CuttingSummary>,
    results: Option<CuttingList>,
    dxf_content: Option<String>,
    configuration: Option<WorkshopConfig>,
    error: Option<String>,
    message: Option<String>,
}

/// A successful analysis, ready for review and editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub filename: String,
    /// ISO-8601 timestamp as sent by the backend
    pub timestamp: Option<String>,
    pub summary: CuttingSummary,
    pub results: CuttingList,
    /// Backend-generated layout drawing, base64 encoded
    pub dxf_content: Option<String>,
    /// Offsets the backend used
    pub configuration: WorkshopConfig,
}

impl AnalysisReport {
    /// Parse a backend response.
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisReport)` - The backend reported success
    /// * `Err(CabinetError::AnalysisFailed)` - `success` was false or no results were sent
    /// * `Err(CabinetError::SerializationError)` - The body is not a valid response
    pub fn from_json(text: &str) -> CabinetResult<Self> {
        let raw: RawResponse = serde_json::from_str(text)
            .map_err(|e| CabinetError::serialization(format!("Invalid analysis response: {}", e)))?;

        if !raw.success {
            if let Some(error) = &raw.error {
                warn!(error = %error, "analysis backend reported failure");
            }
            let message = raw
                .message
                .or(raw.error)
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(CabinetError::AnalysisFailed { message });
        }

        let results = raw.results.ok_or_else(|| CabinetError::AnalysisFailed {
            message: "Response contains no cutting list".to_string(),
        })?;
        let summary = raw.summary.unwrap_or_else(|| results.summary());

        debug!(
            filename = raw.filename.as_deref().unwrap_or(""),
            total_pieces = summary.total_pieces,
            has_dxf = raw.dxf_content.is_some(),
            "loaded analysis response"
        );

        Ok(AnalysisReport {
            filename: raw.filename.unwrap_or_default(),
            timestamp: raw.timestamp,
            summary,
            results,
            dxf_content: raw.dxf_content,
            configuration: raw.configuration.unwrap_or_default(),
        })
    }

    /// Decode the embedded layout drawing, if the backend sent one.
    pub fn decode_dxf(&self) -> CabinetResult<Option<Vec<u8>>> {
        self.dxf_content
            .as_deref()
            .map(|encoded| {
                base64::engine::general_purpose::STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| CabinetError::export_failed("dxf", format!("Invalid base64 content: {}", e)))
            })
            .transpose()
    }

    /// Backend timestamp, when present and well formed.
    pub fn analyzed_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(|t| t.parse::<NaiveDateTime>().ok())
    }

    /// Uploaded file name up to its first `.`, used in export file names.
    pub fn file_stem(&self) -> &str {
        match self.filename.split('.').next() {
            Some(stem) if !stem.is_empty() => stem,
            _ => "drawing",
        }
    }

    /// Edit one cutting-list item and refresh every summary.
    pub fn edit_item(&mut self, category: CutCategory, index: usize, field: &str, raw: &str) -> CabinetResult<()> {
        self.results.edit_item(category, index, field, raw)?;
        self.refresh_summary();
        Ok(())
    }

    /// Recompute category and overall summaries from the items.
    pub fn refresh_summary(&mut self) {
        self.results.refresh_summaries();
        self.summary = self.results.summary();
    }
}
