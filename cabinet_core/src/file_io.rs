//! # File I/O Module
//!
//! - **Atomic writes** for exports: write to `.tmp`, sync, rename, so a
//!   half-written CSV or DXF never replaces a good one
//! - **Loading** of `cabinet.toml` and saved analysis responses
//!
//! ## Example
//!
//! ```rust,no_run
//! use cabinet_core::calculations::{calculate, CabinetInputs};
//! use cabinet_core::export::ledger_to_csv;
//! use cabinet_core::file_io::write_export;
//! use std::path::Path;
//!
//! let ledger = calculate(&CabinetInputs::new(2100.0, 600.0, 560.0), 50.0)?;
//! let csv = ledger_to_csv(&ledger)?;
//! write_export(Path::new("price_calculation_2024-03-18.csv"), csv.as_bytes())?;
//! # Ok::<(), cabinet_core::errors::CabinetError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analysis::AnalysisReport;
use crate::config::AppConfig;
use crate::errors::{CabinetError, CabinetResult};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cabinet.toml";

/// Temp path next to `path`: `layout.dxf` → `layout.dxf.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write an export file with atomic write semantics.
///
/// 1. Write to a temporary file (`.tmp`) beside the target
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_export(path: &Path, contents: &[u8]) -> CabinetResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CabinetError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CabinetError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CabinetError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CabinetError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(())
}

fn read_text(path: &Path) -> CabinetResult<String> {
    let mut file =
        File::open(path).map_err(|e| CabinetError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CabinetError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load and validate a configuration file.
///
/// # Returns
///
/// * `Ok(AppConfig)` - Parsed configuration with defaults filled in
/// * `Err(CabinetError::FileError)` - Missing or unreadable file
/// * `Err(CabinetError::SerializationError)` - Invalid TOML
/// * `Err(CabinetError::InvalidInput)` - A value is out of range
pub fn load_config(path: &Path) -> CabinetResult<AppConfig> {
    let contents = read_text(path)?;
    let config = AppConfig::from_toml_str(&contents).map_err(|e| match e {
        CabinetError::SerializationError { reason } => {
            CabinetError::serialization(format!("Invalid TOML in {}: {}", path.display(), reason))
        }
        other => other,
    })?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Load `path` if given, else `cabinet.toml` if it exists, else defaults.
pub fn load_config_or_default(path: Option<&Path>) -> CabinetResult<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(CONFIG_FILE_NAME);
            if default_path.exists() {
                load_config(default_path)
            } else {
                debug!("no configuration file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

/// Load a saved analysis-backend response.
pub fn load_analysis_response(path: &Path) -> CabinetResult<AnalysisReport> {
    let contents = read_text(path)?;
    AnalysisReport::from_json(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn scratch(name: &str) -> PathBuf {
        temp_dir().join(format!("cabinet_core_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_export_roundtrip() {
        let path = scratch("export.csv");
        write_export(&path, b"Component,Formula\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Component,Formula\n");
        assert!(!tmp_path_for(&path).exists());

        // Overwrite in place
        write_export(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        assert_eq!(tmp_path_for(Path::new("out/layout.dxf")), PathBuf::from("out/layout.dxf.tmp"));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let path = scratch("no_such_dir").join("x.csv");
        let err = write_export(&path, b"x").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_config() {
        let path = scratch("cabinet.toml");
        fs::write(&path, "[pricing]\nprice_per_sq_m = 42.5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.pricing.price_per_sq_m, 42.5);
        assert_eq!(config.layout.spacing, 50.0);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_config() {
        let err = load_config(&scratch("missing.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_config_names_file() {
        let path = scratch("broken.toml");
        fs::write(&path, "[pricing\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("broken.toml"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_analysis_failure() {
        let path = scratch("failed.json");
        fs::write(&path, r#"{"success": false, "message": "Blurry image"}"#).unwrap();

        let err = load_analysis_response(&path).unwrap_err();
        assert_eq!(err, CabinetError::AnalysisFailed { message: "Blurry image".to_string() });

        fs::remove_file(&path).ok();
    }
}
