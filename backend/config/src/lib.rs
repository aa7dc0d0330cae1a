//! `napsign-config` — runtime configuration for the napsign daemon.
//!
//! Provides:
//! - Typed TOML config schema with defaults
//! - First-run config file generation
//! - Atomic read/write helpers
//! - Validation pass producing a report of errors and warnings

pub mod io;
pub mod schema;
pub mod validation;

pub use io::{config_dir, config_file_path, ensure_config, load_config, write_config};
pub use schema::{NapcatServiceConfig, NapsignConfig, SignCoreConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Load the config, generating the default file on first run, and validate.
///
/// The main entry point for daemon startup. Validation errors do not fail the
/// load — the caller decides whether to proceed (the scheduler refuses to
/// start on any error).
pub async fn load_and_validate(path: &Path) -> Result<(NapsignConfig, ValidationReport)> {
    ensure_config(path).await?;
    let config = load_config(path).await?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok((config, report))
}
