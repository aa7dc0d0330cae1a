//! Config validation with user-friendly error messages.
//!
//! Any error in the report means the scheduler must not start; warnings are
//! logged and otherwise ignored.

use crate::schema::NapsignConfig;
use chrono::{FixedOffset, NaiveTime};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &NapsignConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_sign_core(config, &mut report);
    validate_napcat_service(config, &mut report);
    report
}

fn validate_sign_core(config: &NapsignConfig, report: &mut ValidationReport) {
    let sign = &config.sign_core;

    if NaiveTime::parse_from_str(&sign.auto_checkin_time, "%H:%M:%S").is_err() {
        report.error(
            "sign_core.auto_checkin_time",
            format!(
                "Invalid check-in time '{}'; expected HH:MM:SS (e.g. 09:30:00)",
                sign.auto_checkin_time
            ),
        );
    }

    if !(-23..=23).contains(&sign.timezone)
        || FixedOffset::east_opt(sign.timezone * 3600).is_none()
    {
        report.error(
            "sign_core.timezone",
            format!(
                "Invalid UTC offset {}; expected whole hours in -23..=23",
                sign.timezone
            ),
        );
    }
}

fn validate_napcat_service(config: &NapsignConfig, report: &mut ValidationReport) {
    let napcat = &config.napcat_service;

    if napcat.host.trim().is_empty() {
        report.error("napcat_service.host", "NapCat host cannot be empty");
    } else if napcat.host.contains("://") {
        report.warn(
            "napcat_service.host",
            "Host should be a bare hostname or IP; the http:// scheme is added automatically",
        );
    }

    if napcat.port == 0 {
        report.error(
            "napcat_service.port",
            "NapCat port must be in the range 1-65535",
        );
    }

    if napcat.token.is_empty() {
        report.warn(
            "napcat_service.token",
            "No token configured; requests will be sent without an Authorization header",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NapsignConfig;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&NapsignConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn bad_time_format_is_an_error() {
        let mut config = NapsignConfig::default();
        config.sign_core.auto_checkin_time = "25:00:00".into();
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "sign_core.auto_checkin_time");

        config.sign_core.auto_checkin_time = "8am".into();
        assert!(!validate(&config).is_valid());
    }

    #[test]
    fn out_of_range_timezone_is_an_error() {
        let mut config = NapsignConfig::default();
        config.sign_core.timezone = 24;
        assert!(!validate(&config).is_valid());

        config.sign_core.timezone = -24;
        assert!(!validate(&config).is_valid());

        config.sign_core.timezone = -12;
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn empty_host_and_zero_port_are_errors() {
        let mut config = NapsignConfig::default();
        config.napcat_service.host = "  ".into();
        config.napcat_service.port = 0;
        let report = validate(&config);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn url_host_is_only_a_warning() {
        let mut config = NapsignConfig::default();
        config.napcat_service.host = "http://127.0.0.1".into();
        let report = validate(&config);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.path == "napcat_service.host"));
    }
}
