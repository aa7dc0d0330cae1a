//! Typed config schema for `config.toml`.
//!
//! Every field has a default so a partial (or absent) file still loads; the
//! defaults match the generated first-run config.

use serde::{Deserialize, Serialize};

/// Root of the napsign configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NapsignConfig {
    pub sign_core: SignCoreConfig,
    pub napcat_service: NapcatServiceConfig,
}

/// Core check-in schedule: daily fire time plus the UTC offset used to
/// interpret it. The batch runs at most once per calendar day in this zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignCoreConfig {
    /// Daily check-in time, `HH:MM:SS`.
    pub auto_checkin_time: String,
    /// Signed UTC offset in whole hours (8 = UTC+8).
    pub timezone: i32,
}

impl Default for SignCoreConfig {
    fn default() -> Self {
        Self {
            auto_checkin_time: "08:00:00".to_string(),
            timezone: 8,
        }
    }
}

/// Connection settings for the NapCat HTTP service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NapcatServiceConfig {
    pub host: String,
    pub port: u16,
    /// Authorization token; when empty the header is omitted entirely.
    pub token: String,
}

impl Default for NapcatServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9999,
            token: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_generated_config() {
        let config = NapsignConfig::default();
        assert_eq!(config.sign_core.auto_checkin_time, "08:00:00");
        assert_eq!(config.sign_core.timezone, 8);
        assert_eq!(config.napcat_service.host, "127.0.0.1");
        assert_eq!(config.napcat_service.port, 9999);
        assert!(config.napcat_service.token.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let raw = r#"
            [sign_core]
            auto_checkin_time = "21:30:00"
        "#;
        let config: NapsignConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.sign_core.auto_checkin_time, "21:30:00");
        assert_eq!(config.sign_core.timezone, 8);
        assert_eq!(config.napcat_service.port, 9999);
    }

    #[test]
    fn full_toml_round_trips() {
        let config = NapsignConfig {
            sign_core: SignCoreConfig {
                auto_checkin_time: "06:15:00".into(),
                timezone: -5,
            },
            napcat_service: NapcatServiceConfig {
                host: "10.0.0.2".into(),
                port: 3000,
                token: "secret".into(),
            },
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        let parsed: NapsignConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.sign_core.timezone, -5);
        assert_eq!(parsed.napcat_service.host, "10.0.0.2");
        assert_eq!(parsed.napcat_service.token, "secret");
    }
}
