// src/config.rs

use lazy_static::lazy_static;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.as_str());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
    pub static ref TIMEOUT_ENV: String = format!("{}_TIMEOUT_MS", PROJECT_NAME.as_str());
    pub static ref LOCALE_ENV: String = format!("{}_LOCALE", PROJECT_NAME.as_str());
    pub static ref OUTPUT_DIR_ENV: String = format!("{}_OUTPUT_DIR", PROJECT_NAME.as_str());
    pub static ref NO_COLOR_ENV: String = format!("{}_NO_COLOR", PROJECT_NAME.as_str());
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "pt"];

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timeout: Duration,
    pub locale: String,
    pub output_dir: PathBuf,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            locale: DEFAULT_LOCALE.to_string(),
            output_dir: PathBuf::from("."),
            color: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup; unset or bad values keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(TIMEOUT_ENV.as_str()) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout = Duration::from_millis(ms),
                _ => warn!(value = %raw, "Ignoring invalid timeout, using default."),
            }
        }

        if let Some(raw) = lookup(LOCALE_ENV.as_str()) {
            let locale = raw.trim().to_lowercase();
            if SUPPORTED_LOCALES.contains(&locale.as_str()) {
                config.locale = locale;
            } else {
                warn!(value = %raw, "Unsupported locale, using default.");
            }
        }

        if let Some(dir) = lookup(OUTPUT_DIR_ENV.as_str()).filter(|d| !d.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        if lookup(NO_COLOR_ENV.as_str()).is_some() || lookup("NO_COLOR").is_some() {
            config.color = false;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn variable_names_use_the_crate_prefix() {
        assert_eq!(TIMEOUT_ENV.as_str(), "HEADER_INSPECTOR_TIMEOUT_MS");
        assert_eq!(LOG_ENV.as_str(), "HEADER_INSPECTOR_LOGLEVEL");
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("HEADER_INSPECTOR_TIMEOUT_MS", "1500"),
            ("HEADER_INSPECTOR_LOCALE", "PT"),
            ("HEADER_INSPECTOR_OUTPUT_DIR", "/tmp/reports"),
            ("NO_COLOR", "1"),
        ]);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.locale, "pt");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert!(!config.color);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("HEADER_INSPECTOR_TIMEOUT_MS", "0"),
            ("HEADER_INSPECTOR_LOCALE", "klingon"),
            ("HEADER_INSPECTOR_OUTPUT_DIR", "  "),
        ]);
        assert_eq!(config, Config::default());
        assert_eq!(config_from(&[("HEADER_INSPECTOR_TIMEOUT_MS", "soon")]).timeout, DEFAULT_TIMEOUT);
    }
}
