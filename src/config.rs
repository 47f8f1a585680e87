//! Runtime configuration: bridge program, device, output location.
//!
//! Resolution order, highest first: CLI flags, environment, defaults.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use std::path::PathBuf;

use crate::bridge::AdbBridge;

/// Bridge executable override.
pub const ADB_ENV: &str = "SMS_EXPORT_ADB";
/// Device serial, shared with adb itself.
pub const SERIAL_ENV: &str = "ANDROID_SERIAL";
/// Output directory override.
pub const OUTPUT_DIR_ENV: &str = "SMS_EXPORT_DIR";

pub const DEFAULT_ADB: &str = "adb";
pub const DEFAULT_FILENAME: &str = "sms_list.csv";
pub const DEFAULT_MAX_COUNT: usize = 1000;
pub const MAX_COUNT_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub adb: String,
    pub serial: Option<String>,
    pub output_dir: PathBuf,
    /// Used only when there is nothing to name the file after.
    pub default_filename: String,
    pub max_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb: DEFAULT_ADB.to_string(),
            serial: None,
            output_dir: PathBuf::from("."),
            default_filename: DEFAULT_FILENAME.to_string(),
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            adb: get(ADB_ENV).unwrap_or(defaults.adb),
            serial: get(SERIAL_ENV),
            output_dir: get(OUTPUT_DIR_ENV)
                .map(|dir| expand_dir(&dir))
                .unwrap_or(defaults.output_dir),
            ..defaults
        }
    }

    /// Apply CLI overrides on top of this config.
    pub fn with_overrides(
        mut self,
        adb: Option<String>,
        serial: Option<String>,
        output_dir: Option<String>,
        default_filename: Option<String>,
    ) -> Self {
        if let Some(adb) = adb {
            self.adb = adb;
        }
        if serial.is_some() {
            self.serial = serial;
        }
        if let Some(dir) = output_dir {
            self.output_dir = expand_dir(&dir);
        }
        if let Some(name) = default_filename {
            self.default_filename = name;
        }
        self
    }

    pub fn bridge(&self) -> AdbBridge {
        AdbBridge::new(self.adb.clone(), self.serial.clone())
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.adb, "adb");
        assert_eq!(config.default_filename, "sms_list.csv");
        assert_eq!(config.max_count, 1000);
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            (ADB_ENV, "/opt/platform-tools/adb"),
            (SERIAL_ENV, "R58M123ABC"),
            (OUTPUT_DIR_ENV, "/tmp/sms"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.adb, "/opt/platform-tools/adb");
        assert_eq!(config.serial.as_deref(), Some("R58M123ABC"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/sms"));
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = Config::from_lookup(|key| (key == SERIAL_ENV).then(|| "  ".to_string()));
        assert_eq!(config.serial, None);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = Config::from_lookup(|key| (key == ADB_ENV).then(|| "/env/adb".to_string()))
            .with_overrides(
                Some("/cli/adb".to_string()),
                None,
                Some("out".to_string()),
                Some("fallback.csv".to_string()),
            );
        assert_eq!(config.adb, "/cli/adb");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.default_filename, "fallback.csv");
    }
}
