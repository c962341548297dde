//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pomodoro durations and whether sessions auto-continue
//! - GPA display precision
//! - Reminder sweep cadence
//! - Notification behavior
//! - Dashboard size
//!
//! Configuration is stored at `~/.config/studyroom/config.toml`.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::{TimerConfig, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};

/// Pomodoro settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes", deserialize_with = "minutes_or_work_default")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes", deserialize_with = "minutes_or_break_default")]
    pub break_minutes: u32,
    /// Start the next session right away when one completes.
    #[serde(default = "default_true")]
    pub auto_continue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradesConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_tasks")]
    pub recent_tasks: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyroom/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub grades: GradesConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// Default functions
fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES
}
fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}
fn default_true() -> bool {
    true
}
fn default_decimals() -> u32 {
    2
}
fn default_scan_interval() -> u64 {
    60
}
fn default_dismiss_after() -> u64 {
    5
}
fn default_recent_tasks() -> usize {
    3
}

/// Accepts integers, floats or numeric strings. Anything else, or a
/// non-positive value, becomes `fallback`.
fn lenient_minutes<'de, D>(deserializer: D, fallback: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let minutes = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => u32::try_from(n).ok(),
        Raw::Float(f) if f.is_finite() && f >= 1.0 => Some(f as u32),
        Raw::Text(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(minutes.filter(|m| *m > 0).unwrap_or(fallback))
}

fn minutes_or_work_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_minutes(d, DEFAULT_WORK_MINUTES)
}

fn minutes_or_break_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    lenient_minutes(d, DEFAULT_BREAK_MINUTES)
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            auto_continue: true,
        }
    }
}

impl Default for GradesConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dismiss_after_secs: default_dismiss_after(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_tasks: default_recent_tasks(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| {
                            invalid(format!("cannot parse '{value}' as a whole number"))
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("set the nested keys individually".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, in memory only. Returns an error if
    /// the key is unknown or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::from_minutes(
            self.timer.work_minutes,
            self.timer.break_minutes,
            self.timer.auto_continue,
        )
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("using default configuration: {e}");
                Self::default()
            }
        }
    }
}
