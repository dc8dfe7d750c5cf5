use crate::alerts::view::SortKey;
use crate::alerts::metrics::KpiMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Show toast notifications.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Seconds before the oldest toast is dropped.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Maximum number of toasts kept on screen.
    #[serde(default = "default_toast_limit")]
    pub toast_limit: usize,
    /// Append every toast to this file. `None` disables the toast log.
    #[serde(default)]
    pub toast_log: Option<String>,
    /// Delay between sync simulation steps in milliseconds.
    #[serde(default = "default_sync_step_ms")]
    pub sync_step_ms: u64,
    /// Delay between connect wizard steps in milliseconds.
    #[serde(default = "default_connect_step_ms")]
    pub connect_step_ms: u64,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default)]
    pub kpi_mode: KpiMode,
    /// Start with the three demo alerts.
    #[serde(default = "default_seed_demo")]
    pub seed_demo_alerts: bool,
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.2
}

fn default_toast_limit() -> usize {
    4
}

fn default_sync_step_ms() -> u64 {
    320
}

fn default_connect_step_ms() -> u64 {
    420
}

fn default_seed_demo() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            toast_limit: default_toast_limit(),
            toast_log: None,
            sync_step_ms: default_sync_step_ms(),
            connect_step_ms: default_connect_step_ms(),
            default_sort: SortKey::default(),
            kpi_mode: KpiMode::default(),
            seed_demo_alerts: default_seed_demo(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn toast_timeout(&self) -> Duration {
        if self.toast_duration.is_finite() && self.toast_duration > 0.0 {
            Duration::from_secs_f32(self.toast_duration)
        } else {
            tracing::warn!(
                "toast_duration {} is invalid; using {}",
                self.toast_duration,
                default_toast_duration()
            );
            Duration::from_secs_f32(default_toast_duration())
        }
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_step_ms)
    }

    pub fn connect_interval(&self) -> Duration {
        Duration::from_millis(self.connect_step_ms)
    }
}
