//! Layered dashboard configuration.
//!
//! Values are resolved from built-in defaults, then an optional TOML file,
//! then `HYDROGUARD_*` environment variables (`__` separates sections):
//!
//! ```toml
//! [model]
//! weight = 1.0
//! bias = 0.0
//!
//! [thresholds]
//! warning = 50.0
//! critical = 80.0
//!
//! [dashboard]
//! maintenance_tasks = 8
//! tick_ms = 100
//! theme = "auto"
//! ```
//!
//! ```bash
//! HYDROGUARD_MODEL__WEIGHT=1 hydroguard
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::{Thresholds, DEFAULT_MAINTENANCE_TASKS};
use crate::model::ModelSettings;

/// Which color theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Settings for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSettings {
    /// Value shown in the "Maintenance Tasks" tile.
    pub maintenance_tasks: u32,
    /// How long the UI loop waits for input before redrawing.
    pub tick_ms: u64,
    pub theme: ThemeChoice,
}

/// Complete resolved configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub model: ModelSettings,
    pub thresholds: Thresholds,
    pub dashboard: DashboardSettings,
}

impl Settings {
    /// Load settings, reading `path` if it exists.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("HYDROGUARD").prefix_separator("_").separator("__"),
            );
        Self::finish(builder)
    }

    /// Parse settings from a TOML string layered over the defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(content, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let thresholds = Thresholds::default();
        Ok(Config::builder()
            .set_default("thresholds.warning", thresholds.warning)?
            .set_default("thresholds.critical", thresholds.critical)?
            .set_default("dashboard.maintenance_tasks", i64::from(DEFAULT_MAINTENANCE_TASKS))?
            .set_default("dashboard.tick_ms", 100_i64)?
            .set_default("dashboard.theme", "auto")?)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        if settings.thresholds.warning > settings.thresholds.critical {
            anyhow::bail!(
                "warning threshold {} is above critical threshold {}",
                settings.thresholds.warning,
                settings.thresholds.critical
            );
        }
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            thresholds: Thresholds::default(),
            dashboard: DashboardSettings {
                maintenance_tasks: DEFAULT_MAINTENANCE_TASKS,
                tick_ms: 100,
                theme: ThemeChoice::Auto,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_default_impl() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.thresholds.warning, 50.0);
        assert_eq!(settings.thresholds.critical, 80.0);
        assert_eq!(settings.dashboard.maintenance_tasks, 8);
        assert!(settings.model.weight.is_none());
    }

    #[test]
    fn test_toml_overrides() {
        let settings = Settings::from_toml(
            r#"
            [model]
            weight = 1.0
            bias = 0.0

            [thresholds]
            critical = 90.0

            [dashboard]
            maintenance_tasks = 3
            theme = "light"
            "#,
        )
        .unwrap();

        assert_eq!(settings.model.weight, Some(1.0));
        assert_eq!(settings.model.bias, Some(0.0));
        assert_eq!(settings.thresholds.warning, 50.0);
        assert_eq!(settings.thresholds.critical, 90.0);
        assert_eq!(settings.dashboard.maintenance_tasks, 3);
        assert_eq!(settings.dashboard.theme, ThemeChoice::Light);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = Settings::from_toml(
            r#"
            [thresholds]
            warning = 90.0
            critical = 10.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("above critical"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/hydroguard.toml")).unwrap();
        assert_eq!(settings.dashboard.tick_ms, 100);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[dashboard]\nmaintenance_tasks = 12").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.dashboard.maintenance_tasks, 12);
    }
}
