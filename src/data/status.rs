//! Status classification of model output.

use serde::Deserialize;

use super::reading::SensorStatus;

/// Thresholds for classifying a predicted value.
///
/// A value strictly above `critical` is critical, strictly above `warning`
/// is a warning, anything else is normal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 50.0,
            critical: 80.0,
        }
    }
}

impl Thresholds {
    /// Classify a predicted value.
    ///
    /// NaN fails both comparisons and classifies as normal.
    pub fn classify(&self, predicted: f64) -> SensorStatus {
        if predicted > self.critical {
            SensorStatus::Critical
        } else if predicted > self.warning {
            SensorStatus::Warning
        } else {
            SensorStatus::Normal
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
