//! Dashboard counters.

use super::reading::{SensorReading, SensorStatus};

/// Number of maintenance tasks shown when the config doesn't override it.
pub const DEFAULT_MAINTENANCE_TASKS: u32 = 8;

/// Counters shown in the summary tiles.
///
/// Recomputed from the readings on every render, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub active_sensors: usize,
    pub predicted_issues: usize,
    pub maintenance_tasks: u32,
}

impl Summary {
    pub fn from_readings(readings: &[SensorReading], maintenance_tasks: u32) -> Self {
        Self {
            active_sensors: readings.len(),
            predicted_issues: readings.iter().filter(|r| r.status != SensorStatus::Normal).count(),
            maintenance_tasks,
        }
    }
}

/// Count readings by status as `(normal, warning, critical)`.
pub fn status_counts(readings: &[SensorReading]) -> (usize, usize, usize) {
    readings.iter().fold((0, 0, 0), |(n, w, c), r| match r.status {
        SensorStatus::Normal => (n + 1, w, c),
        SensorStatus::Warning => (n, w + 1, c),
        SensorStatus::Critical => (n, w, c + 1),
    })
}
