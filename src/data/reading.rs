//! Sensor reading and maintenance record shapes.
//!
//! These types match the JSON shape the dashboard's mock data is written
//! in, so seed files can be authored by hand and exports read back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of measurement a sensor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Pressure,
    Flow,
    Quality,
}

impl SensorType {
    /// Returns the display label for this sensor type.
    pub fn label(&self) -> &'static str {
        match self {
            SensorType::Pressure => "pressure",
            SensorType::Flow => "flow",
            SensorType::Quality => "quality",
        }
    }

    /// Unit the reading's value is implied to be in.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorType::Pressure => "psi",
            SensorType::Flow => "L/s",
            SensorType::Quality => "NTU",
        }
    }
}

/// Status of a sensor, derived from the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
}

impl SensorStatus {
    /// Returns the full label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            SensorStatus::Normal => "Normal",
            SensorStatus::Warning => "Warning",
            SensorStatus::Critical => "Critical",
        }
    }
}

/// Advisory failure estimate attached to a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Likelihood of failure, expected in `[0, 1]`.
    pub failure_probability: f64,
    /// Hours until the estimated failure.
    pub estimated_time_to_failure: f64,
    /// Free-text advice for operators.
    pub recommended_action: String,
}

impl Prediction {
    /// Whether the probability is in `[0, 1]` and the time to failure is non-negative.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.failure_probability) && self.estimated_time_to_failure >= 0.0
    }
}

/// One timestamped measurement from a monitored asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: String,
    pub location: String,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub status: SensorStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
}

/// Whether a maintenance event was planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Scheduled,
    Emergency,
}

/// Progress of a maintenance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
}

/// Asset maintenance event. Declared for data files; the dashboard does not render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub asset_id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub status: MaintenanceStatus,
    pub technician: String,
}

/// The two built-in sample readings, stamped with `now`.
pub fn seed_readings(now: DateTime<Utc>) -> Vec<SensorReading> {
    vec![
        SensorReading {
            id: "1".to_string(),
            location: "North Plant".to_string(),
            sensor_type: SensorType::Pressure,
            value: 45.2,
            timestamp: now,
            status: SensorStatus::Normal,
            prediction: Some(Prediction {
                failure_probability: 0.12,
                estimated_time_to_failure: 168.0,
                recommended_action: "Schedule inspection within 2 weeks".to_string(),
            }),
        },
        SensorReading {
            id: "2".to_string(),
            location: "South Pipeline".to_string(),
            sensor_type: SensorType::Flow,
            value: 120.5,
            timestamp: now,
            status: SensorStatus::Warning,
            prediction: Some(Prediction {
                failure_probability: 0.45,
                estimated_time_to_failure: 72.0,
                recommended_action: "Immediate inspection required".to_string(),
            }),
        },
    ]
}

/// Load readings from a JSON array file.
///
/// Predictions outside their documented ranges are kept but logged.
pub fn load_readings(path: &Path) -> Result<Vec<SensorReading>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read readings from {}", path.display()))?;
    let readings: Vec<SensorReading> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse readings in {}", path.display()))?;

    for reading in &readings {
        if let Some(prediction) = reading.prediction.as_ref().filter(|p| !p.is_valid()) {
            tracing::warn!(
                id = %reading.id,
                probability = prediction.failure_probability,
                hours = prediction.estimated_time_to_failure,
                "prediction out of range"
            );
        }
    }

    Ok(readings)
}
