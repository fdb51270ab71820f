//! Value history for card sparklines.

use std::collections::{HashMap, VecDeque};

use super::reading::SensorReading;

/// Maximum number of values kept per sensor.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks the values each sensor has shown over the session.
///
/// A value is recorded when readings are seeded and after every applied
/// recomputation, keyed by sensor id.
#[derive(Debug, Clone, Default)]
pub struct History {
    values: HashMap<String, VecDeque<f64>>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current value of every reading.
    pub fn record(&mut self, readings: &[SensorReading]) {
        for reading in readings {
            let values = self.values.entry(reading.id.clone()).or_default();
            values.push_back(reading.value);
            if values.len() > MAX_HISTORY_SIZE {
                values.pop_front();
            }
        }
    }

    /// Number of values recorded for a sensor.
    pub fn len(&self, id: &str) -> usize {
        self.values.get(id).map_or(0, VecDeque::len)
    }

    /// Sparkline levels (0-7) for a sensor.
    ///
    /// Returns an empty Vec until at least two values are recorded.
    pub fn sparkline(&self, id: &str) -> Vec<u8> {
        let Some(values) = self.values.get(id) else {
            return Vec::new();
        };
        if values.len() < 2 {
            return Vec::new();
        }

        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let range = if max > min { max - min } else { 1.0 };

        values
            .iter()
            .map(|&v| {
                if !v.is_finite() {
                    return 0;
                }
                let normalized = ((v - min) / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }
}
