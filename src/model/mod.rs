//! Predictive model stub and the recomputation pass.
//!
//! The model is a single dense unit with untrained (or configured)
//! parameters. It is built once in the background when the dashboard
//! starts and then used to recompute every reading on demand.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──start──▶ Loading ──ok──▶ Ready(model)
//!                              │
//!                              └──err──▶ Failed(reason)
//! ```

mod error;
mod linear;
mod task;

pub use error::ModelError;
pub use linear::{build_model, LinearModel, ModelSettings};
pub use task::Pending;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;

use crate::data::{round2, SensorReading, Thresholds};

/// Anything that maps one scalar reading to one predicted scalar.
#[async_trait]
pub trait Predictor: Send + Sync + Debug {
    /// Run inference on a single value.
    async fn predict(&self, input: f64) -> Result<f64, ModelError>;

    /// Short human-readable description, shown in the header.
    fn describe(&self) -> String;
}

/// Where the dashboard's model is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum ModelState {
    /// Construction has not been requested.
    #[default]
    Uninitialized,
    /// Construction is running in the background.
    Loading,
    /// The model is available for recomputation.
    Ready(Arc<dyn Predictor>),
    /// Construction failed; no retry is attempted.
    Failed(String),
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    /// The model handle, if ready.
    pub fn model(&self) -> Option<&Arc<dyn Predictor>> {
        match self {
            ModelState::Ready(model) => Some(model),
            _ => None,
        }
    }

    /// Returns the display label for this state.
    pub fn label(&self) -> String {
        match self {
            ModelState::Uninitialized => "not started".to_string(),
            ModelState::Loading => "loading".to_string(),
            ModelState::Ready(model) => model.describe(),
            ModelState::Failed(reason) => format!("failed: {}", reason),
        }
    }
}

/// Run every reading through the model.
///
/// Each reading's `value` becomes the prediction rounded to two decimals
/// and its `status` is reclassified from the unrounded prediction. The
/// `prediction` sub-record is left as it was, so its failure probability
/// can disagree with the new status.
pub async fn process_readings<P>(
    model: &P,
    readings: Vec<SensorReading>,
    thresholds: Thresholds,
) -> Result<Vec<SensorReading>, ModelError>
where
    P: Predictor + ?Sized,
{
    let updates = readings.into_iter().map(|reading| async move {
        let predicted = model.predict(reading.value).await?;
        Ok::<_, ModelError>(SensorReading {
            value: round2(predicted),
            status: thresholds.classify(predicted),
            ..reading
        })
    });

    try_join_all(updates).await
}
