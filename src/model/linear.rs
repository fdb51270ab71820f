//! Single-input single-output linear model.

use std::fmt;

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;

use super::error::ModelError;
use super::Predictor;

/// Parameters for building the model.
///
/// Unset parameters fall back to untrained initialization: a
/// Glorot-uniform weight and a zero bias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ModelSettings {
    pub weight: Option<f64>,
    pub bias: Option<f64>,
}

/// A one-unit dense layer: `output = weight * input + bias`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    weight: f64,
    bias: f64,
}

impl LinearModel {
    /// Create a model with fixed parameters.
    pub fn new(weight: f64, bias: f64) -> Result<Self, ModelError> {
        check_finite("weight", weight)?;
        check_finite("bias", bias)?;
        Ok(Self { weight, bias })
    }

    /// Create a model from settings, drawing untrained values for anything unset.
    pub fn from_settings(settings: ModelSettings) -> Result<Self, ModelError> {
        let weight = match settings.weight {
            Some(w) => w,
            None => glorot_uniform(1, 1),
        };
        Self::new(weight, settings.bias.unwrap_or(0.0))
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn apply(&self, input: f64) -> f64 {
        self.weight * input + self.bias
    }
}

impl fmt::Display for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dense(1→1) w={:.4} b={:.4}", self.weight, self.bias)
    }
}

#[async_trait]
impl Predictor for LinearModel {
    async fn predict(&self, input: f64) -> Result<f64, ModelError> {
        let output = self.apply(input);
        if output.is_finite() {
            Ok(output)
        } else {
            Err(ModelError::NonFiniteOutput { input })
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Build the model as the dashboard's startup task does.
pub async fn build_model(settings: ModelSettings) -> Result<LinearModel, ModelError> {
    tracing::debug!(?settings, "building linear model");
    let model = LinearModel::from_settings(settings)?;
    tracing::info!(weight = model.weight, bias = model.bias, "model ready");
    Ok(model)
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, value })
    }
}

/// Draw from `U(-limit, limit)` with `limit = sqrt(6 / (fan_in + fan_out))`.
fn glorot_uniform(fan_in: usize, fan_out: usize) -> f64 {
    let limit = (6.0 / (fan_in + fan_out) as f64).sqrt();
    rand::thread_rng().gen_range(-limit..limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity_model() {
        let model = LinearModel::new(1.0, 0.0).unwrap();
        assert_eq!(model.predict(45.2).await.unwrap(), 45.2);
    }

    #[tokio::test]
    async fn test_affine_model() {
        let model = LinearModel::new(2.0, -10.0).unwrap();
        assert_eq!(model.predict(30.0).await.unwrap(), 50.0);
    }

    #[tokio::test]
    async fn test_non_finite_output() {
        let model = LinearModel::new(f64::MAX, 0.0).unwrap();
        let err = model.predict(10.0).await.unwrap_err();
        assert_eq!(err, ModelError::NonFiniteOutput { input: 10.0 });
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        let err = LinearModel::new(f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "weight", .. }));

        let err = LinearModel::new(1.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "bias", .. }));
    }

    #[test]
    fn test_untrained_weight_within_glorot_limit() {
        let limit = 3.0_f64.sqrt();
        for _ in 0..100 {
            let model = LinearModel::from_settings(ModelSettings::default()).unwrap();
            assert!(model.weight().abs() <= limit);
            assert_eq!(model.bias(), 0.0);
        }
    }

    #[test]
    fn test_settings_override_initialization() {
        let settings = ModelSettings {
            weight: Some(0.5),
            bias: Some(3.0),
        };
        let model = LinearModel::from_settings(settings).unwrap();
        assert_eq!(model.weight(), 0.5);
        assert_eq!(model.bias(), 3.0);
    }

    #[tokio::test]
    async fn test_build_model_reports_invalid_parameter() {
        let settings = ModelSettings {
            weight: Some(f64::NAN),
            bias: None,
        };
        assert!(build_model(settings).await.is_err());
    }
}
