//! # hydroguard
//!
//! A terminal dashboard for water-infrastructure sensor readings.
//!
//! The dashboard shows a small set of mock readings as cards and a line
//! chart, and can run them through a single-neuron regression stub to
//! re-derive each reading's value and status. There is no real ingestion
//! or training; the model is a placeholder with untrained weights unless
//! weights are configured.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (shapes) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  model  │◀── build once in background, recompute on demand│
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: The single owner of readings and model state; user actions
//! - **[`data`]**: Reading shapes, seed data, status thresholds, counters, history
//! - **[`model`]**: The [`Predictor`] seam, the linear stub and the recomputation pass
//! - **[`ui`]**: Terminal rendering using ratatui: cards, counters, chart, overlays
//! - **[`config`]**: Layered settings from defaults, a TOML file and the environment
//!
//! ## Usage
//!
//! ```bash
//! # Built-in sample readings, untrained model
//! hydroguard
//!
//! # Deterministic model and custom readings
//! hydroguard --weight 1 --bias 0 --data readings.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use chrono::Utc;
//! use hydroguard::{seed_readings, App, LinearModel, Theme, Thresholds};
//!
//! # tokio_test::block_on(async {
//! let mut app = App::new(seed_readings(Utc::now()), Thresholds::default(), Theme::dark());
//! app.set_model(Arc::new(LinearModel::new(1.0, 0.0).unwrap()));
//!
//! app.process_sensor_data();
//! app.settle().await;
//! assert_eq!(app.readings()[0].value, 45.2);
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod model;
pub mod ui;

// Re-export main types for convenience
pub use app::{ActionState, App, View};
pub use config::Settings;
pub use data::{
    load_readings, seed_readings, MaintenanceRecord, Prediction, SensorReading, SensorStatus,
    SensorType, Summary, Thresholds,
};
pub use model::{LinearModel, ModelError, ModelSettings, ModelState, Predictor};
pub use ui::Theme;
