//! Data models for the dashboard.
//!
//! ## Submodules
//!
//! - [`reading`]: Sensor readings, predictions, maintenance records and the seed data
//! - [`status`]: Threshold classification of model output ([`Thresholds`])
//! - [`summary`]: Counters shown in the summary tiles ([`Summary`])
//! - [`history`]: Per-sensor value history for sparklines
//!
//! ## Data Flow
//!
//! ```text
//! seed_readings() / load_readings()
//!        │
//!        ▼
//! App (owns Vec<SensorReading>)
//!        │
//!        ├──▶ model::process_readings() ──▶ Thresholds::classify() + round2()
//!        │
//!        ├──▶ Summary::from_readings() (every frame)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod history;
pub mod reading;
pub mod status;
pub mod summary;

pub use history::History;
pub use reading::{
    load_readings, seed_readings, MaintenanceRecord, MaintenanceStatus, MaintenanceType,
    Prediction, SensorReading, SensorStatus, SensorType,
};
pub use status::{round2, Thresholds};
pub use summary::{status_counts, Summary, DEFAULT_MAINTENANCE_TASKS};
