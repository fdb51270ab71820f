//! Application state and user actions.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use ratatui::layout::Rect;

use crate::data::{History, SensorReading, Summary, Thresholds};
use crate::model::{build_model, process_readings, ModelSettings, ModelState, Pending, Predictor};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Counters, sensor cards and the value chart.
    Overview,
    /// Placeholder for richer prediction visualizations.
    Predictions,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Predictions,
            View::Predictions => View::Overview,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Predictions => "Predictions",
        }
    }
}

/// What the action button currently offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    /// The model is ready and nothing is running.
    Ready,
    /// The model hasn't finished building.
    Loading,
    /// A recomputation is in flight.
    Processing,
    /// The model could not be built.
    Unavailable(String),
}

impl ActionState {
    pub fn label(&self) -> String {
        match self {
            ActionState::Ready => "Process Data in ML model".to_string(),
            ActionState::Loading => "Loading Model...".to_string(),
            ActionState::Processing => "Processing...".to_string(),
            ActionState::Unavailable(reason) => format!("Model unavailable: {}", reason),
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(self, ActionState::Ready)
    }
}

/// Main application state.
///
/// Owns the sensor readings and the model; renderers only ever borrow them.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data
    readings: Vec<SensorReading>,
    pub history: History,
    pub thresholds: Thresholds,
    pub maintenance_tasks: u32,

    // Model
    model: ModelState,
    pending_model: Option<Pending<Arc<dyn Predictor>>>,
    pending_readings: Option<Pending<Vec<SensorReading>>>,

    // Navigation state
    pub selected_index: usize,

    // UI
    pub theme: Theme,
    /// Where the action button was last drawn, for mouse hit-testing.
    pub action_area: Option<Rect>,
    pub last_updated: Instant,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App showing the given readings.
    pub fn new(readings: Vec<SensorReading>, thresholds: Thresholds, theme: Theme) -> Self {
        let mut history = History::new();
        history.record(&readings);

        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            readings,
            history,
            thresholds,
            maintenance_tasks: crate::data::DEFAULT_MAINTENANCE_TASKS,
            model: ModelState::Uninitialized,
            pending_model: None,
            pending_readings: None,
            selected_index: 0,
            theme,
            action_area: None,
            last_updated: Instant::now(),
            status_message: None,
        }
    }

    /// The current readings.
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    /// The model lifecycle state.
    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    /// Counters for the summary tiles, computed from the current readings.
    pub fn summary(&self) -> Summary {
        Summary::from_readings(&self.readings, self.maintenance_tasks)
    }

    /// True until the model is ready.
    pub fn loading(&self) -> bool {
        !self.model.is_ready()
    }

    /// True while a recomputation is in flight.
    pub fn processing(&self) -> bool {
        self.pending_readings.is_some()
    }

    /// What the action button offers right now.
    pub fn action_state(&self) -> ActionState {
        match &self.model {
            ModelState::Failed(reason) => ActionState::Unavailable(reason.clone()),
            ModelState::Ready(_) if self.processing() => ActionState::Processing,
            ModelState::Ready(_) => ActionState::Ready,
            ModelState::Uninitialized | ModelState::Loading => ActionState::Loading,
        }
    }

    /// Start building the model in the background.
    ///
    /// Runs once; later calls are ignored. Must be called within a tokio runtime.
    pub fn start_model(&mut self, settings: ModelSettings) {
        if !matches!(self.model, ModelState::Uninitialized) {
            return;
        }
        tracing::info!("starting model construction");
        self.model = ModelState::Loading;
        self.pending_model = Some(Pending::spawn(async move {
            let model = build_model(settings).await?;
            Ok::<_, crate::model::ModelError>(Arc::new(model) as Arc<dyn Predictor>)
        }));
    }

    /// Use an already-built model, skipping background construction.
    pub fn set_model(&mut self, model: Arc<dyn Predictor>) {
        self.pending_model = None;
        self.model = ModelState::Ready(model);
    }

    /// Recompute every reading through the model.
    ///
    /// Returns `true` if a recomputation was started. Does nothing while the
    /// model is loading or failed, and ignores the trigger while a previous
    /// recomputation is still in flight.
    pub fn process_sensor_data(&mut self) -> bool {
        let Some(model) = self.model.model().cloned() else {
            return false;
        };
        if self.processing() {
            self.set_status_message("Processing already in progress".to_string());
            return false;
        }

        tracing::info!(readings = self.readings.len(), "processing sensor data");
        let readings = self.readings.clone();
        let thresholds = self.thresholds;
        self.pending_readings = Some(Pending::spawn(async move {
            process_readings(model.as_ref(), readings, thresholds).await
        }));
        true
    }

    /// Apply any finished background work without blocking.
    ///
    /// Returns `true` if state changed.
    pub fn poll_updates(&mut self) -> bool {
        let mut changed = false;

        if let Some(result) = self.pending_model.as_mut().and_then(Pending::try_take) {
            self.pending_model = None;
            self.apply_model(result);
            changed = true;
        }

        if let Some(result) = self.pending_readings.as_mut().and_then(Pending::try_take) {
            self.pending_readings = None;
            self.apply_readings(result);
            changed = true;
        }

        changed
    }

    /// Wait for all background work to finish and apply it.
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending_model.take() {
            let result = pending.wait().await;
            self.apply_model(result);
        }
        if let Some(pending) = self.pending_readings.take() {
            let result = pending.wait().await;
            self.apply_readings(result);
        }
    }

    fn apply_model(&mut self, result: Result<Arc<dyn Predictor>, crate::model::ModelError>) {
        match result {
            Ok(model) => {
                self.model = ModelState::Ready(model);
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading model");
                self.model = ModelState::Failed(e.to_string());
            }
        }
    }

    fn apply_readings(&mut self, result: Result<Vec<SensorReading>, crate::model::ModelError>) {
        match result {
            Ok(readings) => {
                tracing::info!(
                    issues = Summary::from_readings(&readings, self.maintenance_tasks)
                        .predicted_issues,
                    "sensor data processed"
                );
                self.history.record(&readings);
                self.readings = readings;
                self.last_updated = Instant::now();
                self.clamp_selection();
            }
            Err(e) => {
                tracing::error!(error = %e, "error processing sensor data");
                self.set_status_message(format!("Processing failed: {}", e));
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.readings.len() {
            self.selected_index = self.readings.len().saturating_sub(1);
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// The reading under the selection cursor.
    pub fn selected_reading(&self) -> Option<&SensorReading> {
        self.readings.get(self.selected_index)
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one card.
    pub fn select_next(&mut self) {
        let max = self.readings.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max);
    }

    /// Move selection up by one card.
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Jump to the first card.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last card.
    pub fn select_last(&mut self) {
        self.selected_index = self.readings.len().saturating_sub(1);
    }

    /// Open the detail overlay for the selected reading.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Overview && !self.readings.is_empty() {
            self.show_detail_overlay = true;
        }
    }

    /// Close overlays, or return to the overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else {
            self.current_view = View::Overview;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Whether a screen position falls on the action button.
    pub fn hits_action(&self, column: u16, row: u16) -> bool {
        self.action_area.is_some_and(|area| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        })
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current readings and counters to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        export_readings(&self.readings, self.maintenance_tasks, path)
    }
}

/// Write readings and their summary counters as pretty JSON.
pub fn export_readings(readings: &[SensorReading], maintenance_tasks: u32, path: &Path) -> Result<()> {
    use std::io::Write;

    let summary = Summary::from_readings(readings, maintenance_tasks);
    let export = serde_json::json!({
        "exportedAt": Utc::now(),
        "summary": {
            "activeSensors": summary.active_sensors,
            "predictedIssues": summary.predicted_issues,
            "maintenanceTasks": summary.maintenance_tasks,
        },
        "readings": readings,
    });

    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!(path = %path.display(), "exported readings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{seed_readings, SensorStatus};
    use crate::model::LinearModel;

    fn app() -> App {
        App::new(seed_readings(Utc::now()), Thresholds::default(), Theme::dark())
    }

    fn identity() -> ModelSettings {
        ModelSettings {
            weight: Some(1.0),
            bias: Some(0.0),
        }
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert!(app.loading());
        assert_eq!(app.action_state(), ActionState::Loading);
        assert_eq!(app.action_state().label(), "Loading Model...");
        assert_eq!(app.readings()[0].status, SensorStatus::Normal);
        assert_eq!(app.readings()[1].status, SensorStatus::Warning);
    }

    #[test]
    fn test_processing_while_loading_is_noop() {
        let mut app = app();
        let before = app.readings().to_vec();

        assert!(!app.process_sensor_data());
        assert!(!app.processing());
        assert!(!app.poll_updates());
        assert_eq!(app.readings(), before.as_slice());
    }

    #[tokio::test]
    async fn test_model_lifecycle_reaches_ready() {
        let mut app = app();
        app.start_model(identity());
        assert!(matches!(app.model_state(), ModelState::Loading));
        assert!(app.loading());

        app.settle().await;
        assert!(!app.loading());
        assert_eq!(app.action_state().label(), "Process Data in ML model");
    }

    #[tokio::test]
    async fn test_start_model_runs_once() {
        let mut app = app();
        app.start_model(identity());
        app.settle().await;

        app.start_model(ModelSettings {
            weight: Some(f64::NAN),
            bias: None,
        });
        assert!(app.model_state().is_ready());
    }

    #[tokio::test]
    async fn test_model_failure_is_observable() {
        let mut app = app();
        app.start_model(ModelSettings {
            weight: Some(f64::INFINITY),
            bias: None,
        });
        app.settle().await;

        assert!(app.loading());
        assert!(matches!(app.model_state(), ModelState::Failed(_)));
        let state = app.action_state();
        assert!(!state.enabled());
        assert!(state.label().starts_with("Model unavailable"));

        let before = app.readings().to_vec();
        assert!(!app.process_sensor_data());
        assert_eq!(app.readings(), before.as_slice());
    }

    #[tokio::test]
    async fn test_end_to_end_identity_model() {
        let mut app = app();
        app.start_model(identity());
        app.settle().await;

        assert!(app.process_sensor_data());
        assert_eq!(app.action_state(), ActionState::Processing);
        app.settle().await;

        let readings = app.readings();
        assert_eq!(readings[0].value, 45.2);
        assert_eq!(readings[0].status, SensorStatus::Normal);
        assert_eq!(readings[1].value, 120.5);
        assert_eq!(readings[1].status, SensorStatus::Critical);
        assert_eq!(app.summary().predicted_issues, 1);
        assert_eq!(app.history.len("1"), 2);
    }

    #[tokio::test]
    async fn test_overlapping_trigger_is_ignored() {
        let mut app = app();
        app.set_model(Arc::new(LinearModel::new(0.0, 60.0).unwrap()));

        assert!(app.process_sensor_data());
        assert!(!app.process_sensor_data());
        assert_eq!(app.get_status_message(), Some("Processing already in progress"));

        app.settle().await;
        assert!(!app.processing());
        assert!(app.readings().iter().all(|r| r.status == SensorStatus::Warning));
        assert_eq!(app.summary().predicted_issues, 2);
        // Only one pass was applied
        assert_eq!(app.history.len("1"), 2);
    }

    #[tokio::test]
    async fn test_stale_prediction_survives_recomputation() {
        let mut app = app();
        app.set_model(Arc::new(LinearModel::new(0.0, 95.0).unwrap()));

        app.process_sensor_data();
        app.settle().await;

        let reading = &app.readings()[0];
        assert_eq!(reading.status, SensorStatus::Critical);
        assert_eq!(reading.prediction.as_ref().unwrap().failure_probability, 0.12);
    }

    #[tokio::test]
    async fn test_inference_failure_keeps_readings() {
        let mut app = app();
        app.set_model(Arc::new(LinearModel::new(f64::MAX, f64::MAX).unwrap()));
        let before = app.readings().to_vec();

        app.process_sensor_data();
        app.settle().await;

        assert_eq!(app.readings(), before.as_slice());
        assert!(app.get_status_message().unwrap().starts_with("Processing failed"));
        assert_eq!(app.action_state(), ActionState::Ready);
    }

    #[tokio::test]
    async fn test_poll_updates_applies_results() {
        let mut app = app();
        app.start_model(identity());

        let mut ready = false;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            app.poll_updates();
            if app.model_state().is_ready() {
                ready = true;
                break;
            }
        }
        assert!(ready);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index, 1);
        app.select_prev();
        app.select_prev();
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_reading().unwrap().id, "2");

    }

    #[test]
    fn test_applied_readings_clamp_selection() {
        let mut app = app();
        app.select_last();
        assert_eq!(app.selected_index, 1);

        app.apply_readings(Ok(seed_readings(Utc::now())[..1].to_vec()));
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.readings().len(), 1);
        assert_eq!(app.history.len("1"), 2);
    }

    #[test]
    fn test_go_back_closes_overlay_first() {
        let mut app = app();
        app.set_view(View::Overview);
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);

        app.next_view();
        assert_eq!(app.current_view, View::Predictions);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_action_hit_testing() {
        let mut app = app();
        assert!(!app.hits_action(5, 5));

        app.action_area = Some(Rect::new(10, 3, 30, 3));
        assert!(app.hits_action(10, 3));
        assert!(app.hits_action(39, 5));
        assert!(!app.hits_action(40, 5));
        assert!(!app.hits_action(20, 6));
    }

    #[test]
    fn test_export_state() {
        let app = app();
        let file = tempfile::NamedTempFile::new().unwrap();

        app.export_state(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["activeSensors"], 2);
        assert_eq!(value["summary"]["predictedIssues"], 1);
        assert_eq!(value["summary"]["maintenanceTasks"], 8);
        assert_eq!(value["readings"][0]["location"], "North Plant");
        assert_eq!(value["readings"][1]["prediction"]["failureProbability"], 0.45);
    }
}
