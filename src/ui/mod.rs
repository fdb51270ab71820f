//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Overview with the action button, counters, cards and chart
//! - [`sensor_card`]: One card per reading
//! - [`value_chart`]: Line chart of reading values
//! - [`prediction_chart`]: Static placeholder on the Predictions tab
//! - [`detail`]: Modal overlay with the full record of a reading
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (dashboard / prediction_chart)       │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod dashboard;
pub mod detail;
pub mod prediction_chart;
pub mod sensor_card;
pub mod theme;
pub mod value_chart;

pub use sensor_card::SensorCard;
pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 16;

/// Draw one full frame.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        app.action_area = None;
        return;
    }

    let [header, tabs, content, status] = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .areas(area);

    common::render_header(frame, app, header);
    common::render_tabs(frame, app, tabs);

    match app.current_view {
        View::Overview => dashboard::render(frame, app, content),
        View::Predictions => {
            app.action_area = None;
            prediction_chart::render(frame, &app.theme, content);
        }
    }

    common::render_status_bar(frame, app, status);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{seed_readings, Thresholds};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    fn app() -> App {
        App::new(seed_readings(Utc::now()), Thresholds::default(), Theme::dark())
    }

    #[test]
    fn test_overview_renders_counters_and_cards() {
        let mut app = app();
        let rendered = render_to_string(&mut app, 120, 40);

        assert!(rendered.contains("HydroGuard"));
        assert!(rendered.contains("Loading Model..."));
        assert!(rendered.contains("Active Sensors"));
        assert!(rendered.contains("Predicted Issues"));
        assert!(rendered.contains("Maintenance Tasks"));
        assert!(rendered.contains("North Plant"));
        assert!(rendered.contains("South Pipeline"));
        assert!(app.action_area.is_some());
    }

    #[test]
    fn test_predictions_tab_shows_placeholder() {
        let mut app = app();
        app.set_view(View::Predictions);
        let rendered = render_to_string(&mut app, 100, 30);

        assert!(rendered.contains("Prediction data visualization would go here"));
        assert!(app.action_area.is_none());
    }

    #[test]
    fn test_small_terminal_shows_notice() {
        let mut app = app();
        let rendered = render_to_string(&mut app, 40, 10);
        assert!(rendered.contains("Terminal too small"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = app();
        app.enter_detail();
        let rendered = render_to_string(&mut app, 120, 40);
        assert!(rendered.contains("Schedule inspection within 2 weeks"));

        app.go_back();
        app.toggle_help();
        let rendered = render_to_string(&mut app, 120, 40);
        assert!(rendered.contains("Keyboard Shortcuts"));
    }
}
