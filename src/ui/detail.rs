//! Detail overlay rendering.
//!
//! Displays a modal overlay with the full record of the selected reading,
//! including the recommended action the cards leave out.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::SensorReading;
use crate::ui::sensor_card::{format_value, status_icon};
use crate::ui::Theme;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 40;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Build the lines of the detail view for one reading.
pub fn detail_lines(reading: &SensorReading, theme: &Theme) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.muted);
    let strong = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<22}", name), label),
            Span::styled(value, strong),
        ])
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", reading.location), strong)]),
        Line::from(""),
        field("Sensor ID", reading.id.clone()),
        field("Type", reading.sensor_type.label().to_string()),
        field(
            "Value",
            format!("{} {}", format_value(reading.value), reading.sensor_type.unit()),
        ),
        field("Timestamp", reading.timestamp.to_rfc3339()),
        Line::from(vec![
            Span::styled(format!(" {:<22}", "Status"), label),
            Span::styled(
                format!("{} {}", status_icon(reading.status), reading.status.label()),
                theme.status_style(reading.status).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    match &reading.prediction {
        Some(prediction) => {
            lines.push(field(
                "Failure Probability",
                format!("{:.1}%", prediction.failure_probability * 100.0),
            ));
            lines.push(field(
                "Time to Failure",
                format!("{}h", format_value(prediction.estimated_time_to_failure)),
            ));
            lines.push(field("Recommended Action", prediction.recommended_action.clone()));
        }
        None => lines.push(Line::from(Span::styled(
            " No prediction available",
            Style::default().add_modifier(Modifier::DIM),
        ))),
    }

    lines
}

fn percent_of(length: u16, percent: u16) -> u16 {
    (u32::from(length) * u32::from(percent) / 100) as u16
}

/// Render the selected reading as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(reading) = app.selected_reading() else {
        return;
    };

    let overlay_width = percent_of(area.width, 80).clamp(MIN_OVERLAY_WIDTH, 80);
    let overlay_height = percent_of(area.height, 70).clamp(MIN_OVERLAY_HEIGHT, 18);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let [body, footer] =
        Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).areas(overlay_area);

    let block = Block::default()
        .title(" Sensor Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(detail_lines(reading, &app.theme))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, body);

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(hint, footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed_readings;
    use chrono::Utc;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_detail_shows_recommended_action() {
        let reading = &seed_readings(Utc::now())[1];
        let rendered = text(&detail_lines(reading, &Theme::dark()));

        assert!(rendered.contains("South Pipeline"));
        assert!(rendered.contains("Immediate inspection required"));
        assert!(rendered.contains("45.0%"));
        assert!(rendered.contains("72h"));
        assert!(rendered.contains("▲ Warning"));
    }

    #[test]
    fn test_detail_without_prediction() {
        let mut reading = seed_readings(Utc::now())[0].clone();
        reading.prediction = None;
        let rendered = text(&detail_lines(&reading, &Theme::dark()));

        assert!(rendered.contains("No prediction available"));
        assert!(!rendered.contains("Recommended Action"));
    }

    #[test]
    fn test_percent_of_wide_lengths() {
        assert_eq!(percent_of(100, 80), 80);
        assert_eq!(percent_of(1000, 80), 800);
        assert_eq!(percent_of(u16::MAX, 70), 45874);
    }

    #[test]
    fn test_overlay_on_very_wide_terminal() {
        use crate::data::Thresholds;
        use ratatui::{backend::TestBackend, Terminal};

        let app = App::new(seed_readings(Utc::now()), Thresholds::default(), Theme::dark());
        let mut terminal = Terminal::new(TestBackend::new(1000, 40)).unwrap();
        terminal.draw(|frame| render_overlay(frame, &app, frame.area())).unwrap();

        let rendered: String =
            terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("Sensor Detail"));
    }
}
