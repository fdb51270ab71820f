//! Sensor card rendering.
//!
//! A card shows one reading: where it is, what it measures, its current
//! value and, when a prediction is attached, the failure estimate. Normal
//! readings get a check mark; warning and critical share an alert marker
//! and differ only in color.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::data::{SensorReading, SensorStatus};
use crate::ui::Theme;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Height of a card with a prediction and trend line, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Marker shown next to the location for a status.
pub fn status_icon(status: SensorStatus) -> &'static str {
    match status {
        SensorStatus::Normal => "✔",
        SensorStatus::Warning | SensorStatus::Critical => "▲",
    }
}

/// Format a number the way the cards display it (`45.2`, `168`).
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Build the text lines of a card.
///
/// The failure probability and time-to-failure lines are only present
/// when the reading carries a prediction.
pub fn card_lines(reading: &SensorReading, theme: &Theme, trend: &[u8]) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.muted);
    let strong = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(status_icon(reading.status), theme.status_style(reading.status)),
            Span::raw(" "),
            Span::styled(reading.location.clone(), strong),
            Span::styled(format!("  {}", reading.sensor_type.label()), label),
        ]),
        Line::from(vec![
            Span::styled("Current Value: ", label),
            Span::styled(
                format!("{} {}", format_value(reading.value), reading.sensor_type.unit()),
                strong,
            ),
        ]),
    ];

    if let Some(prediction) = &reading.prediction {
        lines.push(Line::from(vec![
            Span::styled("Failure Probability: ", label),
            Span::styled(format!("{:.1}%", prediction.failure_probability * 100.0), strong),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Time to Failure: ", label),
            Span::styled(
                format!("{}h", format_value(prediction.estimated_time_to_failure)),
                strong,
            ),
        ]));
    }

    if !trend.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Trend: ", label),
            Span::styled(render_sparkline(trend), Style::default().fg(theme.highlight)),
        ]));
    }

    lines
}

fn render_sparkline(data: &[u8]) -> String {
    // Take last 16 values
    let skip = data.len().saturating_sub(16);
    data[skip..].iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

/// A bordered card for one reading.
pub struct SensorCard<'a> {
    reading: &'a SensorReading,
    theme: &'a Theme,
    trend: Vec<u8>,
    selected: bool,
}

impl<'a> SensorCard<'a> {
    pub fn new(reading: &'a SensorReading, theme: &'a Theme) -> Self {
        Self {
            reading,
            theme,
            trend: Vec::new(),
            selected: false,
        }
    }

    /// Add a trend line from sparkline levels.
    pub fn trend(mut self, trend: Vec<u8>) -> Self {
        self.trend = trend;
        self
    }

    /// Highlight the card as the current selection.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for SensorCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Style::default().fg(self.theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(border_style);

        Paragraph::new(card_lines(self.reading, self.theme, &self.trend))
            .block(block)
            .render(area, buf);
    }
}
