//! Line chart of reading values by location.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::data::SensorReading;
use crate::ui::Theme;

/// Chart points as `(index, value)`, skipping non-finite values.
pub fn points(readings: &[SensorReading]) -> Vec<(f64, f64)> {
    readings
        .iter()
        .enumerate()
        .filter(|(_, r)| r.value.is_finite())
        .map(|(i, r)| (i as f64, r.value))
        .collect()
}

/// Y-axis bounds: zero (or the lowest negative value) up to 10% above the maximum.
pub fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let min = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
    let upper = (max * 1.1).max(1.0);
    let lower = if min < 0.0 { min * 1.1 } else { 0.0 };
    [lower, upper]
}

/// Render the "Failure Predictions" chart panel.
pub fn render(frame: &mut Frame, readings: &[SensorReading], theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Failure Predictions ", theme.header))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let data = points(readings);
    if data.is_empty() {
        let empty = Paragraph::new("No readings to chart")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let [y_min, y_max] = y_bounds(&data);
    let x_max = (readings.len().saturating_sub(1) as f64).max(1.0);

    let x_labels: Vec<Line> = readings.iter().map(|r| Line::from(r.location.clone())).collect();
    let y_labels: Vec<Line> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|v| Line::from(format!("{:.0}", v)))
        .collect();

    let dataset = Dataset::default()
        .name("value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.highlight))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
