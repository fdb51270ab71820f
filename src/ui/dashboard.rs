//! Overview rendering.
//!
//! Displays the action button, the summary counter tiles, the sensor card
//! list and the value chart.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::sensor_card::{SensorCard, CARD_HEIGHT};
use crate::ui::value_chart;

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let [action, counters, content] = Layout::vertical([
        Constraint::Length(3), // Action button
        Constraint::Length(4), // Counter tiles
        Constraint::Min(6),    // Cards and chart
    ])
    .areas(area);

    render_action(frame, app, action);
    render_counters(frame, app, counters);

    let [cards, chart] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(content);

    render_cards(frame, app, cards);
    value_chart::render(frame, app.readings(), &app.theme, chart);
}

/// Render the action button and remember where it is for mouse clicks.
fn render_action(frame: &mut Frame, app: &mut App, area: Rect) {
    let state = app.action_state();
    let label = state.label();

    let width = (label.chars().count() as u16 + 6).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let button = Rect::new(x, area.y, width, area.height);

    let style = if state.enabled() {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let paragraph = Paragraph::new(label).alignment(Alignment::Center).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(style),
    );

    frame.render_widget(paragraph, button);
    app.action_area = Some(button);
}

fn render_counters(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let tiles = [
        ("Active Sensors", summary.active_sensors.to_string(), "∿", Color::Blue),
        ("Predicted Issues", summary.predicted_issues.to_string(), "▲", app.theme.warning),
        ("Maintenance Tasks", summary.maintenance_tasks.to_string(), "▦", app.theme.healthy),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for ((title, value, icon, color), tile) in tiles.into_iter().zip(areas.iter()) {
        let lines = vec![
            Line::from(vec![
                Span::styled(title, Style::default().fg(app.theme.muted)),
                Span::raw("  "),
                Span::styled(icon, Style::default().fg(color)),
            ]),
            Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        frame.render_widget(Paragraph::new(lines).block(block), *tile);
    }
}

/// Index of the first card to draw so the selection stays visible.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let readings = app.readings();
    let title = if readings.is_empty() {
        " Processed Sensor Data ".to_string()
    } else {
        format!(
            " Processed Sensor Data [{}/{}] ",
            app.selected_index + 1,
            readings.len()
        )
    };

    let block = Block::default()
        .title(Span::styled(title, app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if readings.is_empty() {
        let empty = Paragraph::new("No sensor readings")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let offset = scroll_offset(app.selected_index, visible);

    for (slot, (index, reading)) in
        readings.iter().enumerate().skip(offset).take(visible).enumerate()
    {
        let y = inner.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(inner.y + inner.height - y);
        let card_area = Rect::new(inner.x, y, inner.width, height);

        let card = SensorCard::new(reading, &app.theme)
            .trend(app.history.sparkline(&reading.id))
            .selected(index == app.selected_index);
        frame.render_widget(card, card_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(3, 3), 1);
        assert_eq!(scroll_offset(5, 1), 5);
        assert_eq!(scroll_offset(4, 0), 4);
    }
}
