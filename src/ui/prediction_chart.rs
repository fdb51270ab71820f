//! Placeholder panel for future prediction visualizations.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::Theme;

const GLYPH: &str = "▂▅▇▃";
const MESSAGE: &str = "Prediction data visualization would go here";
const DETAIL: &str = "Integration with real-time ML predictions required";

/// Render the static placeholder. Takes no data.
pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" Predictions ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let text = vec![
        Line::from(GLYPH).style(Style::default().fg(theme.muted)),
        Line::from(""),
        Line::from(MESSAGE).style(Style::default().fg(theme.muted)),
        Line::from(DETAIL).style(Style::default().fg(theme.muted).add_modifier(Modifier::DIM)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_placeholder_text() {
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal.draw(|frame| render(frame, &theme, frame.area())).unwrap();

        let rendered: String =
            terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains(MESSAGE));
        assert!(rendered.contains(DETAIL));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal.draw(|frame| render(frame, &theme, frame.area())).unwrap();
    }
}
