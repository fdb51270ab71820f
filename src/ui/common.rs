//! Common UI components shared across views.
//!
//! This module contains the navigation header, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::{status_counts, SensorStatus};
use crate::model::ModelState;

/// Render the navigation header.
///
/// Displays: product name, status counts, model state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (normal, warning, critical) = status_counts(app.readings());

    // Overall status indicator
    let status_style = if critical > 0 {
        app.theme.status_style(SensorStatus::Critical)
    } else if warning > 0 {
        app.theme.status_style(SensorStatus::Warning)
    } else {
        app.theme.status_style(SensorStatus::Normal)
    };

    let model_style = match app.model_state() {
        ModelState::Ready(_) => Style::default().fg(app.theme.healthy),
        ModelState::Failed(_) => Style::default().fg(app.theme.critical),
        _ => Style::default().add_modifier(Modifier::DIM),
    };

    let line = Line::from(vec![
        Span::styled(" ≈ ", Style::default().fg(app.theme.highlight)),
        Span::styled(
            "HydroGuard ",
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled("●", status_style),
        Span::raw(" "),
        Span::styled(format!("{}", normal), Style::default().fg(app.theme.healthy)),
        Span::raw(" ok "),
        count_span(warning, Style::default().fg(app.theme.warning)),
        Span::raw(" warn "),
        count_span(
            critical,
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" crit │ model: "),
        Span::styled(app.model_state().label(), model_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn count_span(count: usize, style: Style) -> Span<'static> {
    if count > 0 {
        Span::styled(count.to_string(), style)
    } else {
        Span::styled("0", Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS.iter().map(|(title, _)| Line::from(*title)).collect();

    let selected = match app.current_view {
        View::Overview => 0,
        View::Predictions => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

const TABS: [(&str, View); 2] = [
    (" 1:Overview ", View::Overview),
    (" 2:Predictions ", View::Predictions),
];
const TAB_DIVIDER: &str = "|";

/// Map a column on the tab row to the tab drawn there.
///
/// Each tab spans its title plus one column of padding on either side;
/// the divider between tabs belongs to neither.
pub fn tab_at(column: u16) -> Option<View> {
    let divider = Line::from(TAB_DIVIDER).width() as u16;
    let mut start = 0u16;
    for (title, view) in TABS {
        let end = start + Line::from(title).width() as u16 + 2;
        if (start..end).contains(&column) {
            return Some(view);
        }
        start = end + divider;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows the current view, time since the readings last changed and the
/// available controls, or a temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Overview => "p:process ↑↓:select Enter:detail Tab:switch e:export ?:help q:quit",
        View::Predictions => "Tab:switch Esc:back ?:help q:quit",
    };

    let status = format!(
        " {} | Updated {:.1}s ago | {}",
        app.current_view.label(),
        app.last_updated.elapsed().as_secs_f64(),
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", section)]),
        Line::from("  Tab/1/2     Switch views"),
        Line::from("  ↑/↓ j/k     Select sensor"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Sensor detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(" Model", section)]),
        Line::from("  p/Space     Process data in model"),
        Line::from("  click       Press the action button"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", section)]),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{seed_readings, Thresholds};
    use crate::ui::Theme;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_tab_at_matches_rendered_row() {
        let app = App::new(seed_readings(Utc::now()), Thresholds::default(), Theme::dark());
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal.draw(|frame| render_tabs(frame, &app, frame.area())).unwrap();

        let row: Vec<String> =
            terminal.backend().buffer().content.iter().map(|c| c.symbol().to_string()).collect();
        let divider = row.iter().position(|s| s == "|").unwrap() as u16;
        let overview = row.iter().position(|s| s == "O").unwrap() as u16;
        let predictions = row.iter().position(|s| s == "P").unwrap() as u16;

        assert_eq!(tab_at(overview), Some(View::Overview));
        assert_eq!(tab_at(divider - 1), Some(View::Overview));
        assert_eq!(tab_at(divider), None);
        assert_eq!(tab_at(divider + 1), Some(View::Predictions));
        assert_eq!(tab_at(predictions), Some(View::Predictions));
    }

    #[test]
    fn test_tab_at_bounds() {
        assert_eq!(tab_at(0), Some(View::Overview));
        assert_eq!(tab_at(13), Some(View::Overview));
        assert_eq!(tab_at(14), None);
        assert_eq!(tab_at(15), Some(View::Predictions));
        assert_eq!(tab_at(31), Some(View::Predictions));
        assert_eq!(tab_at(32), None);
    }
}
