// src/ui/widgets/toggle_switch.rs

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

/// The switch glyphs for each state.
pub fn switch_text(checked: bool) -> &'static str {
    if checked { "[ ON ●]" } else { "[● OFF]" }
}

/// Renders a one-line labelled on/off switch.
///
/// The label is highlighted when the switch has focus; the switch itself is
/// green when on.
pub fn render_toggle_switch(frame: &mut Frame, area: Rect, label: &str, checked: bool, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(area);

    let label_style = if focused {
        Style::new().bold().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let marker = if focused { "▶ " } else { "  " };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(label, label_style),
        ])),
        chunks[0],
    );

    let switch_style = if checked {
        Style::new().bold().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(switch_text(checked)).style(switch_style),
        chunks[1],
    );
}
