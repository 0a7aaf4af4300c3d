// src/ui/widgets/footer.rs

use crate::app::{App, View};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer with the keys available on the current screen.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.alert.is_some() {
        Line::from(vec![Span::raw("Press "), key("Enter"), Span::raw(" to dismiss.")])
    } else {
        match app.view {
            View::Form if app.is_submitting() => {
                Line::from("Analyzing... the form stays editable. Esc to quit.")
            }
            View::Form => Line::from(vec![
                key("Tab/↑↓"),
                Span::raw(" move  "),
                key("←→"),
                Span::raw(" change  "),
                key("Ctrl+S"),
                Span::raw(" analyze  "),
                key("Ctrl+R"),
                Span::raw(" reset  "),
                key("Esc"),
                Span::raw(" quit"),
            ]),
            View::Results(_) => Line::from(vec![
                key("[B]"),
                Span::raw("ack to form, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
        }
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
