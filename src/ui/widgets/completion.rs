// src/ui/widgets/completion.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge},
};

/// Renders the form completion meter.
pub fn render_completion(frame: &mut Frame, completion: u8, area: Rect) {
    let color = match completion {
        100 => Color::Green,
        50..=99 => Color::Cyan,
        _ => Color::Yellow,
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Form Completion"))
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(completion.min(100)))
        .label(Span::styled(format!("{completion}%"), Style::new().bold()));
    frame.render_widget(gauge, area);
}
