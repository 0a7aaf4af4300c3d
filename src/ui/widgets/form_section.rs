// src/ui/widgets/form_section.rs

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders},
};

/// Draws a titled, bordered section and returns the area inside it.
pub fn render_form_section(frame: &mut Frame, title: &str, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(format!(" {title} ")).bold().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
