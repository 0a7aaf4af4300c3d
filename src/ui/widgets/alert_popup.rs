// src/ui/widgets/alert_popup.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

use crate::ui::layout::centered_rect;

/// Renders a blocking alert over the current page.
///
/// `Clear` wipes the popup area first so the page underneath does not
/// bleed through.
pub fn render_alert_popup(frame: &mut Frame, message: &str, area: Rect) {
    let mut lines: Vec<Line> = message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Press ".bold() + "Enter".bold().yellow() + " to dismiss".bold()));

    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let popup_area = centered_rect(60, 40, area);
    let popup = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
