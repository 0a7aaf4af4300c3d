// src/ui/widgets/header.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the application banner.
pub fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("✚ ", Style::default().fg(Color::Cyan)),
        Span::styled("RespiratoryAI", Style::new().bold().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            "Asthma & Tuberculosis Prediction System",
            Style::default().fg(Color::Cyan),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(header, area);
}
