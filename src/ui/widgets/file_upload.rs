// src/ui/widgets/file_upload.rs

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::core::models::CoughFile;
use crate::ui::layout::cursor_column;

/// Everything the upload field needs to draw itself.
pub struct FileUpload<'a> {
    pub file: Option<&'a CoughFile>,
    pub path_input: &'a str,
    /// Validation error or read error, whichever applies.
    pub error: Option<&'a str>,
    pub focused: bool,
}

impl FileUpload<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let (icon, icon_style) = match (self.file, self.error) {
            (_, Some(_)) => ("✗", Style::default().fg(Color::Red)),
            (Some(_), None) => ("✓", Style::default().fg(Color::Green)),
            (None, None) => ("⇪", Style::default().fg(Color::DarkGray)),
        };
        let status = match self.file {
            Some(file) => Line::from(vec![
                Span::styled(format!("{icon} "), icon_style),
                Span::styled(file.name.as_str(), Style::new().bold()),
                Span::styled(
                    format!("  {:.2} MB", file.size_mb()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(vec![
                Span::styled(format!("{icon} "), icon_style),
                Span::raw("Enter a path to a .wav or .mp3 recording"),
            ]),
        };
        frame.render_widget(Paragraph::new(status), rows[0]);

        let label_style = if self.focused {
            Style::new().bold().fg(Color::Yellow)
        } else {
            Style::new().bold()
        };
        let marker = if self.focused { "▶ " } else { "  " };
        let path_line = Line::from(vec![
            Span::styled(format!("{marker}Path: "), label_style),
            Span::styled(self.path_input, Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(path_line), rows[1]);

        if self.focused {
            let offset = marker.chars().count() + "Path: ".len() + self.path_input.chars().count();
            frame.set_cursor_position((cursor_column(rows[1], offset), rows[1].y));
        }

        let hint = Line::from(Span::styled(
            "Supports .wav and .mp3 files. Press Enter to load.",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(hint), rows[2]);

        if let Some(message) = self.error {
            let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, rows[3]);
        }
    }
}
