// src/ui/widgets/slider_input.rs

use ratatui::{
    prelude::*,
    widgets::{LineGauge, Paragraph},
};

/// A bounded integer input drawn as a value box over a horizontal track.
pub struct SliderInput<'a> {
    pub label: &'a str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub unit: &'a str,
    pub error: Option<&'a str>,
    pub focused: bool,
}

/// Rows a slider needs: value line, track, and hint/error line.
pub const SLIDER_HEIGHT: u16 = 3;

/// Position of `value` on the track, clamped to `[0.0, 1.0]`.
pub fn slider_ratio(value: i64, min: i64, max: i64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) as f64 / (max - min) as f64).clamp(0.0, 1.0)
}

impl SliderInput<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let label_style = if self.focused {
            Style::new().bold().fg(Color::Yellow)
        } else {
            Style::new().bold()
        };
        let value_style = if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let marker = if self.focused { "▶ " } else { "  " };
        let mut value_line = vec![
            Span::styled(marker, label_style),
            Span::styled(self.label, label_style),
            Span::raw("  "),
            Span::styled(format!("[ {} ]", self.value), value_style),
        ];
        if !self.unit.is_empty() {
            value_line.push(Span::raw(format!(" {}", self.unit)));
        }
        frame.render_widget(Paragraph::new(Line::from(value_line)), rows[0]);

        let track_color = if self.error.is_some() { Color::Red } else { Color::Cyan };
        let track = LineGauge::default()
            .ratio(slider_ratio(self.value, self.min, self.max))
            .label("")
            .filled_style(Style::default().fg(track_color))
            .unfilled_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(track, rows[1]);

        let hint = match self.error {
            Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                format!("{} … {}", self.min, self.max),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(hint), rows[2]);
    }
}
