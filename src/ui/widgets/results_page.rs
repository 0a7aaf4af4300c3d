// src/ui/widgets/results_page.rs

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
};

use crate::core::models::PredictionResult;
use crate::core::severity::{clamp_probability, severity_messages, SeverityBucket};

const DISCLAIMER: &str = "This analysis is for informational purposes only and should not replace professional medical advice. Please consult with a qualified healthcare provider for proper diagnosis and treatment.";

/// Colour used for a severity bucket's icon, label and border.
pub fn severity_color(bucket: SeverityBucket) -> Color {
    match bucket {
        SeverityBucket::Low => Color::Green,
        SeverityBucket::Moderate => Color::Yellow,
        SeverityBucket::High => Color::Red,
        SeverityBucket::Unknown => Color::Gray,
    }
}

/// Upper-cases the first letter of each word: "asthma (high)" → "Asthma (high)".
fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the analysis results for one prediction.
pub fn render_results_page(frame: &mut Frame, result: &PredictionResult, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Text::from(vec![
        Line::from("Analysis Results".bold()),
        Line::from("Your respiratory health assessment is complete".fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    let meters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_probability_meter(frame, "Asthma Risk", result.asthma_prob, Color::Green, meters[0]);
    render_probability_meter(frame, "Tuberculosis Risk", result.tb_prob, Color::Cyan, meters[1]);

    render_severity_box(frame, &result.severity, chunks[2]);

    let disclaimer = Paragraph::new(DISCLAIMER)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("⚠ Important Disclaimer".bold()),
        );
    frame.render_widget(disclaimer, chunks[3]);

    let stamp = Line::from(Span::styled(
        format!("Analyzed at {}", result.received_at.format("%Y-%m-%d %H:%M:%S")),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(stamp).alignment(Alignment::Right), chunks[4]);
}

fn render_probability_meter(frame: &mut Frame, title: &str, probability: f64, color: Color, area: Rect) {
    let clamped = clamp_probability(probability);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title.bold()),
        )
        .gauge_style(Style::default().fg(color))
        .percent(clamped.round() as u16)
        .label(Span::styled(format!("{clamped:.1}%"), Style::new().bold()));
    frame.render_widget(gauge, area);
}

fn render_severity_box(frame: &mut Frame, severity: &str, area: Rect) {
    let bucket = SeverityBucket::classify(severity);
    let color = severity_color(bucket);
    let label = if severity.trim().is_empty() {
        "Unknown".to_string()
    } else {
        capitalize_words(severity)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", bucket.icon()), Style::new().bold().fg(color)),
            Span::styled("Overall Risk Level: ", Style::new().bold()),
            Span::styled(label, Style::new().bold().fg(color)),
        ]),
        Line::from(""),
    ];
    lines.extend(severity_messages(severity).into_iter().map(Line::from));

    let severity_box = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(severity_box, area);
}
