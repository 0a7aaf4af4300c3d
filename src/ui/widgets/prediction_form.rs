// src/ui/widgets/prediction_form.rs

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, FocusItem, SPINNER_CHARS};
use crate::core::models::{FormField, HISTORY_FLAGS};
use crate::core::validation::{AGE_RANGE, PACK_YEARS_RANGE};
use crate::ui::layout::{create_form_layout, cursor_column};

use super::completion::render_completion;
use super::file_upload::FileUpload;
use super::form_section::render_form_section;
use super::slider_input::{SliderInput, SLIDER_HEIGHT};
use super::toggle_switch::render_toggle_switch;

/// Renders the whole prediction form from the app state.
pub fn render_prediction_form(frame: &mut Frame, app: &App, area: Rect) {
    let layout = create_form_layout(area);

    render_completion(frame, app.completion, layout.completion);

    let patient = render_form_section(frame, "Patient Information", layout.patient);
    render_candidate_id(frame, app, patient);

    let demographics = render_form_section(frame, "Demographics", layout.demographics);
    render_demographics(frame, app, demographics);

    let history = render_form_section(frame, "Medical History & Symptoms", layout.history);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 6])
        .split(history);
    for (field, row) in HISTORY_FLAGS.iter().zip(rows.iter()) {
        render_toggle_switch(
            frame,
            *row,
            field.label(),
            app.form.flag(*field).unwrap_or_default(),
            app.is_focused(FocusItem::Field(*field)),
        );
    }

    let audio = render_form_section(frame, "Audio Analysis", layout.audio);
    let error = app
        .file_error
        .as_deref()
        .or_else(|| app.errors.get(&FormField::CoughFile).map(String::as_str));
    FileUpload {
        file: app.form.cough_file.as_ref(),
        path_input: &app.file_path_input,
        error,
        focused: app.is_focused(FocusItem::Field(FormField::CoughFile)),
    }
    .render(frame, audio);

    render_buttons(frame, app, layout.buttons);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::new().bold().fg(Color::Yellow)
    } else {
        Style::new().bold()
    }
}

fn render_candidate_id(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let focused = app.is_focused(FocusItem::Field(FormField::CandidateId));
    let error = app.errors.get(&FormField::CandidateId);
    let marker = if focused { "▶ " } else { "  " };
    let prefix = format!("{marker}{}: ", FormField::CandidateId.label());

    let value = if app.form.candidate_id.is_empty() {
        Span::styled("136bac9a3e081", Style::default().fg(Color::DarkGray).italic())
    } else {
        let color = if error.is_some() { Color::Red } else { Color::Yellow };
        Span::styled(app.form.candidate_id.as_str(), Style::default().fg(color))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(prefix.clone(), focus_style(focused)), value])),
        rows[0],
    );

    if focused {
        let offset = prefix.chars().count() + app.form.candidate_id.chars().count();
        frame.set_cursor_position((cursor_column(rows[0], offset), rows[0].y));
    }

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
            rows[1],
        );
    }
}

fn render_demographics(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SLIDER_HEIGHT),
            Constraint::Length(2),
            Constraint::Length(SLIDER_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    SliderInput {
        label: FormField::Age.label(),
        value: app.form.age,
        min: *AGE_RANGE.start(),
        max: *AGE_RANGE.end(),
        unit: "years",
        error: app.errors.get(&FormField::Age).map(String::as_str),
        focused: app.is_focused(FocusItem::Field(FormField::Age)),
    }
    .render(frame, rows[0]);

    let focused = app.is_focused(FocusItem::Field(FormField::Gender));
    let option = |label: &'static str, selected: bool, color: Color| {
        if selected {
            Span::styled(format!(" {label} "), Style::new().bold().fg(Color::Black).bg(color))
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };
    let marker = if focused { "▶ " } else { "  " };
    let gender = Line::from(vec![
        Span::styled(format!("{marker}{}  ", FormField::Gender.label()), focus_style(focused)),
        option("Female", !app.form.gender, Color::Magenta),
        Span::raw("  "),
        option("Male", app.form.gender, Color::Blue),
    ]);
    frame.render_widget(Paragraph::new(gender), rows[1]);

    SliderInput {
        label: FormField::PackYears.label(),
        value: app.form.pack_years,
        min: *PACK_YEARS_RANGE.start(),
        max: *PACK_YEARS_RANGE.end(),
        unit: "",
        error: app.errors.get(&FormField::PackYears).map(String::as_str),
        focused: app.is_focused(FocusItem::Field(FormField::PackYears)),
    }
    .render(frame, rows[2]);
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(22),
            Constraint::Length(2),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);

    let analyze_label = if app.is_submitting() {
        format!("{} Processing...", SPINNER_CHARS[app.spinner_frame])
    } else {
        "Analyze →".to_string()
    };
    let analyze_color = if app.can_submit() { Color::Green } else { Color::DarkGray };
    render_button(
        frame,
        chunks[1],
        &analyze_label,
        analyze_color,
        app.is_focused(FocusItem::Analyze),
    );
    render_button(frame, chunks[3], "↺ Reset", Color::Red, app.is_focused(FocusItem::Reset));
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, color: Color, focused: bool) {
    let border_style = if focused {
        Style::new().bold().fg(Color::Yellow)
    } else {
        Style::default().fg(color)
    };
    let button = Paragraph::new(Span::styled(label, Style::new().bold().fg(color)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
    frame.render_widget(button, area);
}
