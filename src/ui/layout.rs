// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas shared by every view.
pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Splits the frame into the header band, the page body and the one-line
/// footer with key hints.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    AppLayout {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Areas of the form page.
pub struct FormLayout {
    pub completion: Rect,
    pub patient: Rect,
    pub demographics: Rect,
    pub history: Rect,
    pub audio: Rect,
    pub buttons: Rect,
}

/// Lays the form out in two columns between the completion gauge and the
/// button row: patient information and demographics on the left, medical
/// history and the audio upload on the right.
pub fn create_form_layout(area: Rect) -> FormLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[1]);

    FormLayout {
        completion: rows[0],
        patient: left[0],
        demographics: left[1],
        history: right[0],
        audio: right[1],
        buttons: rows[2],
    }
}

/// Returns a rectangle of the given percentage size centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Column of a text cursor `offset` cells into `area`, pinned to its last cell.
pub fn cursor_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}
