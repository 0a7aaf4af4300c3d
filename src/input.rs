// src/input.rs

//! Key bindings for both screens.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, FocusItem, View};
use crate::core::models::{FormData, FormField};

/// Applies one key press to the app.
///
/// Returns the form snapshot to send when the key started a submission.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<FormData> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }
    // The alert is modal: nothing else reacts until it is dismissed.
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return None;
    }
    if matches!(app.view, View::Form) {
        handle_form_input(app, key)
    } else {
        handle_results_input(app, key.code);
        None
    }
}

/// Handles input while the form is on screen.
fn handle_form_input(app: &mut App, key: KeyEvent) -> Option<FormData> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => return app.try_submit(),
            KeyCode::Char('r') => app.reset(),
            _ => {}
        }
        return None;
    }

    let focused = app.focused();
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Down => app.next_focus(),
        KeyCode::BackTab | KeyCode::Up => app.prev_focus(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::PageUp => app.adjust(10),
        KeyCode::PageDown => app.adjust(-10),
        KeyCode::Left => match focused {
            FocusItem::Field(FormField::Gender) => app.set_gender(false),
            FocusItem::Field(FormField::Age | FormField::PackYears) => app.adjust(-1),
            FocusItem::Field(_) => app.toggle(),
            _ => {}
        },
        KeyCode::Right => match focused {
            FocusItem::Field(FormField::Gender) => app.set_gender(true),
            FocusItem::Field(FormField::Age | FormField::PackYears) => app.adjust(1),
            FocusItem::Field(_) => app.toggle(),
            _ => {}
        },
        KeyCode::Enter => match focused {
            FocusItem::Analyze => return app.try_submit(),
            FocusItem::Reset => app.reset(),
            FocusItem::Field(FormField::CoughFile) => app.select_cough_file(),
            FocusItem::Field(FormField::CandidateId | FormField::Age | FormField::PackYears) => {
                app.next_focus()
            }
            FocusItem::Field(_) => app.toggle(),
        },
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    None
}

/// Handles input while the results page is on screen.
fn handle_results_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => app.back_to_form(),
        _ => {}
    }
}
