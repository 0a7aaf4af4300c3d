// src/ui/mod.rs

use crate::app::{App, View};
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let layout = layout::create_layout(area);

    widgets::header::render_header(frame, layout.header);

    match &app.view {
        View::Form => widgets::prediction_form::render_prediction_form(frame, app, layout.body),
        View::Results(result) => {
            widgets::results_page::render_results_page(frame, result, layout.body)
        }
    }

    widgets::footer::render_footer(frame, app, layout.footer);

    // The alert goes last so it sits on top of everything else.
    if let Some(message) = &app.alert {
        widgets::alert_popup::render_alert_popup(frame, message, area);
    }
}
