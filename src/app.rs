// src/app.rs

use tracing::{debug, error, info, warn};

use crate::core::audio;
use crate::core::models::{FormData, FormField, PredictionResult, ValidationErrors, HISTORY_FLAGS};
use crate::core::storage::{self, FormStore};
use crate::core::validation::{form_completion, validate_form};
use crate::error::PredictError;

pub const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Message shown when a submission fails.
pub const SUBMIT_FAILED_MESSAGE: &str = "Error analyzing respiratory health. Please try again.";

/// Largest number of digits accepted in a numeric field.
const MAX_NUMBER_DIGITS: usize = 4;

/// Which top-level page is on screen. There is no history: going back to
/// the form drops the result.
pub enum View {
    Form,
    Results(PredictionResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// Something on the form that can hold the keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusItem {
    Field(FormField),
    Analyze,
    Reset,
}

/// Focus order, top to bottom as drawn.
pub const FOCUS_ORDER: [FocusItem; 13] = [
    FocusItem::Field(FormField::CandidateId),
    FocusItem::Field(FormField::Age),
    FocusItem::Field(FormField::Gender),
    FocusItem::Field(FormField::PackYears),
    FocusItem::Field(HISTORY_FLAGS[0]),
    FocusItem::Field(HISTORY_FLAGS[1]),
    FocusItem::Field(HISTORY_FLAGS[2]),
    FocusItem::Field(HISTORY_FLAGS[3]),
    FocusItem::Field(HISTORY_FLAGS[4]),
    FocusItem::Field(HISTORY_FLAGS[5]),
    FocusItem::Field(FormField::CoughFile),
    FocusItem::Analyze,
    FocusItem::Reset,
];

pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub phase: FormPhase,
    pub form: FormData,
    pub errors: ValidationErrors,
    pub completion: u8,
    pub focus: usize,
    /// Path being typed into the cough recording field.
    pub file_path_input: String,
    /// Read error for the last path the user tried to load.
    pub file_error: Option<String>,
    /// Blocking message; while set it swallows all input but Enter/Esc.
    pub alert: Option<String>,
    pub spinner_frame: usize,
    store: Box<dyn FormStore>,
}

impl App {
    /// Builds the app, restoring any saved form from `store`.
    pub fn new(store: Box<dyn FormStore>) -> Self {
        let form = storage::load_form(store.as_ref());
        let errors = validate_form(&form);
        let completion = form_completion(&form);
        Self {
            should_quit: false,
            view: View::Form,
            phase: FormPhase::Editing,
            form,
            errors,
            completion,
            focus: 0,
            file_path_input: String::new(),
            file_error: None,
            alert: None,
            spinner_frame: 0,
            store,
        }
    }

    pub fn focused(&self) -> FocusItem {
        FOCUS_ORDER[self.focus]
    }

    pub fn is_focused(&self, item: FocusItem) -> bool {
        self.focused() == item
    }

    pub fn next_focus(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
    }

    pub fn prev_focus(&mut self) {
        self.focus = if self.focus == 0 {
            FOCUS_ORDER.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Submission is blocked by any validation error or an in-flight request.
    pub fn can_submit(&self) -> bool {
        !self.has_errors() && !self.is_submitting()
    }

    /// Applies `change` to the form, then refreshes errors and completion and
    /// saves the result.
    pub fn update_form(&mut self, change: impl FnOnce(&mut FormData)) {
        change(&mut self.form);
        self.errors = validate_form(&self.form);
        self.completion = form_completion(&self.form);
        if let Err(e) = storage::save_form(self.store.as_mut(), &self.form) {
            warn!(error = %e, "Could not save form.");
        }
    }

    /// Feeds a typed character to the focused field.
    pub fn type_char(&mut self, c: char) {
        match self.focused() {
            FocusItem::Field(FormField::CandidateId) => {
                self.update_form(|f| f.candidate_id.push(c));
            }
            FocusItem::Field(FormField::Age) => self.type_digit(FormField::Age, c),
            FocusItem::Field(FormField::PackYears) => self.type_digit(FormField::PackYears, c),
            FocusItem::Field(FormField::CoughFile) => {
                self.file_path_input.push(c);
                self.file_error = None;
            }
            FocusItem::Field(_) if c == ' ' => self.toggle(),
            _ => {}
        }
    }

    fn type_digit(&mut self, field: FormField, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let current = self.number(field);
        let mut digits = if current == 0 { String::new() } else { current.to_string() };
        if digits.len() >= MAX_NUMBER_DIGITS {
            return;
        }
        digits.push(c);
        if let Ok(value) = digits.parse::<i64>() {
            self.set_number(field, value);
        }
    }

    fn number(&self, field: FormField) -> i64 {
        match field {
            FormField::Age => self.form.age,
            FormField::PackYears => self.form.pack_years,
            _ => 0,
        }
    }

    fn set_number(&mut self, field: FormField, value: i64) {
        match field {
            FormField::Age => self.update_form(|f| f.age = value),
            FormField::PackYears => self.update_form(|f| f.pack_years = value),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            FocusItem::Field(FormField::CandidateId) => {
                self.update_form(|f| {
                    f.candidate_id.pop();
                });
            }
            FocusItem::Field(field @ (FormField::Age | FormField::PackYears)) => {
                let mut digits = self.number(field).to_string();
                digits.pop();
                self.set_number(field, digits.parse().unwrap_or(0));
            }
            FocusItem::Field(FormField::CoughFile) => {
                self.file_path_input.pop();
                self.file_error = None;
            }
            _ => {}
        }
    }

    /// Nudges the focused numeric field. Values never go below zero.
    pub fn adjust(&mut self, delta: i64) {
        if let FocusItem::Field(field @ (FormField::Age | FormField::PackYears)) = self.focused() {
            let value = self.number(field).saturating_add(delta).max(0);
            self.set_number(field, value);
        }
    }

    /// Flips the focused toggle (gender or a history flag).
    pub fn toggle(&mut self) {
        match self.focused() {
            FocusItem::Field(FormField::Gender) => self.update_form(|f| f.gender = !f.gender),
            FocusItem::Field(field) => {
                if let Some(value) = self.form.flag(field) {
                    self.update_form(|f| f.set_flag(field, !value));
                }
            }
            _ => {}
        }
    }

    pub fn set_gender(&mut self, male: bool) {
        self.update_form(|f| f.gender = male);
    }

    /// Loads the recording named by `file_path_input`.
    ///
    /// Unsupported file types are ignored without a message; read errors are
    /// shown under the field.
    pub fn select_cough_file(&mut self) {
        if self.file_path_input.trim().is_empty() {
            return;
        }
        match audio::load_cough_file(&self.file_path_input) {
            Ok(Some(file)) => {
                self.file_error = None;
                self.update_form(|f| f.cough_file = Some(file));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(path = %self.file_path_input, error = %e, "Could not read cough recording.");
                self.file_error = Some(format!("Could not read file: {e}"));
            }
        }
    }

    /// Starts a submission if the form allows it.
    ///
    /// Returns the snapshot to send, or `None` when the form has errors or a
    /// request is already in flight.
    pub fn try_submit(&mut self) -> Option<FormData> {
        self.errors = validate_form(&self.form);
        if !self.can_submit() {
            debug!(errors = self.errors.len(), submitting = self.is_submitting(), "Submit blocked.");
            return None;
        }
        info!(candidate_id = %self.form.candidate_id, "Submitting form.");
        self.phase = FormPhase::Submitting;
        Some(self.form.clone())
    }

    /// Receives the outcome of a submission started by `try_submit`.
    pub fn on_prediction(&mut self, outcome: Result<PredictionResult, PredictError>) {
        self.phase = FormPhase::Editing;
        match outcome {
            Ok(result) => {
                info!(severity = %result.severity, "Showing prediction results.");
                self.view = View::Results(result);
            }
            Err(e) => {
                error!(error = %e, "Error submitting form.");
                self.alert = Some(format!("{SUBMIT_FAILED_MESSAGE}\n\n{e}"));
            }
        }
    }

    /// Clears the saved form and starts over from the defaults.
    pub fn reset(&mut self) {
        if let Err(e) = storage::clear_form(self.store.as_mut()) {
            warn!(error = %e, "Could not clear saved form.");
        }
        self.form = FormData::default();
        self.errors = validate_form(&self.form);
        self.completion = form_completion(&self.form);
        self.file_path_input.clear();
        self.file_error = None;
        self.focus = 0;
        info!("Form reset.");
    }

    pub fn back_to_form(&mut self) {
        self.view = View::Form;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn on_tick(&mut self) {
        if self.is_submitting() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
