// src/core/models.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumCount, EnumIter};

// --- Form Fields ---

/// Every field of the prediction form, in the order the backend expects
/// them as multipart parts.
///
/// The `Display` representation is the wire name used both for
/// the multipart part and for the persisted JSON key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumCount,
)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    CandidateId,
    Age,
    Gender,
    TbContactHistory,
    WheezingHistory,
    PhlegmCough,
    FamilyAsthmaHistory,
    FeverHistory,
    ColdPresent,
    PackYears,
    CoughFile,
}

/// The six yes/no medical history questions, in display order.
pub const HISTORY_FLAGS: [FormField; 6] = [
    FormField::TbContactHistory,
    FormField::WheezingHistory,
    FormField::PhlegmCough,
    FormField::FamilyAsthmaHistory,
    FormField::FeverHistory,
    FormField::ColdPresent,
];

impl FormField {
    /// Human-readable label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            FormField::CandidateId => "Candidate ID",
            FormField::Age => "Age",
            FormField::Gender => "Gender",
            FormField::TbContactHistory => "TB Contact History",
            FormField::WheezingHistory => "History of Wheezing",
            FormField::PhlegmCough => "Phlegm with Cough",
            FormField::FamilyAsthmaHistory => "Family History of Asthma",
            FormField::FeverHistory => "Recent Fever/Weight Loss/Decreased Appetite",
            FormField::ColdPresent => "Cold Present at Recording",
            FormField::PackYears => "Pack Years",
            FormField::CoughFile => "Cough Audio Upload",
        }
    }
}

/// Field name → message. At most one message per field.
pub type ValidationErrors = BTreeMap<FormField, String>;

// --- Form Data ---

/// A cough recording selected by the user.
///
/// Only lives in memory: it is never written to the form store, so it is
/// gone after a restart.
#[derive(Clone, PartialEq, Eq)]
pub struct CoughFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CoughFile {
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0 / 1024.0
    }
}

// Keep the raw audio out of debug output and logs.
impl fmt::Debug for CoughFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoughFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The authoritative state of the prediction form.
///
/// Missing keys in persisted JSON fall back to the defaults, which is how a
/// stored form is merged over a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub candidate_id: String,
    pub age: i64,
    /// `true` for Male, `false` for Female.
    pub gender: bool,
    pub tb_contact_history: bool,
    pub wheezing_history: bool,
    pub phlegm_cough: bool,
    pub family_asthma_history: bool,
    pub fever_history: bool,
    pub cold_present: bool,
    pub pack_years: i64,
    #[serde(skip)]
    pub cough_file: Option<CoughFile>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            candidate_id: String::new(),
            age: 30,
            gender: false,
            tb_contact_history: false,
            wheezing_history: false,
            phlegm_cough: false,
            family_asthma_history: false,
            fever_history: false,
            cold_present: false,
            pack_years: 0,
            cough_file: None,
        }
    }
}

impl FormData {
    /// Returns the value of a history flag, or `None` for non-flag fields.
    pub fn flag(&self, field: FormField) -> Option<bool> {
        match field {
            FormField::TbContactHistory => Some(self.tb_contact_history),
            FormField::WheezingHistory => Some(self.wheezing_history),
            FormField::PhlegmCough => Some(self.phlegm_cough),
            FormField::FamilyAsthmaHistory => Some(self.family_asthma_history),
            FormField::FeverHistory => Some(self.fever_history),
            FormField::ColdPresent => Some(self.cold_present),
            _ => None,
        }
    }

    /// Sets a history flag. Non-flag fields are ignored.
    pub fn set_flag(&mut self, field: FormField, value: bool) {
        match field {
            FormField::TbContactHistory => self.tb_contact_history = value,
            FormField::WheezingHistory => self.wheezing_history = value,
            FormField::PhlegmCough => self.phlegm_cough = value,
            FormField::FamilyAsthmaHistory => self.family_asthma_history = value,
            FormField::FeverHistory => self.fever_history = value,
            FormField::ColdPresent => self.cold_present = value,
            _ => {}
        }
    }

    pub fn gender_label(&self) -> &'static str {
        if self.gender { "Male" } else { "Female" }
    }
}

// --- Prediction Result ---

/// The backend's answer for one submission.
///
/// Probabilities that are missing or not JSON numbers (numeric strings
/// included) deserialize to NaN rather than failing the whole response; the
/// results page clamps them to 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default = "not_a_number", deserialize_with = "lenient_probability")]
    pub asthma_prob: f64,
    #[serde(default = "not_a_number", deserialize_with = "lenient_probability")]
    pub tb_prob: f64,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: String,
    #[serde(skip, default = "Local::now")]
    pub received_at: DateTime<Local>,
}

fn not_a_number() -> f64 {
    f64::NAN
}

fn lenient_probability<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}
