// src/core/validation.rs

//! Field-level validation and the completion meter for the prediction form.
//! Everything here is pure: it reads a `FormData` and returns a fresh answer,
//! so the caller can recompute after every keystroke.

use once_cell::sync::Lazy;
use regex::Regex;
use strum::EnumCount;

use crate::core::models::{FormData, FormField, ValidationErrors};

static CANDIDATE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-f0-9]{12}$").expect("candidate id pattern is valid"));

/// MIME types the backend can decode.
pub const ALLOWED_AUDIO_TYPES: [&str; 3] = ["audio/wav", "audio/mpeg", "audio/mp3"];

pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 18..=80;
pub const PACK_YEARS_RANGE: std::ops::RangeInclusive<i64> = 0..=800;

/// Returns `true` if `id` is exactly twelve lowercase hexadecimal characters.
pub fn validate_candidate_id(id: &str) -> bool {
    CANDIDATE_ID_PATTERN.is_match(id)
}

/// Computes the error map for the whole form.
///
/// Each rule only looks at its own field; there are no cross-field rules.
pub fn validate_form(data: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if data.candidate_id.is_empty() {
        errors.insert(FormField::CandidateId, "Candidate ID is required".to_string());
    } else if !validate_candidate_id(&data.candidate_id) {
        errors.insert(
            FormField::CandidateId,
            "Must be 12-character hex ID (e.g., 136bac9a3e081)".to_string(),
        );
    }

    if !AGE_RANGE.contains(&data.age) {
        errors.insert(FormField::Age, "Age must be between 18 and 80".to_string());
    }

    if !PACK_YEARS_RANGE.contains(&data.pack_years) {
        errors.insert(
            FormField::PackYears,
            "Pack years must be between 0 and 800".to_string(),
        );
    }

    if let Some(file) = &data.cough_file {
        if !ALLOWED_AUDIO_TYPES.contains(&file.mime_type.as_str()) {
            errors.insert(
                FormField::CoughFile,
                "Only .wav and .mp3 files are allowed".to_string(),
            );
        }
    }

    errors
}

/// Percentage of fields holding a value, rounded to the nearest integer.
///
/// Empty strings, zeros and a missing file count as blank. Booleans always
/// count as filled. A zero age or zero pack years therefore reads as
/// incomplete even though zero pack years is a legitimate answer.
pub fn form_completion(data: &FormData) -> u8 {
    let filled = [
        !data.candidate_id.is_empty(),
        data.age != 0,
        true, // gender
        true, // tb_contact_history
        true, // wheezing_history
        true, // phlegm_cough
        true, // family_asthma_history
        true, // fever_history
        true, // cold_present
        data.pack_years != 0,
        data.cough_file.is_some(),
    ]
    .iter()
    .filter(|f| **f)
    .count();

    ((filled as f64 / FormField::COUNT as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CoughFile;
    use pretty_assertions::assert_eq;

    fn valid_form() -> FormData {
        FormData {
            candidate_id: "136bac9a3e08".to_string(),
            ..Default::default()
        }
    }

    fn audio(mime_type: &str) -> CoughFile {
        CoughFile {
            name: "cough".to_string(),
            mime_type: mime_type.to_string(),
            bytes: vec![0; 16],
        }
    }

    mod candidate_id {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_twelve_lowercase_hex_chars() {
            assert!(validate_candidate_id("136bac9a3e08"));
            assert!(validate_candidate_id("000000000000"));
            assert!(validate_candidate_id("abcdefabcdef"));
        }

        #[test]
        fn test_rejects_wrong_length() {
            assert!(!validate_candidate_id(""));
            assert!(!validate_candidate_id("136bac9a3e0"));
            assert!(!validate_candidate_id("136bac9a3e081"));
        }

        #[test]
        fn test_rejects_non_hex_or_uppercase() {
            assert!(!validate_candidate_id("136BAC9A3E08"));
            assert!(!validate_candidate_id("136bac9a3e0g"));
            assert!(!validate_candidate_id("136bac9a3e0 "));
            assert!(!validate_candidate_id("136bac9a3e08\n"));
        }

        #[test]
        fn test_matches_exhaustive_character_check() {
            let samples = [
                "136bac9a3e08",
                "136bac9a3e0",
                "136bac9a3e081",
                "xyzxyzxyzxyz",
                "ffffffffffff",
                "ééééééééééé",
                "12345678901-",
            ];
            for s in samples {
                let expected = s.chars().count() == 12
                    && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
                assert_eq!(validate_candidate_id(s), expected, "sample {s:?}");
            }
        }
    }

    mod validate_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_has_no_errors() {
            assert!(validate_form(&valid_form()).is_empty());
        }

        #[test]
        fn test_missing_candidate_id() {
            let errors = validate_form(&FormData::default());
            assert_eq!(
                errors.get(&FormField::CandidateId).map(String::as_str),
                Some("Candidate ID is required")
            );
        }

        #[test]
        fn test_thirteen_char_candidate_id_is_malformed() {
            let form = FormData {
                candidate_id: "136bac9a3e081".to_string(),
                ..Default::default()
            };
            let errors = validate_form(&form);
            assert!(
                errors[&FormField::CandidateId].starts_with("Must be 12-character hex ID")
            );
        }

        #[test]
        fn test_age_bounds() {
            for (age, has_error) in [(17, true), (18, false), (80, false), (81, true), (0, true), (-3, true)] {
                let form = FormData { age, ..valid_form() };
                assert_eq!(
                    validate_form(&form).contains_key(&FormField::Age),
                    has_error,
                    "age {age}"
                );
            }
        }

        #[test]
        fn test_pack_years_bounds() {
            for (pack_years, has_error) in [(-1, true), (0, false), (800, false), (801, true)] {
                let form = FormData { pack_years, ..valid_form() };
                assert_eq!(
                    validate_form(&form).contains_key(&FormField::PackYears),
                    has_error,
                    "pack years {pack_years}"
                );
            }
        }

        #[test]
        fn test_cough_file_mime_type() {
            for mime in ALLOWED_AUDIO_TYPES {
                let form = FormData { cough_file: Some(audio(mime)), ..valid_form() };
                assert!(validate_form(&form).is_empty(), "{mime}");
            }

            let form = FormData { cough_file: Some(audio("audio/ogg")), ..valid_form() };
            assert_eq!(
                validate_form(&form).get(&FormField::CoughFile).map(String::as_str),
                Some("Only .wav and .mp3 files are allowed")
            );
        }

        #[test]
        fn test_one_message_per_field() {
            let form = FormData {
                candidate_id: "nope".to_string(),
                age: 5,
                pack_years: 1000,
                cough_file: Some(audio("text/plain")),
                ..Default::default()
            };
            let errors = validate_form(&form);
            assert_eq!(
                errors.keys().copied().collect::<Vec<_>>(),
                vec![
                    FormField::CandidateId,
                    FormField::Age,
                    FormField::PackYears,
                    FormField::CoughFile
                ]
            );
        }
    }

    mod completion {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_form_baseline() {
            // 8 of 11: age plus the seven booleans.
            assert_eq!(form_completion(&FormData::default()), 73);
        }

        #[test]
        fn test_fully_filled_form() {
            let form = FormData {
                pack_years: 12,
                cough_file: Some(audio("audio/wav")),
                ..valid_form()
            };
            assert_eq!(form_completion(&form), 100);
        }

        #[test]
        fn test_zero_values_count_as_blank() {
            let form = FormData { age: 0, ..FormData::default() };
            // 7 of 11
            assert_eq!(form_completion(&form), 64);
        }

        #[test]
        fn test_flags_do_not_change_completion() {
            let mut form = valid_form();
            let before = form_completion(&form);
            form.wheezing_history = true;
            assert_eq!(form_completion(&form), before);
        }
    }
}
