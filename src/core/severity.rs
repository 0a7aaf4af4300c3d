// src/core/severity.rs

//! Turns the backend's free-text severity into a presentation bucket.
//!
//! The backend sends labels such as "Healthy", "Asthma (Medium)" or plain
//! "high". Matching is by lowercase substring, first bucket wins, and
//! anything unrecognised falls back to `Unknown`.

/// Presentation bucket for a severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBucket {
    Low,
    Moderate,
    High,
    Unknown,
}

impl SeverityBucket {
    pub fn classify(severity: &str) -> Self {
        let s = severity.to_lowercase();
        if s.contains("healthy") || s.contains("low") {
            SeverityBucket::Low
        } else if s.contains("medium") || s.contains("asthma") {
            SeverityBucket::Moderate
        } else if s.contains("high") || s.contains("tuberculosis") {
            SeverityBucket::High
        } else {
            SeverityBucket::Unknown
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SeverityBucket::Low => "✓",
            SeverityBucket::Moderate | SeverityBucket::High => "⚠",
            SeverityBucket::Unknown => "●",
        }
    }
}

/// Keyword → advice shown under the severity heading, in display order.
const MESSAGES: &[(&str, &str)] = &[
    (
        "healthy",
        "Your results indicate you are healthy. Continue maintaining good habits and regular check-ups.",
    ),
    (
        "asthma",
        "Your results indicate risk of asthma. Please consult a healthcare provider for evaluation.",
    ),
    (
        "tuberculosis",
        "Your results indicate risk of tuberculosis. Seek medical attention promptly for evaluation and treatment.",
    ),
    (
        "low",
        "Your respiratory health indicators suggest low risk. Maintain healthy habits and regular check-ups.",
    ),
    (
        "medium",
        "Some indicators suggest moderate risk. We recommend consulting with a healthcare professional.",
    ),
    (
        "high",
        "Several indicators suggest higher risk. Please consult with a healthcare professional promptly.",
    ),
];

/// Every advice line whose keyword appears in `severity`.
///
/// A label like "Tuberculosis (High)" yields two lines.
pub fn severity_messages(severity: &str) -> Vec<&'static str> {
    let s = severity.to_lowercase();
    MESSAGES
        .iter()
        .filter(|(keyword, _)| s.contains(keyword))
        .map(|(_, message)| *message)
        .collect()
}

/// Clamps a probability into `[0, 100]`. NaN and infinities become 0.
pub fn clamp_probability(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(SeverityBucket::classify("Healthy"), SeverityBucket::Low);
        assert_eq!(SeverityBucket::classify("low"), SeverityBucket::Low);
        assert_eq!(SeverityBucket::classify("MEDIUM"), SeverityBucket::Moderate);
        assert_eq!(SeverityBucket::classify("Asthma"), SeverityBucket::Moderate);
        assert_eq!(SeverityBucket::classify("high"), SeverityBucket::High);
        assert_eq!(SeverityBucket::classify("Tuberculosis"), SeverityBucket::High);
        assert_eq!(SeverityBucket::classify(""), SeverityBucket::Unknown);
        assert_eq!(SeverityBucket::classify("pending review"), SeverityBucket::Unknown);
    }

    #[test]
    fn test_first_bucket_wins() {
        // "Asthma (Low)" matches `low` before `asthma`.
        assert_eq!(SeverityBucket::classify("Asthma (Low)"), SeverityBucket::Low);
        // "Tuberculosis (Medium)" matches `medium` before `tuberculosis`.
        assert_eq!(SeverityBucket::classify("Tuberculosis (Medium)"), SeverityBucket::Moderate);
        assert_eq!(SeverityBucket::classify("Asthma (High)"), SeverityBucket::Moderate);
    }

    #[test]
    fn test_icons() {
        assert_eq!(SeverityBucket::Low.icon(), "✓");
        assert_eq!(SeverityBucket::High.icon(), "⚠");
        assert_eq!(SeverityBucket::Unknown.icon(), "●");
    }

    #[test]
    fn test_messages_for_compound_label() {
        let messages = severity_messages("Tuberculosis (High)");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("tuberculosis"));
        assert!(messages[1].starts_with("Several indicators"));
    }

    #[test]
    fn test_no_messages_for_unknown_label() {
        assert!(severity_messages("n/a").is_empty());
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(150.0), 100.0);
        assert_eq!(clamp_probability(-5.0), 0.0);
        assert_eq!(clamp_probability(42.5), 42.5);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
        assert_eq!(clamp_probability(f64::INFINITY), 0.0);
    }
}
