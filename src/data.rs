use serde::Deserialize;

use crate::error::PredictionError;

/// Number of inputs the grade classifier was trained on.
pub const FEATURE_COUNT: usize = 7;

/// Feature vector in training order: study time, absences, tutoring,
/// parental involvement, extracurricular, sport, music.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Raw form submission. Everything arrives as optional text; turning it
/// into numbers is `PredictionRequest::from_form`'s job.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PredictionForm {
    pub study_time: Option<String>,
    pub absences: Option<String>,
    pub tutoring: Option<String>,
    pub parental_involvement: Option<String>,
    pub extracurricular: Option<String>,
    pub sport: Option<String>,
    pub music: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentalInvolvement {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ParentalInvolvement {
    pub const ALL: [ParentalInvolvement; 5] = [
        ParentalInvolvement::None,
        ParentalInvolvement::Low,
        ParentalInvolvement::Moderate,
        ParentalInvolvement::High,
        ParentalInvolvement::VeryHigh,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        match self {
            ParentalInvolvement::None => 0,
            ParentalInvolvement::Low => 1,
            ParentalInvolvement::Moderate => 2,
            ParentalInvolvement::High => 3,
            ParentalInvolvement::VeryHigh => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParentalInvolvement::None => "None",
            ParentalInvolvement::Low => "Low",
            ParentalInvolvement::Moderate => "Moderate",
            ParentalInvolvement::High => "High",
            ParentalInvolvement::VeryHigh => "Very High",
        }
    }
}

/// One submission, normalized. Built fresh per submit and dropped once
/// the prediction is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub study_time: f64,
    pub absences: f64,
    pub tutoring: bool,
    pub parental_involvement: ParentalInvolvement,
    pub extracurricular: bool,
    pub sport: bool,
    pub music: bool,
}

impl PredictionRequest {
    pub fn from_form(form: &PredictionForm) -> Result<Self, PredictionError> {
        Ok(Self {
            study_time: parse_number("study_time", form.study_time.as_deref())?,
            absences: parse_number("absences", form.absences.as_deref())?,
            tutoring: is_yes(form.tutoring.as_deref()),
            parental_involvement: parse_level(form.parental_involvement.as_deref())?,
            extracurricular: is_yes(form.extracurricular.as_deref()),
            sport: is_yes(form.sport.as_deref()),
            music: is_yes(form.music.as_deref()),
        })
    }

    /// The field order here must match the order the model was trained on.
    pub fn features(&self) -> FeatureVector {
        [
            self.study_time,
            self.absences,
            flag(self.tutoring),
            f64::from(self.parental_involvement.code()),
            flag(self.extracurricular),
            flag(self.sport),
            flag(self.music),
        ]
    }
}

// Anything other than the literal "Yes" counts as no, including a
// radio group left untouched.
fn is_yes(value: Option<&str>) -> bool {
    value == Some("Yes")
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, PredictionError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PredictionError::MissingField(field)),
    }
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<f64, PredictionError> {
    let raw = required(field, value)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(PredictionError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_level(value: Option<&str>) -> Result<ParentalInvolvement, PredictionError> {
    let raw = required("parental_involvement", value)?;
    raw.parse::<u8>()
        .ok()
        .and_then(ParentalInvolvement::from_code)
        .ok_or_else(|| PredictionError::InvalidLevel(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(
        study_time: &str,
        absences: &str,
        tutoring: &str,
        parental: &str,
        extracurricular: &str,
        sport: &str,
        music: &str,
    ) -> PredictionForm {
        PredictionForm {
            study_time: Some(study_time.to_string()),
            absences: Some(absences.to_string()),
            tutoring: Some(tutoring.to_string()),
            parental_involvement: Some(parental.to_string()),
            extracurricular: Some(extracurricular.to_string()),
            sport: Some(sport.to_string()),
            music: Some(music.to_string()),
        }
    }

    #[test]
    fn test_features_in_training_order() {
        let f = form("12.5", "3", "Yes", "2", "No", "No", "Yes");
        let request = PredictionRequest::from_form(&f).unwrap();

        assert_eq!(request.features(), [12.5, 3.0, 1.0, 2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_yes_no_mapping() {
        let request =
            PredictionRequest::from_form(&form("1", "0", "No", "0", "Yes", "Yes", "No")).unwrap();
        let features = request.features();

        assert_eq!(features[2], 0.0);
        assert_eq!(features[4], 1.0);
        assert_eq!(features[5], 1.0);
        assert_eq!(features[6], 0.0);
    }

    #[test]
    fn test_unanswered_radio_counts_as_no() {
        let mut f = form("4", "10", "Yes", "3", "Yes", "Yes", "Yes");
        f.tutoring = None;
        f.music = Some("yes".to_string());

        let request = PredictionRequest::from_form(&f).unwrap();
        assert!(!request.tutoring);
        assert!(!request.music);
    }

    #[test]
    fn test_missing_parental_involvement() {
        let mut f = form("4", "10", "Yes", "3", "No", "No", "No");
        f.parental_involvement = None;

        let err = PredictionRequest::from_form(&f).unwrap_err();
        assert!(matches!(err, PredictionError::MissingField("parental_involvement")));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_blank_number_is_missing() {
        let f = form("  ", "1", "No", "1", "No", "No", "No");
        let err = PredictionRequest::from_form(&f).unwrap_err();
        assert!(matches!(err, PredictionError::MissingField("study_time")));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for bad in ["abc", "NaN", "inf"] {
            let f = form("2", bad, "No", "1", "No", "No", "No");
            let err = PredictionRequest::from_form(&f).unwrap_err();
            assert!(
                matches!(err, PredictionError::InvalidNumber { field: "absences", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_level_outside_table_rejected() {
        for bad in ["5", "-1", "2.5", "High"] {
            let f = form("2", "1", "No", bad, "No", "No", "No");
            let err = PredictionRequest::from_form(&f).unwrap_err();
            assert!(matches!(err, PredictionError::InvalidLevel(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let request =
            PredictionRequest::from_form(&form("25", "-3", "No", "4", "No", "No", "No")).unwrap();
        assert_eq!(request.study_time, 25.0);
        assert_eq!(request.absences, -3.0);
        assert_eq!(request.parental_involvement, ParentalInvolvement::VeryHigh);
    }

    #[test]
    fn test_level_codes_round_trip_through_table() {
        for level in ParentalInvolvement::ALL {
            assert_eq!(ParentalInvolvement::from_code(level.code()), Some(level));
        }
        assert_eq!(ParentalInvolvement::from_code(5), None);
    }
}
