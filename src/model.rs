use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use linfa_logistic::MultiFittedLogisticRegression;
use ndarray::Array2;

use crate::data::{FeatureVector, PredictionForm, PredictionRequest, FEATURE_COUNT};
use crate::error::{ClassifierError, ModelError, PredictionError};

/// Number of grade classes a classifier must score, one per letter A-F.
pub const GRADE_COUNT: usize = 5;

/// Anything that can score a feature vector against the grade classes.
///
/// Loaded once at startup and shared read-only between workers, so
/// implementations must not rely on interior state per call.
pub trait Classifier: Send + Sync {
    fn scores(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;
}

/// Multinomial logistic regression fitted offline and shipped as JSON.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    fitted: MultiFittedLogisticRegression<f64, usize>,
}

impl LogisticModel {
    pub fn new(fitted: MultiFittedLogisticRegression<f64, usize>) -> Result<Self, ModelError> {
        let params = fitted.params();
        if params.nrows() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: params.nrows(),
            });
        }
        // Score columns follow the sorted training labels, so a model that
        // never saw some grade would shift every letter after it.
        if params.ncols() != GRADE_COUNT {
            return Err(ModelError::ClassCount {
                expected: GRADE_COUNT,
                actual: params.ncols(),
            });
        }
        Ok(Self { fitted })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let fitted: MultiFittedLogisticRegression<f64, usize> = serde_json::from_str(json)?;
        Self::new(fitted)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn class_count(&self) -> usize {
        self.fitted.params().ncols()
    }
}

impl Classifier for LogisticModel {
    fn scores(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        let input = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let probabilities = self.fitted.predict_probabilities(&input);
        Ok(probabilities.row(0).to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeClass {
    A,
    B,
    C,
    D,
    F,
}

impl GradeClass {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GradeClass::A),
            1 => Some(GradeClass::B),
            2 => Some(GradeClass::C),
            3 => Some(GradeClass::D),
            4 => Some(GradeClass::F),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeClass::A => "A",
            GradeClass::B => "B",
            GradeClass::C => "C",
            GradeClass::D => "D",
            GradeClass::F => "F",
        }
    }
}

impl fmt::Display for GradeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub class_index: usize,
    /// `None` when the classifier picked an index outside the grade table.
    pub grade: Option<GradeClass>,
}

impl Prediction {
    pub fn from_index(class_index: usize) -> Self {
        Self {
            class_index,
            grade: GradeClass::from_index(class_index),
        }
    }

    pub fn label(&self) -> &'static str {
        self.grade.map_or("Unknown", GradeClass::as_str)
    }
}

/// Index of the highest score. Ties go to the lowest index; a NaN counts
/// as the maximum, so the first NaN wins.
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            return Some(i);
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Handle one form submission: normalize, score, pick the class.
pub fn predict(
    classifier: &dyn Classifier,
    form: &PredictionForm,
) -> Result<Prediction, PredictionError> {
    let request = PredictionRequest::from_form(form)?;
    let features = request.features();

    let scores = panic::catch_unwind(AssertUnwindSafe(|| classifier.scores(&features)))
        .map_err(|payload| ClassifierError::Panicked(panic_message(payload.as_ref())))??;

    let class_index = argmax(&scores).ok_or(ClassifierError::EmptyScores)?;
    Ok(Prediction::from_index(class_index))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
