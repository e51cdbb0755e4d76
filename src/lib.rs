//! BrightPath Academy grade class predictor.
//!
//! A single page form collects seven student attributes, a classifier
//! loaded at startup scores them, and the page shows the predicted
//! grade class (A-F) or the reason the prediction failed.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod web;

pub use config::Config;
pub use data::{
    FeatureVector, ParentalInvolvement, PredictionForm, PredictionRequest, FEATURE_COUNT,
};
pub use error::{ClassifierError, ConfigError, ModelError, PredictionError};
pub use model::{
    argmax, predict, Classifier, GradeClass, LogisticModel, Prediction, GRADE_COUNT,
};
