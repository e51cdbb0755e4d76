use thiserror::Error;

/// Why a single prediction could not be produced.
///
/// Every variant ends up in the page as a danger alert carrying its
/// `Display` text; none of them is fatal to the server.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("missing value for {0}")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for {field}: expected a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid parental involvement level {0:?}: expected 0, 1, 2, 3 or 4")]
    InvalidLevel(String),

    #[error("could not read submitted form: {0}")]
    InvalidForm(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier returned no scores")]
    EmptyScores,

    #[error("classifier expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("classifier panicked: {0}")]
    Panicked(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Failures while loading the model file at startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model takes {actual} features, expected {expected}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("model scores {actual} classes, expected one per grade ({expected})")]
    ClassCount { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected a port number")]
    InvalidPort(String),
}
