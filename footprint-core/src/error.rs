use footprint_schemas::view::ViewKind;
use thiserror::Error;

/// Failures while reading the historical dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error for file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    Csv(String, #[source] csv::Error),

    #[error("CSV file '{origin}' is missing the required column '{column}'")]
    MissingColumn { origin: String, column: &'static str },

    #[error("CSV file '{origin}', row {row}: cannot parse date '{value}'")]
    InvalidDate {
        origin: String,
        row: usize,
        value: String,
    },

    #[error("CSV file '{origin}', row {row}: column '{column}' holds non-numeric value '{value}'")]
    InvalidNumber {
        origin: String,
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failures while turning submitted form fields into a `UserInput`.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Field '{field}' must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("Field '{field}' must be finite and non-negative, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Nothing to draw for the {0} chart")]
    EmptySeries(ViewKind),

    #[error("The {kind} chart received an invalid value: {reason}")]
    InvalidValue { kind: ViewKind, reason: String },

    #[error("Drawing the {kind} chart failed: {reason}")]
    Drawing { kind: ViewKind, reason: String },

    #[error("Encoding the {kind} chart as PNG failed: {reason}")]
    Encoding { kind: ViewKind, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Factor '{table}.{key}' must be finite and non-negative, got {value}")]
    InvalidFactor {
        table: &'static str,
        key: &'static str,
        value: f64,
    },

    #[error("Habit discount '{key}' must lie within [0, 1], got {value}")]
    InvalidDiscount { key: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Umbrella error for callers that drive a full request.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
