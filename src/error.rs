use thiserror::Error;

/// Errors raised by the resort table and the ranking / filter engine.
///
/// The loader and the UI shell wrap these in `anyhow::Error`; callers that
/// need to tell them apart can `downcast_ref::<DataError>()`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    /// One or more required columns are absent. Fatal at load time.
    #[error("dataset is missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A required cell is blank, non-numeric or not finite.
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Rank lookup for a resort name that is not in the table.
    #[error("no resort named '{0}'")]
    NotFound(String),

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("unknown amenity '{0}'")]
    UnknownAmenity(String),
}
