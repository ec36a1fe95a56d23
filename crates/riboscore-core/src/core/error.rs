use thiserror::Error;

use crate::oracles::OracleError;

/// Signed status code carried alongside every score at the engine boundary.
///
/// The numbering is split into ranges: `0` is success, `-1..=-999` are
/// application (caller input) errors, and `-2000..=-2999` are system errors
/// reported by an external oracle.
pub type StatusCode = i32;

/// Status code returned by every successful scoring call.
pub const STATUS_OK: StatusCode = 0;

/// Unified error taxonomy for the scoring engine.
///
/// Every validation failure is detected at the entry of the failing
/// component and reported as one of these variants; no failure is ever
/// downgraded to a default score, and none is retried.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("required parameter is empty")]
    EmptyParameter,

    #[error("sequence contains a nucleotide outside {{A, C, G, U}}")]
    InvalidNucleotide,

    #[error("structure contains an element outside the dot-bracket alphabet")]
    InvalidStructElement,

    #[error("structure brackets are unbalanced or mismatched")]
    BadPairMatch,

    #[error("inputs that must be of equal length differ ({left} vs {right})")]
    StructLengthDiffer { left: usize, right: usize },

    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: i64, len: usize },

    #[error("template of {len} nt exceeds the maximum of {max} nt")]
    InvalidTemplateLength { len: usize, max: usize },

    #[error("concentration {value} is below the physical minimum of {min}")]
    InvalidConcentration { value: f64, min: f64 },

    #[error("external oracle failure: {source}")]
    Oracle {
        #[from]
        source: OracleError,
    },
}

impl ScoreError {
    /// Maps the error onto the signed status-code taxonomy.
    ///
    /// Codes `-2..=-6` keep their historical values; the remaining
    /// application errors occupy `-7..=-9`, and oracle failures report in
    /// the system range.
    pub fn status(&self) -> StatusCode {
        match self {
            ScoreError::InvalidNucleotide => -2,
            ScoreError::InvalidStructElement => -3,
            ScoreError::EmptyParameter => -4,
            ScoreError::BadPairMatch => -5,
            ScoreError::StructLengthDiffer { .. } => -6,
            ScoreError::InvalidConcentration { .. } => -7,
            ScoreError::OutOfRange { .. } => -8,
            ScoreError::InvalidTemplateLength { .. } => -9,
            ScoreError::Oracle { .. } => -2001,
        }
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Collapses a scoring result into the flat status-code convention used
/// at the engine boundary.
pub fn status_code<T>(result: &ScoreResult<T>) -> StatusCode {
    match result {
        Ok(_) => STATUS_OK,
        Err(err) => err.status(),
    }
}
