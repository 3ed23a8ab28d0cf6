//! Error types for evaluation runs
//!
//! An evaluation is a deterministic, single-pass batch computation: any
//! error aborts the run rather than being locally recovered, since
//! continuing would corrupt the longitudinal assignment history.

use std::fmt;

/// Errors that can occur while preparing or running an evaluation
#[derive(Debug, Clone)]
pub enum EvalError {
    /// An entity has more than one record at a single timestamp
    DuplicateTimestamp {
        /// Entity ID with the duplicate record
        id: u32,
        /// Timestamp at which the duplicate occurs
        time: f64,
    },

    /// No recognized time column in an input table
    MissingTimeField {
        /// The column names that were found
        fields: Vec<String>,
    },

    /// No ID column in an input table
    MissingIdField,

    /// A table row that cannot be interpreted
    MalformedTable {
        /// 1-based line number in the input
        line: usize,
        /// What went wrong on that line
        reason: String,
    },

    /// Failed to read an input file
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// Inconsistent gate/cost constants, rejected before any timestep runs
    Configuration {
        /// Description of the inconsistency
        reason: String,
    },

    /// Assignment solver contract violation
    Association(AssociationError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DuplicateTimestamp { id, time } => {
                write!(f, "entity {} has duplicate records at time {}", id, time)
            }
            EvalError::MissingTimeField { fields } => {
                write!(f, "no T or TIME column among {:?}", fields)
            }
            EvalError::MissingIdField => write!(f, "no ID column in table"),
            EvalError::MalformedTable { line, reason } => {
                write!(f, "malformed table at line {}: {}", line, reason)
            }
            EvalError::Io { path, reason } => {
                write!(f, "failed to read {}: {}", path, reason)
            }
            EvalError::Configuration { reason } => {
                write!(f, "configuration error: {}", reason)
            }
            EvalError::Association(e) => write!(f, "association failed: {}", e),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Association(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AssociationError> for EvalError {
    fn from(e: AssociationError) -> Self {
        EvalError::Association(e)
    }
}

/// Errors from the optimal assignment solver
///
/// Given the cost matrix construction (one synthetic fallback row per track
/// column), none of these should occur during a normal run; they indicate a
/// broken caller rather than bad input data.
#[derive(Debug, Clone)]
pub enum AssociationError {
    /// More columns than rows, so no complete column assignment exists
    ShapeMismatch {
        /// Row count of the offending matrix
        rows: usize,
        /// Column count of the offending matrix
        cols: usize,
    },

    /// A cost entry is NaN or infinite
    NonFiniteCost {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
    },
}

impl fmt::Display for AssociationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssociationError::ShapeMismatch { rows, cols } => {
                write!(
                    f,
                    "cost matrix has {} columns but only {} rows",
                    cols, rows
                )
            }
            AssociationError::NonFiniteCost { row, col } => {
                write!(f, "non-finite cost at ({}, {})", row, col)
            }
        }
    }
}

impl std::error::Error for AssociationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_display() {
        let err = EvalError::DuplicateTimestamp { id: 7, time: 3.5 };
        assert!(err.to_string().contains("7"));
        assert!(err.to_string().contains("3.5"));

        let err = EvalError::Configuration {
            reason: "gate must be positive".to_string(),
        };
        assert!(err.to_string().contains("gate must be positive"));
    }

    #[test]
    fn test_association_error_display() {
        let err = AssociationError::ShapeMismatch { rows: 2, cols: 5 };
        assert!(err.to_string().contains("5 columns"));
    }

    #[test]
    fn test_error_conversion() {
        let assoc = AssociationError::ShapeMismatch { rows: 1, cols: 2 };
        let err: EvalError = assoc.into();
        assert!(matches!(err, EvalError::Association(_)));
    }
}
