use thiserror::Error;

/// Why a signup is not ready to submit.
///
/// Both variants block submission the same way; they differ only so callers
/// and tests can tell an untouched field from a wrong one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("form is for {expected}, not {actual}")]
    WrongJurisdiction {
        expected: &'static str,
        actual: &'static str,
    },
}

impl EnrichError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EnrichError::Missing(field) | EnrichError::Invalid { field, .. } => Some(*field),
            EnrichError::WrongJurisdiction { .. } => None,
        }
    }
}
