//! Error types for blur operations.

use thiserror::Error;

/// Error type for blur operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value (radius, kernel shape).
    ///
    /// Raised before any buffer is allocated.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The pixel buffer handed to an operation is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] gblur_core::Error),
}

impl OpsError {
    /// Returns `true` for [`OpsError::InvalidParameter`].
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// Returns `true` for [`OpsError::InvalidInput`].
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type for blur operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifiers() {
        let param = OpsError::InvalidParameter("radius must be >= 1".into());
        assert!(param.is_invalid_parameter());
        assert!(!param.is_invalid_input());

        let input: OpsError = gblur_core::Error::SizeMismatch {
            expected: 16,
            actual: 15,
        }
        .into();
        assert!(input.is_invalid_input());
        assert!(!input.is_invalid_parameter());
        assert!(input.to_string().starts_with("invalid input"));
    }
}
