use thiserror_no_std::Error;

/// Result type for AQI conversions
pub type AqiResult<T> = Result<T, AqiError>;

/// Reasons a concentration cannot be converted to an AQI value.
///
/// Both variants describe bad input and are never retried. The caller
/// decides whether to drop the reading, log it, or substitute a default.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiError {
    /// Concentration is below zero (or not a number)
    #[error("concentration cannot be below zero")]
    InvalidInput,

    /// Concentration is above the top of the hazardous breakpoint
    #[error("concentration too high to be calculated by AQI")]
    OutOfRange,
}

#[cfg(feature = "defmt")]
impl defmt::Format for AqiError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidInput => defmt::write!(fmt, "concentration cannot be below zero"),
            Self::OutOfRange => {
                defmt::write!(fmt, "concentration too high to be calculated by AQI")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AqiError::InvalidInput.to_string(),
            "concentration cannot be below zero"
        );
        assert_eq!(
            AqiError::OutOfRange.to_string(),
            "concentration too high to be calculated by AQI"
        );
    }
}
