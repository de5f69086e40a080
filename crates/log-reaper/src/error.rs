//! Configuration validation errors

use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// max_deletes_per_sec is zero
    #[error("max_deletes_per_sec must be at least 1")]
    InvalidDeleteRate,

    /// page_size is outside what the listing APIs accept
    #[error("page_size must be between 1 and {max}, got {got}")]
    InvalidPageSize { got: i32, max: i32 },

    /// region was given but is blank
    #[error("region cannot be empty")]
    EmptyRegion,

    /// aws_profile was given but is blank
    #[error("aws_profile cannot be empty")]
    EmptyProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::InvalidDeleteRate.to_string(),
            "max_deletes_per_sec must be at least 1"
        );
        assert_eq!(
            ConfigError::InvalidPageSize { got: 51, max: 50 }.to_string(),
            "page_size must be between 1 and 50, got 51"
        );
    }
}
