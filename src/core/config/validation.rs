#![allow(clippy::result_large_err)]

use super::CopyConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::time::Duration;
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &CopyConfig) -> Result<(), AppError> {
        Self::source_timeout(config)?;

        if let Some(command) = &config.output.clipboard_command {
            if command.trim().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ConfigurationError,
                    "output.clipboard_command cannot be blank",
                ));
            }
        }

        if let Some(origin) = config.site.origin.as_deref().map(str::trim) {
            if !origin.is_empty() {
                let parsed = Url::parse(origin).map_err(|e| {
                    AppError::new(
                        ErrorCategory::ConfigurationError,
                        format!("site.origin is not a valid URL: {}", e),
                    )
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::new(
                        ErrorCategory::ConfigurationError,
                        "site.origin must be an http or https URL",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parsed `source.timeout`; must be non-zero
    pub fn source_timeout(config: &CopyConfig) -> Result<Duration, AppError> {
        let timeout = humantime::parse_duration(config.source.timeout.trim()).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("source.timeout '{}' is invalid: {}", config.source.timeout, e),
            )
        })?;
        if timeout.is_zero() {
            return Err(AppError::new(
                ErrorCategory::ConfigurationError,
                "source.timeout must be greater than zero",
            ));
        }
        Ok(timeout)
    }
}
