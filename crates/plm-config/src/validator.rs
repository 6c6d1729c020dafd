//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, StoreBackend};

const KNOWN_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the errors into a single `ConfigError`, if any.
    pub fn into_error(self) -> Option<ConfigError> {
        let first = self.errors.into_iter().next()?;
        Some(ConfigError::InvalidValue {
            field: first.path,
            message: first.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_service(config, &mut result);
        Self::validate_store(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_service(config: &Config, result: &mut ValidationResult) {
        if config.service.default_provider.trim().is_empty() {
            result.add_error(ValidationError::new(
                "service.default_provider",
                "Default provider type cannot be empty",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        match config.store.backend {
            StoreBackend::Sqlite => {
                if config.store.path.as_os_str().is_empty() {
                    result.add_error(ValidationError::new(
                        "store.path",
                        "SQLite backend requires a database path",
                    ));
                }
            }
            StoreBackend::Memory => {
                if !config.service.bootstrap {
                    return;
                }
                result.add_warning(ValidationWarning::new(
                    "store.backend",
                    "Memory backend starts empty, bootstrap will restore nothing",
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim();
        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
            return;
        }

        // Directives like `plm_core=debug` are passed through to the filter as-is.
        if !level.contains('=') && !KNOWN_LEVELS.contains(&level.to_lowercase().as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    level, KNOWN_LEVELS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
