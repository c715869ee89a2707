//! Error types for finboard-config

use std::fmt;
use thiserror::Error;

/// Stable error codes, printed in brackets ahead of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    FileNotFound,
    Unreadable,
    InvalidYaml,
    MissingField,
    InvalidValue,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::Unreadable => "UNREADABLE",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::MissingField => "MISSING_FIELD",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup diagnostic: what went wrong, where, and how to fix it
#[derive(Debug, Clone)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    /// Dotted config key (`server.port`) for value errors
    pub field: Option<String>,
    /// `line:column` inside the YAML document for parse errors
    pub location: Option<String>,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, "\n  field: {}", field)?;
        }
        if let Some(location) = &self.location {
            write!(f, "\n  at: {}", location)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read config file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {message}")]
    InvalidYaml {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        ConfigError::InvalidYaml {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::Unreadable { .. } => ConfigErrorCode::Unreadable,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
        }
    }

    /// Build the diagnostic printed by the CLI before it exits
    pub fn to_details(&self) -> ConfigErrorDetails {
        let mut details = ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field: None,
            location: None,
            hint: None,
        };

        match self {
            ConfigError::FileNotFound { .. } => {
                details.hint = Some("Pass --config <path>, or --print-default-config > config.yaml".to_string());
            }
            ConfigError::Unreadable { source, .. } => {
                details.hint = Some(format!("Check file permissions ({})", source));
            }
            ConfigError::InvalidYaml { line, column, .. } => {
                if let (Some(line), Some(column)) = (line, column) {
                    details.location = Some(format!("{}:{}", line, column));
                }
                details.hint = Some("Compare with the output of --print-default-config".to_string());
            }
            ConfigError::MissingField { field } => {
                details.field = Some(field.clone());
                details.hint = Some(format!("Set '{}' to a non-empty value", field));
            }
            ConfigError::InvalidValue { field, .. } => {
                details.field = Some(field.clone());
            }
        }

        details
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
