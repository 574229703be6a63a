use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DtExtractError {
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Cannot access file {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No {marker} values found in {path}")]
    NoValuesFound { path: String, marker: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl DtExtractError {
    pub fn file_access<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        DtExtractError::FileAccess {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DtExtractError {
    fn user_message(&self) -> String {
        match self {
            DtExtractError::Usage { message } => message.clone(),
            DtExtractError::FileAccess { path, source } => {
                format!("Cannot access {}: {}", path, source)
            }
            DtExtractError::NoValuesFound { marker, .. } => {
                format!("No {} values found in log!", marker)
            }
            DtExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DtExtractError::NoValuesFound { .. } => {
                Some("Make sure you're using the data capture firmware.".to_string())
            }
            DtExtractError::FileAccess { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => {
                    Some("Check that the log file path is spelled correctly.".to_string())
                }
                std::io::ErrorKind::PermissionDenied => Some(
                    "Ensure you have read permission on the log and write permission on its directory."
                        .to_string(),
                ),
                _ => None,
            },
            DtExtractError::Config { .. } => Some(
                "Check dt-extract.toml syntax and ensure all values are valid.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DtExtractError {
    fn from(error: toml::de::Error) -> Self {
        DtExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DtExtractError>;
