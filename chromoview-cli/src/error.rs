//! Error handling for the ChromoView CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Unknown chromosome: {id}")]
    UnknownChromosome { id: String },

    #[error("Invalid event #{index}: {message}")]
    InvalidEvent { index: usize, message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<F: Into<String>, M: Into<String>>(file: F, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn unknown_chromosome<S: Into<String>>(id: S) -> Self {
        Self::UnknownChromosome { id: id.into() }
    }

    pub fn invalid_event<S: Into<String>>(index: usize, message: S) -> Self {
        Self::InvalidEvent {
            index,
            message: message.into(),
        }
    }
}

/// Fail with [`CliError::FileNotFound`] unless `path` exists.
pub fn require_file(path: &std::path::Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::file_not_found(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CliError::unknown_chromosome("ChrX").to_string(),
            "Unknown chromosome: ChrX"
        );
        assert_eq!(
            CliError::parse("events.json", "expected array").to_string(),
            "Parsing error in events.json: expected array"
        );
        assert!(require_file(std::path::Path::new("/nonexistent/file.json")).is_err());
    }
}
