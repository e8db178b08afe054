//! Unified error types for the atelier application.

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// File validation failures in the upload wizard.
///
/// Both are recovered locally: the step state is left untouched and the
/// user is told why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid file type '.{extension}': please upload a {allowed} file")]
    InvalidFileType { extension: String, allowed: String },

    #[error("File too large ({size_bytes} bytes): the limit is {max_bytes} bytes")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

/// Illegal wizard transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Upload a tech pack before skipping the remaining steps")]
    TechPackRequired,

    #[error("Upload a file for this step before continuing")]
    StepIncomplete,

    #[error("Some steps still need a file")]
    Incomplete,
}

/// Manufacturer catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed catalog data: {0}")]
    Fixture(#[from] serde_json::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for upload validation
pub type UploadResult<T> = std::result::Result<T, UploadError>;
