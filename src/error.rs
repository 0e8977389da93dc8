use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedPulseError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error), // Transport failures, timeouts, bad bodies

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    LoggingError(#[from] flexi_logger::FlexiLoggerError),

    #[error("Error: {0}")]
    Error(String), // Allows custom application errors
}
