use thiserror::Error;

use crate::domain::ParseCentsError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        reason: ParseCentsError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
