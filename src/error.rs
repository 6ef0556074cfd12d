use crate::storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Reqwest(String),
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Filesystem I/O error: {0}")]
    Io(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("JSON serialization error: {0}")]
    SerdeSerialize(String),
    #[error("JSON parsing error: {0}")]
    SerdeParse(String),
    #[error("Required HTML element missing: {element} (Page: {url})")]
    HtmlStructure { element: String, url: String },
    #[error("Could not read result count '{text}' (Category: {category})")]
    ResultCount { text: String, category: String },
    #[error("Invalid URL '{url}': {message}")]
    Url { url: String, message: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid argument provided: {0}")]
    Argument(String),
    #[error("Tokio task join error: {0}")]
    JoinError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Reqwest(e.to_string())
    }
}
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}
impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Csv(e.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() || e.is_eof() || e.is_syntax() {
            AppError::SerdeParse(e.to_string())
        } else {
            AppError::SerdeSerialize(e.to_string())
        }
    }
}
impl From<JoinError> for AppError {
    fn from(e: JoinError) -> Self {
        AppError::JoinError(e.to_string())
    }
}
impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn missing_element<S: Into<String>>(element: S, url: &str) -> AppError {
        AppError::HtmlStructure {
            element: element.into(),
            url: url.to_string(),
        }
    }

    pub fn result_count<S: Into<String>>(text: S, category: &str) -> AppError {
        AppError::ResultCount {
            text: text.into(),
            category: category.to_string(),
        }
    }

    pub fn bad_url<S: Into<String>>(url: &str, message: S) -> AppError {
        AppError::Url {
            url: url.to_string(),
            message: message.into(),
        }
    }
}
