#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend server is not responding")]
    BackendUnreachable,

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Error parsing response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::HttpStatus(status.as_u16())
        } else {
            AppError::FetchError(err.to_string())
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
