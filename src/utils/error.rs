use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Missing required email config: {keys:?}")]
    MissingConfig { keys: Vec<String> },

    #[error("Email message error: {0}")]
    EmailMessage(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    EmailAddress(#[from] lettre::address::AddressError),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Scraping error: {0}")]
    Scraping(String),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_missing_config_message() {
        let err = AppError::MissingConfig {
            keys: vec!["FROM_EMAIL".to_string(), "TO_EMAIL".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"Missing required email config: ["FROM_EMAIL", "TO_EMAIL"]"#
        );
    }

    #[test]
    fn test_scraping_error_message() {
        let err = AppError::Scraping("page gave no content".to_string());
        assert_eq!(err.to_string(), "Scraping error: page gave no content");
    }
}
