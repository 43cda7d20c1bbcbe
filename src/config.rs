use serde::{Deserialize, Serialize};
use std::env;

use crate::utils::error::{AppError, Result};

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP settings for the alert digest, supplied through the environment and
/// read-only for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub from_email: String,
    pub password: String,
    pub to_email: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl EmailConfig {
    /// Read settings from `FROM_EMAIL`, `EMAIL_PASSWORD`, `TO_EMAIL`,
    /// `SMTP_SERVER` and `SMTP_PORT`. Required keys that are unset or blank
    /// abort the run before any network activity, reported together.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let trimmed = |key: &str| -> String {
            lookup(key).unwrap_or_default().trim().to_string()
        };

        let from_email = trimmed("FROM_EMAIL");
        let password = trimmed("EMAIL_PASSWORD");
        let to_email = trimmed("TO_EMAIL");

        let mut missing = Vec::new();
        if from_email.is_empty() {
            missing.push("FROM_EMAIL".to_string());
        }
        if password.is_empty() {
            missing.push("EMAIL_PASSWORD".to_string());
        }
        if to_email.is_empty() {
            missing.push("TO_EMAIL".to_string());
        }
        if !missing.is_empty() {
            return Err(AppError::MissingConfig { keys: missing });
        }

        let smtp_server = match trimmed("SMTP_SERVER") {
            server if server.is_empty() => DEFAULT_SMTP_SERVER.to_string(),
            server => server,
        };
        // Non-numeric or out-of-range ports fall back to the default.
        let smtp_port = trimmed("SMTP_PORT").parse().unwrap_or(DEFAULT_SMTP_PORT);

        Ok(Self {
            from_email,
            password,
            to_email,
            smtp_server,
            smtp_port,
        })
    }
}
