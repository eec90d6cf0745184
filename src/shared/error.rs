use thiserror::Error;
use serde::Serialize;

/// Message shown to the user whenever a rate refresh fails.
pub const ERR_CURRENCY_SERVICE: &str = "Unable to connect to currency service.";

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConverterError {
    /// Amount text that does not parse to a finite number
    #[error("Input Error: {0}")]
    Input(String),

    /// Unit code missing from the active catalog or snapshot
    #[error("Lookup Error: {0}")]
    Lookup(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Parse Error: {0}")]
    Parse(String),

    /// Currency name or symbol could not be resolved
    #[error("Label Resolution Error: {0}")]
    LabelResolution(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl ConverterError {
    /// Text surfaced in the status indicator. Only fetch failures are user-visible.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ConverterError::Network(_) | ConverterError::Parse(_) => Some(ERR_CURRENCY_SERVICE),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for ConverterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConverterError::Parse(err.to_string())
        } else {
            ConverterError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConverterError {
    fn from(err: serde_json::Error) -> Self {
        ConverterError::Parse(format!("Serialization error: {}", err))
    }
}

pub type ConverterResult<T> = Result<T, ConverterError>;
