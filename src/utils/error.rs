use thiserror::Error;

/// Message shown to the user whenever the completion provider fails.
/// Provider-specific detail never leaves the log.
pub const ANALYSIS_INTERRUPTED_MESSAGE: &str =
    "운세를 분석하는 도중 천기의 흐름이 끊겼습니다. 잠시 후 다시 시도해주세요.";

#[derive(Error, Debug)]
pub enum SajuError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("{}", ANALYSIS_INTERRUPTED_MESSAGE)]
    Provider { detail: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SajuError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(detail: impl Into<String>) -> Self {
        Self::Provider {
            detail: detail.into(),
        }
    }

    pub fn validation(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Configuration { message } => message.clone(),
            Self::Provider { .. } | Self::Http(_) => ANALYSIS_INTERRUPTED_MESSAGE.to_string(),
            Self::Validation { field, reason, .. } => format!("{}: {}", field, reason),
            Self::ConfigParse { message } => format!("설정 파일을 읽을 수 없습니다: {}", message),
            Self::Io(e) => format!("파일 처리 중 오류가 발생했습니다: {}", e),
            Self::Serialization(e) => format!("데이터 처리 중 오류가 발생했습니다: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "Set API_KEY (or GEMINI_API_KEY) or add [api] key to the config file",
            Self::Provider { .. } | Self::Http(_) => "Wait a moment and submit again",
            Self::Validation { .. } => "Check the input values and try again",
            Self::ConfigParse { .. } => "Make sure the config file is valid TOML",
            Self::Io(_) => "Check that the file exists and is readable",
            Self::Serialization(_) => "Check the data format",
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Provider { .. } | Self::Http(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SajuError>;
