use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Slack API error: {message}")]
    SlackApiError { message: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatusError { url: String, status: u16 },

    #[error("Unexpected upstream payload: {message}")]
    PayloadError { message: String },

    #[error("Unknown timezone: {name}")]
    UnknownTimezone { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Upstream,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::ConfigError { .. }
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::ConfigValidationError { .. }
            | BotError::UnknownTimezone { .. } => ErrorCategory::Configuration,
            BotError::HttpError(_) => ErrorCategory::Network,
            BotError::SlackApiError { .. } | BotError::UpstreamStatusError { .. } => {
                ErrorCategory::Upstream
            }
            BotError::SerializationError(_)
            | BotError::XmlError(_)
            | BotError::PayloadError { .. } => ErrorCategory::Data,
            BotError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags, environment variables and settings file"
            }
            ErrorCategory::Network => "Check network connectivity and retry",
            ErrorCategory::Upstream => {
                "Check the bot token scopes and the status of the upstream service"
            }
            ErrorCategory::Data => "The upstream payload changed shape; check the endpoint URL",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            BotError::SlackApiError { message } => format!("Slack rejected the request: {}", message),
            BotError::UnknownTimezone { name } => format!("'{}' is not a valid timezone", name),
            other => other.to_string(),
        }
    }

    /// Process exit code for a binary that stops on this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl From<toml::de::Error> for BotError {
    fn from(e: toml::de::Error) -> Self {
        BotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
