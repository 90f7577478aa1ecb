use colored::*;
use std::fmt;

#[derive(Debug, Clone)]
pub enum IssueDeskError {
    // Configuration errors
    ConfigInvalid(String),
    ConfigValidationFailed(String),

    // API errors
    IssueNotFound(String),
    ApiError(u16, String),
    InvalidResponse(String),

    // Navigation errors
    UnknownRoute(String),

    // Network errors
    NetworkError(String),

    // Generic error
    Other(String),
}

impl IssueDeskError {
    /// True for failures that never reached the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, IssueDeskError::NetworkError(_))
    }
}

impl fmt::Display for IssueDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            IssueDeskError::ConfigInvalid(msg) => {
                write!(f, "{}\n", "Invalid configuration".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check your config file: ~/.issuedesk/config.toml\n")?;
                write!(f, "   2. Or reinitialize: {}", "issuedesk init".green())
            }
            IssueDeskError::ConfigValidationFailed(msg) => {
                write!(f, "{}\n", "Configuration validation failed".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check the API base URL is correct\n")?;
                write!(f, "   2. Verify the server is running\n")?;
                write!(f, "   3. Update it: {}", "issuedesk config set api.base_url <url>".green())
            }

            // API errors
            IssueDeskError::IssueNotFound(id) => {
                write!(f, "{}\n", format!("Issue '{}' not found", id).red().bold())?;
                write!(f, "   {}\n\n", "The server has no issue with this id".dimmed())?;
                write!(f, "   Browse existing issues: {}", "issuedesk list".green())
            }
            IssueDeskError::ApiError(status, msg) => {
                write!(f, "{}\n", format!("Issue API error ({})", status).red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   Try again or check the server logs")
            }
            IssueDeskError::InvalidResponse(msg) => {
                write!(f, "{}\n", "Unexpected response from the server".red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }

            // Navigation errors
            IssueDeskError::UnknownRoute(path) => {
                write!(f, "{}\n", format!("No page at '{}'", path).red().bold())?;
                write!(f, "   {}", "Known paths: / and issues/<id>".dimmed())
            }

            // Network errors
            IssueDeskError::NetworkError(msg) => {
                write!(f, "{}\n", "Network error".red().bold())?;
                write!(f, "   {}\n\n", msg.dimmed())?;
                write!(f, "   To fix:\n")?;
                write!(f, "   1. Check the server is reachable\n")?;
                write!(f, "   2. Verify the base URL: {}\n", "issuedesk config show".green())?;
                write!(f, "   3. Try again in a moment")
            }

            // Generic
            IssueDeskError::Other(msg) => {
                write!(f, "{}\n", "Error".red().bold())?;
                write!(f, "   {}", msg.dimmed())
            }
        }
    }
}

impl std::error::Error for IssueDeskError {}

impl From<reqwest::Error> for IssueDeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            IssueDeskError::NetworkError(err.to_string())
        } else if err.is_decode() || err.is_body() {
            IssueDeskError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            IssueDeskError::ApiError(status.as_u16(), err.to_string())
        } else {
            IssueDeskError::Other(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, IssueDeskError>;
