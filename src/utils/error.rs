use std::fmt;
use thiserror::Error;

/// Which remote resource a lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    List,
    Watchlist,
    Rating,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::List => "list",
            ResourceKind::Watchlist => "watchlist",
            ResourceKind::Rating => "rating",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ImdbError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("imdb authorization failure on {method} {url} - update the imdb cookie values")]
    AuthorizationError { method: String, url: String },

    #[error("imdb {kind} {} not found", .id.as_deref().unwrap_or("resource"))]
    ResourceNotFoundError {
        kind: ResourceKind,
        id: Option<String>,
    },

    #[error("unexpected status code {status} on {method} {url}")]
    UnexpectedStatusError {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Scrape error: {message}")]
    ScrapeError { message: String },

    #[error("Malformed export: {message}")]
    MalformedExportError { message: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ImdbError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ImdbError::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn invalid_value(field: &str, value: impl fmt::Display, reason: impl Into<String>) -> Self {
        ImdbError::ConfigurationError {
            message: format!(
                "invalid value for '{}' ({}): {}",
                field,
                value,
                reason.into()
            ),
        }
    }

    pub fn scrape(message: impl Into<String>) -> Self {
        ImdbError::ScrapeError {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ImdbError::MalformedExportError {
            message: message.into(),
        }
    }

    pub fn not_found(kind: ResourceKind, id: Option<&str>) -> Self {
        ImdbError::ResourceNotFoundError {
            kind,
            id: id.map(str::to_string),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ImdbError::ResourceNotFoundError { .. })
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, ImdbError::AuthorizationError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImdbError::ConfigurationError { .. } => {
                "Check the configuration file and environment variables"
            }
            ImdbError::AuthorizationError { .. } => {
                "Log in to imdb again and copy fresh at-main and ubid-main cookie values"
            }
            ImdbError::ResourceNotFoundError { .. } => {
                "Verify the list still exists and is visible to the logged in account"
            }
            ImdbError::UnexpectedStatusError { .. } | ImdbError::TransportError(_) => {
                "Check network connectivity and try again later"
            }
            ImdbError::ScrapeError { .. } | ImdbError::MalformedExportError { .. } => {
                "The imdb page or export format may have changed; check for an update"
            }
            ImdbError::IoError(_) | ImdbError::SerializationError(_) => {
                "Check that the output location is writable"
            }
        }
    }

    /// Process exit code used by the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImdbError::ConfigurationError { .. } => 2,
            ImdbError::AuthorizationError { .. } => 3,
            ImdbError::ResourceNotFoundError { .. } => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_id() {
        let err = ImdbError::not_found(ResourceKind::List, Some("ls123"));
        assert_eq!(err.to_string(), "imdb list ls123 not found");
        assert!(err.is_not_found());

        let err = ImdbError::not_found(ResourceKind::Rating, None);
        assert_eq!(err.to_string(), "imdb rating resource not found");
    }

    #[test]
    fn test_exit_codes() {
        let err = ImdbError::AuthorizationError {
            method: "GET".to_string(),
            url: "https://www.imdb.com/profile".to_string(),
        };
        assert!(err.is_authorization());
        assert_eq!(err.exit_code(), 3);
        assert_eq!(ImdbError::configuration("bad").exit_code(), 2);
        assert_eq!(ImdbError::scrape("gone").exit_code(), 1);
    }
}
