use thiserror::Error;

/// Broad classification of an [`AppError`], used to name the failing stage
/// in diagnostics and to decide whether a run can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
    Parse,
    Config,
    Io,
    Output,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Authentication errors
    #[error("No stored credential and interactive authorization is unavailable: {message}")]
    AuthMissing { message: String },

    #[error("Authorization server rejected the token exchange ({status}): {message}")]
    AuthRejected { status: u16, message: String },

    #[error("Authorization response could not be read: {message}")]
    AuthMalformed { message: String },

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API request unauthorized ({status}): {url}")]
    ApiUnauthorized { status: u16, url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("League {league_key} has no stat categories configured")]
    NoStatCategories { league_key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    pub fn auth_missing(message: impl Into<String>) -> Self {
        Self::AuthMissing {
            message: message.into(),
        }
    }

    pub fn auth_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::AuthRejected {
            status,
            message: message.into(),
        }
    }

    pub fn auth_malformed(message: impl Into<String>) -> Self {
        Self::AuthMalformed {
            message: message.into(),
        }
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an unauthorized error (401/403 status codes)
    pub fn api_unauthorized(status: u16, url: impl Into<String>) -> Self {
        Self::ApiUnauthorized {
            status,
            url: url.into(),
        }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 401, 403, 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn no_stat_categories(league_key: impl Into<String>) -> Self {
        Self::NoStatCategories {
            league_key: league_key.into(),
        }
    }

    /// Classifies the error into the stage taxonomy used for diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::AuthMissing { .. }
            | AppError::AuthRejected { .. }
            | AppError::AuthMalformed { .. } => ErrorKind::Auth,
            AppError::ApiFetch(_)
            | AppError::ApiNotFound { .. }
            | AppError::ApiUnauthorized { .. }
            | AppError::ApiServerError { .. }
            | AppError::ApiClientError { .. }
            | AppError::ApiRateLimit { .. }
            | AppError::NetworkTimeout { .. }
            | AppError::NetworkConnection { .. } => ErrorKind::Network,
            AppError::ApiParse(_)
            | AppError::ApiMalformedJson { .. }
            | AppError::ApiUnexpectedStructure { .. }
            | AppError::ApiNoData { .. }
            | AppError::NoStatCategories { .. } => ErrorKind::Parse,
            AppError::Config(_)
            | AppError::TomlSerialize(_)
            | AppError::TomlDeserialize(_)
            | AppError::LogSetup(_) => ErrorKind::Config,
            AppError::Io(_) => ErrorKind::Io,
            AppError::Csv(_) => ErrorKind::Output,
        }
    }

    /// Check if error comes from the HTTP transport or a non-success status
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let error = AppError::api_not_found("https://api.example.com/league/x/settings");
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/league/x/settings"
        );

        let error = AppError::auth_rejected(400, "invalid_grant");
        assert_eq!(
            error.to_string(),
            "Authorization server rejected the token exchange (400): invalid_grant"
        );

        let error = AppError::no_stat_categories("nba.l.1234");
        assert_eq!(
            error.to_string(),
            "League nba.l.1234 has no stat categories configured"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(AppError::auth_missing("no token").kind(), ErrorKind::Auth);
        assert_eq!(
            AppError::auth_rejected(401, "nope").kind(),
            ErrorKind::Auth
        );
        assert_eq!(
            AppError::network_timeout("https://x").kind(),
            ErrorKind::Network
        );
        assert_eq!(
            AppError::api_server_error(502, "Bad Gateway", "https://x").kind(),
            ErrorKind::Network
        );
        assert_eq!(
            AppError::api_unexpected_structure("no settings", "https://x").kind(),
            ErrorKind::Parse
        );
        assert_eq!(AppError::config_error("bad").kind(), ErrorKind::Config);
        assert_eq!(
            AppError::Io(std::io::Error::other("disk")).kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn test_is_network() {
        assert!(AppError::api_rate_limit("Too Many Requests", "https://x").is_network());
        assert!(AppError::network_connection("https://x", "refused").is_network());
        assert!(!AppError::api_malformed_json("not json", "https://x").is_network());
        assert!(!AppError::auth_missing("none").is_network());
    }
}
