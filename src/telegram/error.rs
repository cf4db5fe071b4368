//! Error types for Telegram Bot API calls.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for Telegram Bot API calls.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The bot token does not form a valid API URL.
    #[error("Invalid bot token: {0}")]
    InvalidToken(#[source] url::ParseError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Non-success status without a parseable API response.
    #[error("HTTP {status}")]
    Status {
        /// Returned status code.
        status: http::StatusCode,
    },

    /// The API answered with `ok: false`.
    #[error("Telegram API error: {description}")]
    Api {
        /// Description returned by the API.
        description: String,
    },

    /// The response body was not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_description() {
        let error = TelegramError::Api {
            description: "Unauthorized".to_string(),
        };
        assert_eq!(error.to_string(), "Telegram API error: Unauthorized");
    }

    #[test]
    fn http_error_is_transparent() {
        let error: TelegramError = HttpError::Timeout.into();
        assert_eq!(error.to_string(), "Request timed out");
    }
}
