use liturgia_model::MalformedDocument;
use thiserror::Error;

/// Why a fetch cycle produced no page. None of these are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error: server returned status {status}")]
    Http { status: u16 },

    /// No complete response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport failure before any response: DNS, refused, unreachable.
    #[error("connection failed")]
    Connection,

    /// Anything else that went wrong during the request, including a body
    /// that is not a liturgy document.
    #[error("unexpected error: {message}")]
    Unexpected { message: String },

    #[error(transparent)]
    Malformed(#[from] MalformedDocument),
}

impl FetchError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected { message: message.into() }
    }

    /// Classify a transport-level error, most specific first.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Http { status: status.as_u16() };
        }
        // A connect that timed out reports both; the timeout wins.
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection
        } else {
            Self::unexpected(err.to_string())
        }
    }
}
