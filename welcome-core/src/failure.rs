use crate::messages::MessageKey;

/// Text a transport puts in its message when the network itself failed.
pub const NETWORK_ERROR_TEXT: &str = "Network Error";

/// Transport-level code attached to a failure that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCode {
    /// The client gave up waiting (request timeout elapsed).
    TimedOut,
    /// The connection could not be established or was dropped.
    Network,
    Other(String),
}

/// A failed request as reported by a transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.status, .message))]
pub struct RequestFailure {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    pub code: Option<TransportCode>,
    pub message: String,
}

impl RequestFailure {
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            code: None,
            message: format!("Request failed with status code {status}"),
        }
    }

    #[must_use]
    pub fn timed_out(timeout_ms: u32) -> Self {
        Self {
            status: None,
            code: Some(TransportCode::TimedOut),
            message: format!("timeout of {timeout_ms}ms exceeded"),
        }
    }

    #[must_use]
    pub fn network(detail: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            code: Some(TransportCode::Network),
            message: format!("{NETWORK_ERROR_TEXT}: {detail}"),
        }
    }

    /// A transport failure with an adapter-specific code, such as a
    /// request that could not be built.
    #[must_use]
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: Some(TransportCode::Other(code.into())),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }
}

fn describe(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP {status}: {message}"),
        None => message.to_string(),
    }
}

/// Why a session check did not yield a valid session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionFailure {
    #[error("session reported as invalid")]
    InvalidSession,
    #[error("session not found")]
    NotFound,
    #[error("server error")]
    ServerError,
    #[error("session check timed out")]
    Timeout,
    #[error("server unavailable")]
    NetworkUnavailable,
    #[error("session check failed: {0}")]
    Unknown(String),
}

impl SessionFailure {
    /// Classify a transport failure.
    ///
    /// A received response is judged by status only; transport codes and the
    /// message text are consulted only when no response arrived.
    #[must_use]
    pub fn classify(failure: &RequestFailure) -> Self {
        match failure.status {
            Some(404) => Self::NotFound,
            Some(500) => Self::ServerError,
            Some(_) => Self::Unknown(failure.to_string()),
            None => match failure.code {
                Some(TransportCode::TimedOut) => Self::Timeout,
                Some(TransportCode::Network) => Self::NetworkUnavailable,
                _ if failure.message.contains(NETWORK_ERROR_TEXT) => Self::NetworkUnavailable,
                _ => Self::Unknown(failure.message.clone()),
            },
        }
    }

    #[must_use]
    pub const fn message_key(&self) -> MessageKey {
        match self {
            Self::NotFound => MessageKey::SessionNotFound,
            Self::Timeout => MessageKey::ServerTimeout,
            Self::NetworkUnavailable => MessageKey::ServerUnavailable,
            Self::InvalidSession | Self::ServerError | Self::Unknown(_) => MessageKey::ServerError,
        }
    }
}

impl From<&RequestFailure> for SessionFailure {
    fn from(failure: &RequestFailure) -> Self {
        Self::classify(failure)
    }
}
