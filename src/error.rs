use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a call into the client can fail with.
///
/// The variants separate problems the caller can fix by changing the request
/// ([`Error::Validation`]) from problems worth retrying later
/// ([`Error::Transport`]).
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was rejected locally; no request was sent.
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The HTTP round trip did not complete.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON.
    #[error("failed to parse API JSON (url={url}, status={status})")]
    Decode {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Name of the rejected field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
