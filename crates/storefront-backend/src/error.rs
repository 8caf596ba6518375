//! Commerce backend errors.

use storefront_data::FetchError;

/// A failed backend call. `resource` names what was being fetched.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to fetch {resource}: {message}")]
    Transport {
        resource: &'static str,
        message: String,
    },

    #[error("failed to fetch {resource}: HTTP {status}: {message}")]
    Status {
        resource: &'static str,
        status: u16,
        message: String,
    },

    #[error("failed to decode {resource}: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    pub(crate) fn from_fetch(resource: &'static str, e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => Self::Status {
                resource,
                status,
                message,
            },
            FetchError::ParseError(message) | FetchError::JsonError(message) => {
                Self::Decode { resource, message }
            }
            FetchError::InvalidUrl(message) => Self::InvalidUrl(message),
            other => Self::Transport {
                resource,
                message: other.to_string(),
            },
        }
    }

    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for BackendError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}
