//! Search gateway errors.

use storefront_data::FetchError;

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, SearchError>;

/// A failed search. Carries the underlying cause.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The service could not be reached or did not answer in time.
    #[error("search service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("search service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The response body was not a search response.
    #[error("invalid search response: {0}")]
    Decode(String),

    /// The gateway could not be constructed.
    #[error("invalid search configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// Network-level failure rather than an answer from the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<FetchError> for SearchError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => Self::Service { status, message },
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => Self::Decode(msg),
            FetchError::InvalidUrl(msg) => Self::Config(msg),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fetch_error() {
        let err: SearchError = FetchError::HttpError {
            status: 400,
            message: "Attribute `price` is not filterable".to_string(),
        }
        .into();
        assert!(matches!(err, SearchError::Service { status: 400, .. }));
        assert!(!err.is_transport());

        let err: SearchError = FetchError::Timeout.into();
        assert!(err.is_transport());

        let err: SearchError = FetchError::JsonError("expected value".to_string()).into();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_transport_classification_matches_fetch_error() {
        let cases = [
            FetchError::RequestError("connection refused".to_string()),
            FetchError::Timeout,
            FetchError::InvalidUrl("relative URL without a base".to_string()),
            FetchError::HttpError {
                status: 503,
                message: "unavailable".to_string(),
            },
            FetchError::ParseError("expected value".to_string()),
        ];
        for fetch in cases {
            let expected = fetch.is_transport();
            let err = SearchError::from(fetch);
            assert_eq!(err.is_transport(), expected, "{:?}", err);
        }
    }
}
