//! Error handling for the REST client

use super::types::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` holds the `error` field of the JSON body, if the body had one.
    #[error("HTTP error with status {status}: {}", .message.as_deref().unwrap_or("no error detail"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// A success response whose JSON did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        Self::from_body(status, &body)
    }

    /// Build the error for a failed response from its raw body.
    pub fn from_body(status: u16, body: &[u8]) -> ApiError {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|msg| !msg.trim().is_empty());
        ApiError::Http { status, message }
    }

    /// The message the server gave for this failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, or `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_extracts_error_field() {
        let error = ApiError::from_body(400, br#"{"error": "Le nom de l'hotel est requis"}"#);
        assert_eq!(error.server_message(), Some("Le nom de l'hotel est requis"));
        assert_eq!(
            error.user_message("Erreur lors de la création"),
            "Le nom de l'hotel est requis"
        );
    }

    #[test]
    // JSON without an `error` field falls back to the generic text.
    fn test_from_body_without_error_field() {
        let error = ApiError::from_body(500, br#"{"message": "oops"}"#);
        assert_eq!(error.server_message(), None);
        assert_eq!(error.user_message("Erreur serveur"), "Erreur serveur");
    }

    #[test]
    // An HTML error page is not parseable and must not leak into the message.
    fn test_from_body_unparseable() {
        let error = ApiError::from_body(502, b"<html>Bad Gateway</html>");
        match &error {
            ApiError::Http { status, message } => {
                assert_eq!(*status, 502);
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            error.to_string(),
            "HTTP error with status 502: no error detail"
        );
    }
}
