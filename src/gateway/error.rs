use thiserror::Error;

/// Classified failure of an outbound service call.
///
/// Status codes map onto variants at the response boundary: 404 becomes
/// `NotFound`, other 4xx become `BadRequest`, 503 becomes
/// `ServiceUnavailable` and the remaining 5xx become `ServerError`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation} exhausted retries after {attempts} attempts")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: Box<GatewayError>,
    },
}

impl GatewayError {
    /// Only connection-level faults and explicit service-unavailable
    /// responses qualify for the retry budget. A body that fails to decode
    /// is not transient; retrying it would just re-read the same payload.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(err) => !err.is_decode(),
            GatewayError::ServiceUnavailable(_) => true,
            _ => false,
        }
    }
}

/// Fold a non-success response into a classified error, keeping the remote
/// body text in the message.
pub async fn classify_response(
    context: &str,
    response: reqwest::Response,
) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        GatewayError::ServiceUnavailable(format!("{context}: {status} - {body}"))
    } else if status == reqwest::StatusCode::NOT_FOUND {
        GatewayError::NotFound(format!("{context}: {status} - {body}"))
    } else if status.is_client_error() {
        GatewayError::BadRequest(format!("{context}: {status} - {body}"))
    } else {
        GatewayError::ServerError(format!("{context}: {status} - {body}"))
    }
}
