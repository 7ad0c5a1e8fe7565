//! JSON replies and error mapping

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use survey_core::SurveyError;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description
    pub error: String,
    /// Stable error label
    pub kind: String,
}

/// Serialize `body` as a 200 JSON reply
pub fn json<T: Serialize>(body: &T) -> Response {
    warp::reply::json(body).into_response()
}

/// HTTP status for a survey error
#[must_use]
pub fn status_for(err: &SurveyError) -> StatusCode {
    match err {
        SurveyError::UnknownLanguage { .. } => StatusCode::BAD_REQUEST,
        SurveyError::UnknownScenario { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error reply for a survey error
pub fn error(err: &SurveyError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::warn!(error = %err, "request rejected");
    }
    with_status(err.to_string(), err.kind(), status)
}

/// 500 reply for failures outside the survey itself
pub fn internal(error: impl std::fmt::Display) -> Response {
    tracing::error!(error = %error, "request failed");
    with_status(error.to_string(), "internal", StatusCode::INTERNAL_SERVER_ERROR)
}

fn with_status(error: String, kind: &str, status: StatusCode) -> Response {
    let body = ErrorBody {
        error,
        kind: kind.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Turn warp rejections into JSON error replies
///
/// # Errors
/// Never; every rejection becomes a reply
pub async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, kind, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "not_found", "not found".to_string())
    } else if let Some(e) = rejection.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, "bad_request", e.to_string())
    } else if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, "bad_request", e.to_string())
    } else if let Some(e) = rejection.find::<warp::reject::PayloadTooLarge>() {
        (StatusCode::PAYLOAD_TOO_LARGE, "bad_request", e.to_string())
    } else if let Some(e) = rejection.find::<warp::reject::MethodNotAllowed>() {
        (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", e.to_string())
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "internal error".to_string(),
        )
    };
    Ok(with_status(message, kind, status))
}
