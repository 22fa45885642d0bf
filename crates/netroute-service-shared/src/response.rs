//! Success envelope for HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful response body: the payload's fields at the top level, plus the
/// request id and content type.
///
/// The request id mirrors `ProblemDetails::instance`, so clients can
/// correlate successes and failures with server logs the same way.
///
/// ```
/// use netroute_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     nodes: usize,
/// }
///
/// let body = ServiceResponse::new(Summary { nodes: 8 }, "req-1");
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["nodes"], 8);
/// assert_eq!(json["request_id"], "req-1");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub request_id: String,
    pub content_type: &'static str,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T, request_id: impl Into<String>) -> Self {
        Self {
            data,
            request_id: request_id.into(),
            content_type: "application/json",
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[derive(Debug, Serialize)]
    struct PlanBody {
        cost: Option<f64>,
        paths: Vec<Vec<&'static str>>,
    }

    #[test]
    fn test_payload_fields_are_flattened() {
        let body = ServiceResponse::new(
            PlanBody {
                cost: Some(2.0),
                paths: vec![vec!["a", "c", "d"]],
            },
            "req-7",
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["cost"], 2.0);
        assert_eq!(json["paths"][0][1], "c");
        assert_eq!(json["request_id"], "req-7");
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_unreachable_cost_serialises_as_null() {
        let body = ServiceResponse::new(
            PlanBody {
                cost: None,
                paths: Vec::new(),
            },
            "req-8",
        );
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["cost"].is_null());
        assert_eq!(json["paths"], serde_json::json!([]));
    }

    #[test]
    fn test_into_response_is_ok_json() {
        let response = ServiceResponse::new(PlanBody { cost: None, paths: vec![] }, "r")
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
