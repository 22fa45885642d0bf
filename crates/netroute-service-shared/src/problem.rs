//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use netroute_lib::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for topologies that do not form a valid graph.
pub const PROBLEM_INVALID_TOPOLOGY: &str = "/problems/invalid-topology";

/// Problem type URI for missing or ambiguous start/end flags.
pub const PROBLEM_ENDPOINT_CONFIGURATION: &str = "/problems/endpoint-configuration";

/// Problem type URI for node ids the topology does not contain.
pub const PROBLEM_UNKNOWN_NODE: &str = "/problems/unknown-node";

/// Problem type URI for requests whose optimal route count exceeds the cap.
pub const PROBLEM_TOO_MANY_PATHS: &str = "/problems/too-many-paths";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., topology file missing).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use netroute_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_NODE};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_NODE,
///     "Unknown Node",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Node 'core-9' is not part of the topology")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (the request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 422 for topologies that fail graph validation.
    pub fn invalid_topology(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_TOPOLOGY,
            "Invalid Topology",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 422 for missing or duplicated start/end flags.
    pub fn endpoint_configuration(
        detail: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self::new(
            PROBLEM_ENDPOINT_CONFIGURATION,
            "Endpoint Configuration Error",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for node ids the topology does not declare.
    pub fn unknown_node(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_UNKNOWN_NODE, "Unknown Node", StatusCode::NOT_FOUND)
            .with_detail(format!("Node '{}' is not part of the topology", id))
            .with_request_id(request_id)
    }

    /// 422 when more optimal routes exist than the request allows.
    pub fn too_many_paths(limit: usize, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_TOO_MANY_PATHS,
            "Too Many Paths",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(format!(
            "More than {} equal-cost routes exist; raise max_paths or disable strict mode",
            limit
        ))
        .with_request_id(request_id)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Short slug used as the `reason` label on failure metrics.
    pub fn metric_reason(&self) -> &'static str {
        match self.type_uri.as_str() {
            PROBLEM_INVALID_REQUEST => "validation_error",
            PROBLEM_INVALID_TOPOLOGY => "graph_integrity",
            PROBLEM_ENDPOINT_CONFIGURATION => "configuration",
            PROBLEM_UNKNOWN_NODE => "unknown_node",
            PROBLEM_TOO_MANY_PATHS => "too_many_paths",
            PROBLEM_SERVICE_UNAVAILABLE => "unavailable",
            _ => "internal",
        }
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        err if err.is_graph_integrity() => {
            ProblemDetails::invalid_topology(err.to_string(), request_id)
        }
        err if err.is_configuration() => {
            ProblemDetails::endpoint_configuration(err.to_string(), request_id)
        }
        LibError::UnknownNode { id } => ProblemDetails::unknown_node(id, request_id),
        LibError::TooManyPaths { limit } => ProblemDetails::too_many_paths(*limit, request_id),
        LibError::InvalidPathLimit => {
            ProblemDetails::bad_request("The 'max_paths' field must be at least 1", request_id)
        }
        LibError::TopologyParse(err) => {
            ProblemDetails::bad_request(format!("Topology is not valid: {}", err), request_id)
        }
        LibError::TopologyNotFound { path } => ProblemDetails::service_unavailable(
            format!("Topology not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
