//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use netroute_lib::{NodeId, OverflowPolicy, RouteOptions, Topology};

use crate::ProblemDetails;

/// Upper bound on the number of waypoint constraints in one request.
pub const MAX_CONSTRAINTS: usize = 256;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request body for `POST /api/v1/route`.
///
/// ```json
/// {"constraints": ["fw-edge-01"], "from": "host-a", "max_paths": 50}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Waypoint device ids; a route must pass through at least one.
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Inline topology document, used instead of the service's loaded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<Value>,

    /// Source node id override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Destination node id override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Maximum number of routes to return. Clamped to the service limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    /// Fail with 422 instead of truncating when the cap is exceeded.
    #[serde(default)]
    pub strict: bool,
}

impl RouteRequest {
    /// Parse the inline topology, if one was supplied.
    pub fn inline_topology(&self) -> Option<netroute_lib::Result<Topology>> {
        self.topology
            .as_ref()
            .map(|value| Topology::from_json_value(value.clone()))
    }

    /// Build the library request, clamping `max_paths` to `service_cap`.
    pub fn to_lib_request(&self, service_cap: usize) -> netroute_lib::RouteRequest {
        let max_paths = self
            .max_paths
            .map_or(service_cap, |requested| requested.min(service_cap));

        netroute_lib::RouteRequest {
            waypoints: self.constraints.clone(),
            source: self.from.as_deref().map(NodeId::from),
            destination: self.to.as_deref().map(NodeId::from),
            options: RouteOptions {
                max_paths: Some(max_paths),
                overflow: if self.strict {
                    OverflowPolicy::Reject
                } else {
                    OverflowPolicy::Truncate
                },
            },
        }
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.constraints.len() > MAX_CONSTRAINTS {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'constraints' field accepts at most {} device ids",
                    MAX_CONSTRAINTS
                ),
                request_id,
            )));
        }

        if self.constraints.iter().any(|c| c.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'constraints' field cannot contain empty device ids",
                request_id,
            )));
        }

        for (field, value) in [("from", &self.from), ("to", &self.to)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("The '{}' field cannot be empty", field),
                    request_id,
                )));
            }
        }

        if self.max_paths == Some(0) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'max_paths' field must be at least 1",
                request_id,
            )));
        }

        if let Some(topology) = &self.topology {
            if !topology.is_object() {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'topology' field must be a JSON object",
                    request_id,
                )));
            }
        }

        Ok(())
    }
}
