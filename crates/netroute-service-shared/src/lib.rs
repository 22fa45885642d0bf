//! Shared infrastructure for netroute HTTP microservices.
//!
//! This crate provides common functionality used by the service binaries:
//!
//! - [`AppState`]: Topology snapshot loaded once at startup
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request id and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all routing logic resides
//! in `netroute-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call netroute-lib APIs                                   │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides the lab topology fixture as shared
//! state. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthState, HealthStatus, TopologyReadiness};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_calculated, record_route_cost,
    record_route_failed, record_route_paths, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_ENDPOINT_CONFIGURATION, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_INVALID_TOPOLOGY, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_TOO_MANY_PATHS, PROBLEM_UNKNOWN_NODE,
};
pub use request::{RouteRequest, Validate, MAX_CONSTRAINTS};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_MAX_PATHS};
